//! Error taxonomy for session and transaction lifecycle operations.

use thiserror::Error;

/// Convenience alias for fallible lifecycle operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Errors raised by the session/transaction manager.
///
/// All errors surface synchronously to the immediate caller; nothing is
/// retried or swallowed internally.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `start_session` was called while a session is already held. The
    /// existing session is left untouched.
    #[error("session already started; end it before starting another")]
    AlreadyStarted,

    /// `end_session` was called with no session held.
    #[error("no session to end")]
    NoSession,

    /// A transaction operation was attempted with no session held.
    #[error("no active session; call start_session first")]
    NoActiveSession,

    /// `end_session` was called while a transaction is still open. Commit or
    /// abort the transaction first.
    #[error("a transaction is still open on the current session")]
    TransactionOpen,

    /// A failure originating from the driver, propagated unmodified.
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Failures originating from the driver client or the server behind it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// The connection to the server was lost or could not be established.
    #[error("connection failure: {0}")]
    Connection(String),

    /// A server-side command failure.
    #[error("server error {code}: {message}")]
    Server { code: i32, message: String },

    /// `start_transaction` on a session that already has one open.
    #[error("transaction already in progress on this session")]
    TransactionInProgress,

    /// Commit or abort with no transaction open on the session.
    #[error("no transaction in progress on this session")]
    NoTransaction,

    /// A write conflict detected at commit. Retry policy belongs to the
    /// caller.
    #[error("transaction conflict: {0}")]
    TransactionConflict(String),

    /// The server expired the session after its idle timeout.
    #[error("session expired")]
    SessionExpired,

    /// The session was already ended and cannot be reused.
    #[error("session already ended")]
    SessionEnded,
}
