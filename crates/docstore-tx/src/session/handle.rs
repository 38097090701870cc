//! Process-local handle for one server-side session.

use crate::config::TransactionConfig;
use crate::driver::{DriverSession, SessionId};
use crate::types::DriverError;

/// Owns one driver session and tracks whether a transaction is open on it.
///
/// Handles are created and consumed by the manager; the consuming layer
/// borrows one via [`SessionManager::session`](crate::SessionManager::session)
/// to attach it to document operations.
pub struct SessionHandle<S> {
    session: S,
    transaction_open: bool,
}

impl<S: DriverSession> SessionHandle<S> {
    pub(crate) fn new(session: S) -> Self {
        Self {
            session,
            transaction_open: false,
        }
    }

    /// The server-assigned identifier of the underlying session.
    pub fn id(&self) -> &SessionId {
        self.session.id()
    }

    /// Whether a transaction is currently open on this session.
    pub fn in_transaction(&self) -> bool {
        self.transaction_open
    }

    /// Borrow the driver session, e.g. to attach it to a read.
    pub fn driver(&self) -> &S {
        &self.session
    }

    /// Mutably borrow the driver session, e.g. to attach it to a write.
    pub fn driver_mut(&mut self) -> &mut S {
        &mut self.session
    }

    /// Open a transaction. A second start on an already-transactional
    /// session is surfaced by the driver, not guarded here.
    pub(crate) async fn start_transaction(
        &mut self,
        config: &TransactionConfig,
    ) -> Result<(), DriverError> {
        self.session.start_transaction(config).await?;
        self.transaction_open = true;
        Ok(())
    }

    pub(crate) async fn commit_transaction(&mut self) -> Result<(), DriverError> {
        self.session.commit_transaction().await?;
        self.transaction_open = false;
        Ok(())
    }

    pub(crate) async fn abort_transaction(&mut self) -> Result<(), DriverError> {
        self.session.abort_transaction().await?;
        self.transaction_open = false;
        Ok(())
    }

    /// Release the underlying session. Consumes the handle; a session is
    /// never reused after ending.
    pub(crate) async fn end(mut self) -> Result<(), DriverError> {
        self.session.end().await
    }
}
