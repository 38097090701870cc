//! Session and transaction lifecycle state machine.

use crate::config::{SessionOptions, TransactionOptions};
use crate::driver::{DriverClient, DriverSession, SessionId};
use crate::session::handle::SessionHandle;
use crate::types::{SessionError, SessionResult};

/// Single point of control for the session/transaction state machine.
///
/// A manager holds at most one session at a time; a transaction is a
/// sub-state nested inside "session present". Every mutating operation takes
/// `&mut self`, so one manager serves one logical unit of work. Share across
/// tasks only behind external synchronization.
pub struct SessionManager<D: DriverClient> {
    driver: D,
    state: State<D::Session>,
}

enum State<S> {
    NoSession,
    Open(SessionHandle<S>),
}

impl<D: DriverClient> SessionManager<D> {
    /// Create a manager with no session.
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            state: State::NoSession,
        }
    }

    /// Borrow the underlying driver client.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Open a server-side session and hold it.
    ///
    /// Caller options are merged over `{ read_preference: primary,
    /// causal_consistency: true }`, caller values winning. Fails with
    /// [`SessionError::AlreadyStarted`] if a session is already held; the
    /// existing session is left untouched. Returns the new session's id.
    pub async fn start_session(&mut self, options: SessionOptions) -> SessionResult<SessionId> {
        if let State::Open(_) = self.state {
            return Err(SessionError::AlreadyStarted);
        }
        let config = options.resolve();
        let session = self.driver.open_session(&config).await?;
        let id = session.id().clone();
        tracing::info!(session = %id, "session started");
        self.state = State::Open(SessionHandle::new(session));
        Ok(id)
    }

    /// Open a multi-document transaction on the current session.
    ///
    /// Caller options are merged over `{ read_concern: snapshot,
    /// write_concern: majority }`, caller values winning. Fails with
    /// [`SessionError::NoActiveSession`] if no session is held. If a
    /// transaction is already open the call is still delegated and the
    /// driver's error is surfaced.
    pub async fn start_transaction(&mut self, options: TransactionOptions) -> SessionResult<()> {
        let handle = match &mut self.state {
            State::Open(handle) => handle,
            State::NoSession => return Err(SessionError::NoActiveSession),
        };
        let config = options.resolve();
        handle.start_transaction(&config).await?;
        tracing::debug!(
            session = %handle.id(),
            read_concern = %config.read_concern,
            write_concern = %config.write_concern,
            "transaction started"
        );
        Ok(())
    }

    /// Commit the open transaction. All writes attached to the session since
    /// `start_transaction` become durable together.
    pub async fn commit_transaction(&mut self) -> SessionResult<()> {
        let handle = match &mut self.state {
            State::Open(handle) => handle,
            State::NoSession => return Err(SessionError::NoActiveSession),
        };
        handle.commit_transaction().await?;
        tracing::debug!(session = %handle.id(), "transaction committed");
        Ok(())
    }

    /// Abort the open transaction, rolling back all writes performed in it.
    pub async fn abort_transaction(&mut self) -> SessionResult<()> {
        let handle = match &mut self.state {
            State::Open(handle) => handle,
            State::NoSession => return Err(SessionError::NoActiveSession),
        };
        handle.abort_transaction().await?;
        tracing::debug!(session = %handle.id(), "transaction aborted");
        Ok(())
    }

    /// The current session handle, if one is held. Pure accessor.
    pub fn session(&self) -> Option<&SessionHandle<D::Session>> {
        match &self.state {
            State::Open(handle) => Some(handle),
            State::NoSession => None,
        }
    }

    /// Mutable access to the current session handle, for attaching it to
    /// document operations.
    pub fn session_mut(&mut self) -> Option<&mut SessionHandle<D::Session>> {
        match &mut self.state {
            State::Open(handle) => Some(handle),
            State::NoSession => None,
        }
    }

    /// Whether a transaction is open on the current session.
    pub fn in_transaction(&self) -> bool {
        matches!(&self.state, State::Open(handle) if handle.in_transaction())
    }

    /// End the current session, releasing its server-side resources.
    ///
    /// Fails with [`SessionError::NoSession`] if no session is held, and
    /// with [`SessionError::TransactionOpen`] if a transaction is still
    /// open. Nothing is aborted implicitly; the caller must commit or abort
    /// first.
    pub async fn end_session(&mut self) -> SessionResult<()> {
        match std::mem::replace(&mut self.state, State::NoSession) {
            State::NoSession => Err(SessionError::NoSession),
            State::Open(handle) if handle.in_transaction() => {
                self.state = State::Open(handle);
                Err(SessionError::TransactionOpen)
            }
            State::Open(handle) => {
                let id = handle.id().clone();
                handle.end().await?;
                tracing::info!(session = %id, "session ended");
                Ok(())
            }
        }
    }
}
