//! Driver client contract consumed by the session manager.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::{SessionConfig, TransactionConfig};
use crate::types::DriverError;

/// Opaque server-assigned session identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generate a fresh identifier. Called by drivers when a session is
    /// allocated.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A database client able to open server-side sessions.
#[async_trait]
pub trait DriverClient: Send + Sync {
    /// The driver's session object.
    type Session: DriverSession;

    /// Allocate a new server-side session. One round-trip to the server.
    async fn open_session(&self, config: &SessionConfig) -> Result<Self::Session, DriverError>;
}

/// A server-side session as exposed by the driver.
///
/// Transaction calls are single round-trips; cancellation propagates by
/// dropping the returned future.
#[async_trait]
pub trait DriverSession: Send + Sync {
    /// The server-assigned identifier of this session.
    fn id(&self) -> &SessionId;

    /// Open a multi-document transaction on this session.
    async fn start_transaction(&mut self, config: &TransactionConfig) -> Result<(), DriverError>;

    /// Commit the open transaction, making all its writes durable together.
    async fn commit_transaction(&mut self) -> Result<(), DriverError>;

    /// Abort the open transaction, rolling back all writes staged in it.
    async fn abort_transaction(&mut self) -> Result<(), DriverError>;

    /// Release the session's server-side resources. The session cannot be
    /// used afterwards.
    async fn end(&mut self) -> Result<(), DriverError>;
}
