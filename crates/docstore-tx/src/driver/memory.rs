//! In-memory reference driver with transactional staging.
//!
//! A single-node document store backed by a mutex-protected map. Sessions
//! stage transactional writes in a private overlay and apply them to the
//! shared store on commit; with read concern `snapshot` a transaction reads
//! from a point-in-time copy taken at start.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde_json::Value;

use super::traits::{DriverClient, DriverSession, SessionId};
use crate::config::{ReadConcern, SessionConfig, TransactionConfig, WriteConcern};
use crate::types::DriverError;

type Store = Arc<Mutex<HashMap<String, Value>>>;

/// An in-process document store usable wherever a real driver client is
/// expected. Cloning shares the underlying store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDriver {
    store: Store,
    session_timeout: Option<Duration>,
}

impl InMemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// A driver whose sessions expire after being idle for `timeout`.
    pub fn with_session_timeout(timeout: Duration) -> Self {
        Self {
            store: Store::default(),
            session_timeout: Some(timeout),
        }
    }

    /// Read a committed document, outside any session.
    pub fn find(&self, key: &str) -> Option<Value> {
        self.store.lock().get(key).cloned()
    }

    /// Write a document directly, outside any session.
    pub fn insert(&self, key: &str, doc: Value) {
        self.store.lock().insert(key.to_string(), doc);
    }

    /// Number of committed documents.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.lock().is_empty()
    }
}

#[async_trait]
impl DriverClient for InMemoryDriver {
    type Session = InMemorySession;

    async fn open_session(&self, config: &SessionConfig) -> Result<Self::Session, DriverError> {
        let id = SessionId::new();
        let now = Utc::now();
        tracing::debug!(
            session = %id,
            read_preference = %config.read_preference,
            causal_consistency = config.causal_consistency,
            "session opened"
        );
        Ok(InMemorySession {
            id,
            store: Arc::clone(&self.store),
            txn: None,
            created_at: now,
            last_activity: now,
            timeout: self.session_timeout,
            ended: false,
        })
    }
}

/// Transaction state private to one session. `staged` maps keys to writes,
/// with `None` marking a delete.
struct Txn {
    snapshot: Option<HashMap<String, Value>>,
    staged: HashMap<String, Option<Value>>,
}

/// A server-side session of the in-memory driver.
///
/// Document operations live here so callers attach reads and writes to a
/// session exactly the way they would against a real driver.
pub struct InMemorySession {
    id: SessionId,
    store: Store,
    txn: Option<Txn>,
    created_at: DateTime<Utc>,
    last_activity: DateTime<Utc>,
    timeout: Option<Duration>,
    ended: bool,
}

impl InMemorySession {
    /// When the session was opened.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Reject use of an ended or idle-expired session, and record activity.
    fn touch(&mut self) -> Result<(), DriverError> {
        if self.ended {
            return Err(DriverError::SessionEnded);
        }
        if let Some(timeout) = self.timeout {
            let idle = Utc::now().signed_duration_since(self.last_activity);
            if idle.to_std().map(|d| d > timeout).unwrap_or(false) {
                return Err(DriverError::SessionExpired);
            }
        }
        self.last_activity = Utc::now();
        Ok(())
    }

    /// Read a document through this session. Inside a transaction, reads see
    /// the session's own staged writes over its read-concern view.
    pub fn find(&mut self, key: &str) -> Result<Option<Value>, DriverError> {
        self.touch()?;
        match &self.txn {
            Some(txn) => {
                if let Some(staged) = txn.staged.get(key) {
                    return Ok(staged.clone());
                }
                match &txn.snapshot {
                    Some(snapshot) => Ok(snapshot.get(key).cloned()),
                    None => Ok(self.store.lock().get(key).cloned()),
                }
            }
            None => Ok(self.store.lock().get(key).cloned()),
        }
    }

    /// Write a document through this session. Inside a transaction the write
    /// is staged until commit.
    pub fn insert(&mut self, key: &str, doc: Value) -> Result<(), DriverError> {
        self.touch()?;
        match &mut self.txn {
            Some(txn) => {
                txn.staged.insert(key.to_string(), Some(doc));
            }
            None => {
                self.store.lock().insert(key.to_string(), doc);
            }
        }
        Ok(())
    }

    /// Delete a document through this session. Inside a transaction the
    /// delete is staged until commit.
    pub fn delete(&mut self, key: &str) -> Result<(), DriverError> {
        self.touch()?;
        match &mut self.txn {
            Some(txn) => {
                txn.staged.insert(key.to_string(), None);
            }
            None => {
                self.store.lock().remove(key);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DriverSession for InMemorySession {
    fn id(&self) -> &SessionId {
        &self.id
    }

    async fn start_transaction(&mut self, config: &TransactionConfig) -> Result<(), DriverError> {
        self.touch()?;
        if self.txn.is_some() {
            return Err(DriverError::TransactionInProgress);
        }
        // A single-node store cannot acknowledge on more than one node.
        if let WriteConcern::Nodes(n) = config.write_concern {
            if n > 1 {
                return Err(DriverError::Server {
                    code: 100,
                    message: format!("cannot satisfy write concern w={n} on a single-node store"),
                });
            }
        }
        let snapshot = match config.read_concern {
            ReadConcern::Snapshot => Some(self.store.lock().clone()),
            ReadConcern::Local | ReadConcern::Majority => None,
        };
        self.txn = Some(Txn {
            snapshot,
            staged: HashMap::new(),
        });
        tracing::debug!(
            session = %self.id,
            read_concern = %config.read_concern,
            write_concern = %config.write_concern,
            "transaction started"
        );
        Ok(())
    }

    async fn commit_transaction(&mut self) -> Result<(), DriverError> {
        self.touch()?;
        let txn = self.txn.take().ok_or(DriverError::NoTransaction)?;
        let mut store = self.store.lock();
        for (key, staged) in txn.staged {
            match staged {
                Some(doc) => {
                    store.insert(key, doc);
                }
                None => {
                    store.remove(&key);
                }
            }
        }
        tracing::debug!(session = %self.id, "transaction committed");
        Ok(())
    }

    async fn abort_transaction(&mut self) -> Result<(), DriverError> {
        self.touch()?;
        if self.txn.take().is_none() {
            return Err(DriverError::NoTransaction);
        }
        tracing::debug!(session = %self.id, "transaction aborted");
        Ok(())
    }

    async fn end(&mut self) -> Result<(), DriverError> {
        if self.ended {
            return Err(DriverError::SessionEnded);
        }
        // An open transaction is discarded with the session, as the server
        // would on session end.
        self.txn = None;
        self.ended = true;
        tracing::debug!(session = %self.id, "session ended");
        Ok(())
    }
}
