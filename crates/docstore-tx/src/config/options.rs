//! Session and transaction options with documented defaults.
//!
//! Options records carry only the keys the caller chose to set; `resolve()`
//! merges them over the defaults (caller value wins per key, untouched
//! defaults remain) and produces the concrete config handed to the driver.

use serde::{Deserialize, Serialize};

/// Which replica session operations are routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReadPreference {
    /// Route to the primary replica only.
    Primary,
    /// Prefer the primary, fall back to a secondary.
    PrimaryPreferred,
    /// Route to a secondary replica only.
    Secondary,
    /// Prefer a secondary, fall back to the primary.
    SecondaryPreferred,
    /// Route to the lowest-latency member.
    Nearest,
}

impl std::fmt::Display for ReadPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReadPreference::Primary => "primary",
            ReadPreference::PrimaryPreferred => "primaryPreferred",
            ReadPreference::Secondary => "secondary",
            ReadPreference::SecondaryPreferred => "secondaryPreferred",
            ReadPreference::Nearest => "nearest",
        };
        write!(f, "{name}")
    }
}

/// Isolation level for reads inside a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadConcern {
    /// Reads observe the node's latest local state.
    Local,
    /// Reads observe majority-committed state.
    Majority,
    /// Reads observe a consistent point-in-time view across the transaction.
    Snapshot,
}

impl std::fmt::Display for ReadConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReadConcern::Local => "local",
            ReadConcern::Majority => "majority",
            ReadConcern::Snapshot => "snapshot",
        };
        write!(f, "{name}")
    }
}

/// Durability requirement for transactional writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteConcern {
    /// Acknowledged only after being durably applied on a majority of
    /// replicas.
    Majority,
    /// Acknowledged after being applied on the given number of nodes.
    #[serde(untagged)]
    Nodes(u32),
}

impl std::fmt::Display for WriteConcern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WriteConcern::Majority => write!(f, "majority"),
            WriteConcern::Nodes(n) => write!(f, "{n}"),
        }
    }
}

/// Caller overrides for `start_session`. Unset keys fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Routing for operations attached to the session. Default: `Primary`.
    pub read_preference: Option<ReadPreference>,
    /// Causal ordering of operations within the session. Default: `true`.
    pub causal_consistency: Option<bool>,
}

/// Effective session configuration handed to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub read_preference: ReadPreference,
    pub causal_consistency: bool,
}

impl SessionOptions {
    /// Merge these options over the session-start defaults.
    pub fn resolve(&self) -> SessionConfig {
        SessionConfig {
            read_preference: self.read_preference.unwrap_or(ReadPreference::Primary),
            causal_consistency: self.causal_consistency.unwrap_or(true),
        }
    }
}

/// Caller overrides for `start_transaction`. Unset keys fall back to
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionOptions {
    /// Read isolation inside the transaction. Default: `Snapshot`.
    pub read_concern: Option<ReadConcern>,
    /// Write durability at commit. Default: `Majority`.
    pub write_concern: Option<WriteConcern>,
    /// Commit deadline, forwarded opaquely to the driver. Default: none.
    pub max_commit_time_ms: Option<u64>,
}

/// Effective transaction configuration handed to the driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionConfig {
    pub read_concern: ReadConcern,
    pub write_concern: WriteConcern,
    pub max_commit_time_ms: Option<u64>,
}

impl TransactionOptions {
    /// Merge these options over the transaction-start defaults.
    pub fn resolve(&self) -> TransactionConfig {
        TransactionConfig {
            read_concern: self.read_concern.unwrap_or(ReadConcern::Snapshot),
            write_concern: self.write_concern.unwrap_or(WriteConcern::Majority),
            max_commit_time_ms: self.max_commit_time_ms,
        }
    }
}
