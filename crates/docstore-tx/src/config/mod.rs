//! Typed configuration for session and transaction start.

pub mod options;

pub use options::{
    ReadConcern, ReadPreference, SessionConfig, SessionOptions, TransactionConfig,
    TransactionOptions, WriteConcern,
};
