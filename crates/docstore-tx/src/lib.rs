//! Session and multi-document transaction lifecycle for document stores.
//!
//! `docstore-tx` coordinates server-side session state with ACID transaction
//! boundaries in front of a document database driver: a session is opened
//! exactly once per manager, a transaction is layered on top of it with
//! snapshot/majority consistency defaults, and the two lifecycles are kept
//! from being misused. Reads and writes issued by the surrounding client
//! attach the managed session handle for causal consistency and atomicity.
//!
//! The driver is abstracted behind [`DriverClient`]/[`DriverSession`]; an
//! in-memory reference implementation ships in [`driver::memory`].

pub mod config;
pub mod driver;
pub mod session;
pub mod types;

pub use config::{
    ReadConcern, ReadPreference, SessionConfig, SessionOptions, TransactionConfig,
    TransactionOptions, WriteConcern,
};
pub use driver::{DriverClient, DriverSession, SessionId};
pub use session::{SessionHandle, SessionManager};
pub use types::{DriverError, SessionError, SessionResult};
