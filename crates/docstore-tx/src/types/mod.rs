//! Shared result and error types.

pub mod error;

pub use error::*;
