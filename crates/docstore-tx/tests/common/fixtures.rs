//! Test fixtures for lifecycle and transaction tests.

use docstore_tx::driver::InMemoryDriver;
use docstore_tx::SessionManager;

/// Create a manager over a fresh in-memory driver.
pub fn create_manager() -> SessionManager<InMemoryDriver> {
    SessionManager::new(InMemoryDriver::new())
}
