//! Session error types
//!
//! Gateway failures never surface here; the store recovers them into
//! chat messages. Only the local storage layer can fail an operation.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] meku_storage::StorageError),
}
