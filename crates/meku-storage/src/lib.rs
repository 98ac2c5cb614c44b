//! Meku storage layer
//!
//! A small durable key→string store. The client mirrors a subset of
//! session state into it after every commit and reads it back once at
//! startup; it is never used as a synchronization primitive.

mod database;
mod error;
mod migrations;
mod snapshot;

pub use database::Database;
pub use error::StorageError;
pub use snapshot::{PersistedSnapshot, SnapshotStore};

pub type Result<T> = std::result::Result<T, StorageError>;
