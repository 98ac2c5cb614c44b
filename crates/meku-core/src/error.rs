//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] meku_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] meku_session::SessionError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] meku_gateway::GatewayError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
