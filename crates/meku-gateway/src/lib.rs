//! Meku backend gateway
//!
//! The request/response contract with the generation backend, plus the
//! reqwest client that speaks it. All failures collapse into three
//! recoverable kinds (network, not-found, malformed); the session store
//! turns every one of them into a chat message, never a fatal error.

mod client;
mod error;
mod types;

pub use client::{Gateway, HttpGateway};
pub use error::GatewayError;
pub use types::{
    ChatMessage, GenerateResponse, ModelChatResponse, RemoteSession, ResponseMode, Sender,
    SessionSummary,
};

pub type Result<T> = std::result::Result<T, GatewayError>;
