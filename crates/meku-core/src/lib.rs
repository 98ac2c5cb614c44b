//! Meku Core
//!
//! Central coordination layer for the Meku molecule-authoring client.
//! Rust owns all state; the UI and the 3D viewer are stateless
//! projections of it.

mod config;
mod error;
mod folders;
mod renderer;
mod workspace;

pub use config::Config;
pub use error::CoreError;
pub use folders::{Folder, FolderStore};
pub use renderer::ModelRenderer;
pub use workspace::Workspace;

// Re-export core components
pub use meku_carousel::{Carousel, ModelArtifact};
pub use meku_gateway::{
    ChatMessage, Gateway, GatewayError, GenerateResponse, HttpGateway, ModelChatResponse,
    RemoteSession, ResponseMode, Sender, SessionSummary,
};
pub use meku_layout::{LayoutController, LayoutPhase};
pub use meku_session::{Mode, Session, SessionError, SessionStore, TemplateItem};
pub use meku_storage::{Database, PersistedSnapshot, SnapshotStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
