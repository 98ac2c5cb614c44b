//! Meku session management
//!
//! Owns the canonical Session entity and mediates all mutation:
//! - one view-mode state machine (Home/Chat/Model) with an upgrade-only
//!   rule: Model never implicitly reverts to Chat
//! - at most one generate request in flight per session (the loading
//!   flag is the re-entrancy guard)
//! - epoch tokens so a late response for an abandoned session selection
//!   is discarded instead of overwriting newer state
//! - persisted keys mirrored after every commit

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Mode, Session, TemplateItem};
pub use store::SessionStore;

pub type Result<T> = std::result::Result<T, SessionError>;
