//! Session data structure and view-mode state machine

use meku_carousel::Carousel;
use meku_gateway::ChatMessage;
use serde::{Deserialize, Serialize};

/// Top-level view state.
///
/// Home is initial. Chat and Model are entered by backend
/// classification or rehydration; Model is sticky — only an explicit
/// reset or selecting an artifact-less session leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Home,
    Chat,
    Model,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Home => "home",
            Mode::Chat => "chat",
            Mode::Model => "model",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "home" => Ok(Mode::Home),
            "chat" => Ok(Mode::Chat),
            "model" => Ok(Mode::Model),
            _ => Err(format!("Unknown mode: {}", s)),
        }
    }
}

/// The unit of conversation plus generated artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Backend-assigned id; stable once assigned
    pub id: Option<String>,
    /// Current view mode
    pub mode: Mode,
    /// Ordered chat transcript
    pub messages: Vec<ChatMessage>,
    /// Generated artifacts plus the displayed index
    pub carousel: Carousel,
    /// URL handed to the renderer. Re-derived from the carousel on every
    /// carousel mutation; only the optimistic template path sets it
    /// directly, and only while the carousel is empty.
    pub model_url: Option<String>,
    /// Transient input buffer
    pub prompt: String,
    /// Re-entrancy guard: true while a generate request is in flight
    pub loading: bool,
}

impl Session {
    /// A fresh Home session with nothing in it.
    pub fn fresh() -> Self {
        Self {
            id: None,
            mode: Mode::Home,
            messages: Vec::new(),
            carousel: Carousel::new(),
            model_url: None,
            prompt: String::new(),
            loading: false,
        }
    }

    /// Re-derive the displayed URL from the carousel. A no-op while the
    /// carousel is empty so an optimistic template URL is not clobbered.
    pub fn sync_model_url(&mut self) {
        if let Some(url) = self.carousel.current_url() {
            self.model_url = Some(url.to_string());
        }
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::bot(text));
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::fresh()
    }
}

/// A template from the home grid (a curated molecule card).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateItem {
    pub name: String,
    #[serde(rename = "modelUrl")]
    pub model_url: String,
    #[serde(rename = "thumbnail", default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use meku_carousel::ModelArtifact;

    #[test]
    fn test_fresh_session() {
        let session = Session::fresh();
        assert_eq!(session.mode, Mode::Home);
        assert!(session.messages.is_empty());
        assert!(session.carousel.is_empty());
        assert!(!session.loading);
    }

    #[test]
    fn test_mode_strings() {
        assert_eq!(Mode::Model.as_str(), "model");
        assert_eq!("chat".parse::<Mode>().unwrap(), Mode::Chat);
        assert!("garbage".parse::<Mode>().is_err());
    }

    #[test]
    fn test_sync_model_url_derives_from_carousel() {
        let mut session = Session::fresh();
        session.carousel.push(ModelArtifact::new("Water", "/m/0.glb"));
        session.sync_model_url();
        assert_eq!(session.model_url.as_deref(), Some("/m/0.glb"));
    }

    #[test]
    fn test_sync_model_url_keeps_template_url_when_empty() {
        let mut session = Session::fresh();
        session.model_url = Some("/templates/dna.glb".to_string());
        session.sync_model_url();
        assert_eq!(session.model_url.as_deref(), Some("/templates/dna.glb"));
    }
}
