//! Wire types for the backend contract

use meku_carousel::ModelArtifact;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

/// `GET /api/chat/{id}/` — a full remote session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteSession {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub models: Vec<ModelArtifact>,
}

/// How the backend classified a generate request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Chat,
    Model,
    /// Prompt rejected by the backend; presented like a chat reply.
    #[serde(other)]
    Invalid,
}

/// `POST /api/generate-model/` response.
///
/// When `models` is present it supersedes `model_url`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub mode: ResponseMode,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub model_url: Option<String>,
    #[serde(default)]
    pub models: Option<Vec<ModelArtifact>>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// `GET /api/model-chat/?model_name=` response (template selection).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelChatResponse {
    #[serde(default)]
    pub chat_id: Option<String>,
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
    #[serde(default)]
    pub models: Option<Vec<ModelArtifact>>,
}

/// One sidebar entry from `GET /api/sessions/{user_id}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub pinned: bool,
}
