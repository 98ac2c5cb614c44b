//! Backend gateway trait and reqwest client

use reqwest::StatusCode;
use url::Url;

use crate::error::GatewayError;
use crate::types::{GenerateResponse, ModelChatResponse, RemoteSession, SessionSummary};
use crate::Result;
use meku_carousel::ModelArtifact;

/// The backend contract as seen by the session store.
///
/// Implementations must not cancel in-flight requests; staleness of a
/// late response is the caller's concern (epoch tokens).
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Fetch a full remote session.
    async fn get_session(&self, id: &str) -> Result<RemoteSession>;

    /// Submit a prompt for classification and generation.
    async fn generate(
        &self,
        prompt: &str,
        user_id: i64,
        session_id: Option<&str>,
    ) -> Result<GenerateResponse>;

    /// Look up (or create) the backend session bound to a template.
    async fn model_chat(&self, model_name: &str) -> Result<ModelChatResponse>;

    /// Sidebar: list the user's sessions.
    async fn list_sessions(&self, user_id: i64) -> Result<Vec<SessionSummary>>;

    /// Sidebar: delete a session.
    async fn delete_session(&self, id: &str) -> Result<()>;

    /// Sidebar: toggle the pinned flag of a session.
    async fn toggle_pin(&self, id: &str) -> Result<()>;
}

pub struct HttpGateway {
    base: Url,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base)?,
            client: reqwest::Client::new(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base.join(path)?)
    }

    /// Resolve a backend-relative asset path against the base URL.
    /// Already-absolute URLs pass through untouched.
    fn absolutize(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        self.base
            .join(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| path.to_string())
    }

    fn absolutize_artifacts(&self, models: &mut [ModelArtifact]) {
        for artifact in models {
            artifact.model_url = self.absolutize(&artifact.model_url);
            if let Some(thumb) = artifact.thumbnail_url.take() {
                artifact.thumbnail_url = Some(self.absolutize(&thumb));
            }
        }
    }

    fn check_status(url: &Url, status: StatusCode) -> Result<()> {
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "{} returned {}",
                url, status
            )));
        }
        Ok(())
    }
}

impl Gateway for HttpGateway {
    async fn get_session(&self, id: &str) -> Result<RemoteSession> {
        let url = self.endpoint(&format!("/api/chat/{}/", id))?;
        let response = self.client.get(url.clone()).send().await?;
        Self::check_status(&url, response.status())?;

        let mut session: RemoteSession = response.json().await?;
        self.absolutize_artifacts(&mut session.models);

        tracing::debug!(
            session_id = %id,
            messages = session.messages.len(),
            models = session.models.len(),
            "Fetched remote session"
        );

        Ok(session)
    }

    async fn generate(
        &self,
        prompt: &str,
        user_id: i64,
        session_id: Option<&str>,
    ) -> Result<GenerateResponse> {
        let url = self.endpoint("/api/generate-model/")?;
        let body = serde_json::json!({
            "prompt": prompt,
            "user_id": user_id,
            "chat_id": session_id,
        });

        let response = self.client.post(url.clone()).json(&body).send().await?;
        Self::check_status(&url, response.status())?;

        let mut generated: GenerateResponse = response.json().await?;
        if let Some(model_url) = generated.model_url.take() {
            generated.model_url = Some(self.absolutize(&model_url));
        }
        if let Some(thumbnail) = generated.thumbnail.take() {
            generated.thumbnail = Some(self.absolutize(&thumbnail));
        }
        if let Some(models) = generated.models.as_mut() {
            self.absolutize_artifacts(models);
        }

        Ok(generated)
    }

    async fn model_chat(&self, model_name: &str) -> Result<ModelChatResponse> {
        let url = self.endpoint("/api/model-chat/")?;
        let response = self
            .client
            .get(url.clone())
            .query(&[("model_name", model_name)])
            .send()
            .await?;
        Self::check_status(&url, response.status())?;

        let mut chat: ModelChatResponse = response.json().await?;
        if let Some(models) = chat.models.as_mut() {
            self.absolutize_artifacts(models);
        }

        Ok(chat)
    }

    async fn list_sessions(&self, user_id: i64) -> Result<Vec<SessionSummary>> {
        let url = self.endpoint(&format!("/api/sessions/{}/", user_id))?;
        let response = self.client.get(url.clone()).send().await?;
        Self::check_status(&url, response.status())?;

        Ok(response.json().await?)
    }

    async fn delete_session(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("/api/chat/{}/delete/", id))?;
        let response = self.client.delete(url.clone()).send().await?;
        Self::check_status(&url, response.status())?;

        tracing::info!(session_id = %id, "Deleted session");

        Ok(())
    }

    async fn toggle_pin(&self, id: &str) -> Result<()> {
        let url = self.endpoint(&format!("/api/session-pin/{}/", id))?;
        let response = self.client.post(url.clone()).send().await?;
        Self::check_status(&url, response.status())?;

        Ok(())
    }
}
