//! Session store
//!
//! The single owner of the Session entity. Every mutation goes through
//! the operations here; responses are applied atomically (a response
//! either lands in full or not at all) and the persisted snapshot is
//! mirrored after each commit.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use meku_carousel::ModelArtifact;
use meku_gateway::{ChatMessage, Gateway, GenerateResponse, ResponseMode, SessionSummary};
use meku_storage::{PersistedSnapshot, SnapshotStore};

use crate::session::{Mode, Session, TemplateItem};
use crate::Result;

const ERR_BACKEND: &str = "⚠️ Backend connection error.";
const ERR_LOAD: &str = "⚠️ Failed to load chat.";
const DEFAULT_REPLY: &str = "✅ Done";

pub struct SessionStore<G> {
    session: Arc<RwLock<Session>>,
    snapshots: SnapshotStore,
    gateway: Arc<G>,
    /// Bumped by every operation that replaces the session wholesale.
    /// A response committed against a stale epoch is discarded.
    epoch: Arc<AtomicU64>,
    /// Placeholder identity until real auth exists
    user_id: i64,
}

impl<G: Gateway> SessionStore<G> {
    pub fn new(gateway: G, snapshots: SnapshotStore, user_id: i64) -> Self {
        Self {
            session: Arc::new(RwLock::new(Session::fresh())),
            snapshots,
            gateway: Arc::new(gateway),
            epoch: Arc::new(AtomicU64::new(0)),
            user_id,
        }
    }

    /// A point-in-time copy of the session for rendering.
    pub fn current(&self) -> Session {
        self.session.read().clone()
    }

    /// The backend gateway, for operations outside the session itself
    /// (the sidebar session list).
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn set_prompt(&self, text: impl Into<String>) {
        self.session.write().prompt = text.into();
    }

    /// Rehydrate from the persisted snapshot. If a chat id was saved in
    /// Chat or Model mode, reload it from the backend; otherwise start
    /// fresh at Home. Gateway failures are recovered into chat state.
    pub async fn initialize(&self) -> Result<()> {
        let snapshot = self.snapshots.load()?;

        let resumable = matches!(snapshot.mode.as_deref(), Some("chat") | Some("model"));
        match snapshot.chat_id {
            Some(id) if resumable => {
                tracing::info!(session_id = %id, "Rehydrating saved session");
                self.load_session(&id).await;
            }
            _ => {
                tracing::info!("Starting fresh at home");
            }
        }

        Ok(())
    }

    /// Fetch a full remote session and replace local state wholesale.
    ///
    /// Carries an epoch token: if another wholesale operation committed
    /// while this fetch was in flight, the late response is discarded.
    pub async fn load_session(&self, id: &str) {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.gateway.get_session(id).await;

        let mut session = self.session.write();
        if self.epoch.load(Ordering::SeqCst) != token {
            tracing::debug!(session_id = %id, "Discarding stale session load");
            return;
        }

        match result {
            Ok(remote) => {
                let mut staged = Session::fresh();
                staged.id = Some(id.to_string());
                staged.messages = remote.messages;
                staged.carousel.replace(remote.models);
                if staged.carousel.is_empty() {
                    staged.mode = Mode::Chat;
                } else {
                    staged.mode = Mode::Model;
                    staged.sync_model_url();
                }

                tracing::info!(
                    session_id = %id,
                    messages = staged.messages.len(),
                    models = staged.carousel.len(),
                    mode = %staged.mode,
                    "Loaded session"
                );

                *session = staged;
            }
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "Failed to load session");
                session.mode = Mode::Chat;
                session.messages = vec![ChatMessage::bot(ERR_LOAD)];
                session.carousel.clear();
                session.model_url = None;
                session.loading = false;
            }
        }

        self.mirror(&session);
    }

    /// Sidebar entry point; same as loading the session by id.
    pub async fn select_session(&self, summary: &SessionSummary) {
        self.load_session(&summary.id).await;
    }

    /// Submit a prompt. Silent no-op while empty or while a submission
    /// is already in flight; otherwise the user message is appended
    /// optimistically and the response's effects are applied atomically.
    pub async fn submit_prompt(&self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }

        let (session_id, token) = {
            let mut session = self.session.write();
            if session.loading {
                tracing::debug!("Submission already in flight; ignoring prompt");
                return;
            }
            session.push_user(text);
            session.loading = true;
            session.prompt.clear();
            (session.id.clone(), self.epoch.load(Ordering::SeqCst))
        };

        let result = self
            .gateway
            .generate(text, self.user_id, session_id.as_deref())
            .await;

        let mut session = self.session.write();
        if self.epoch.load(Ordering::SeqCst) != token {
            // The session was replaced while we were in flight; the
            // replacement already reset the loading flag.
            tracing::debug!("Discarding generate response for abandoned session");
            return;
        }

        match result {
            Ok(response) => {
                let mut staged = session.clone();
                apply_generate(&mut staged, response);
                staged.loading = false;
                *session = staged;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Generate request failed");
                session.push_bot(ERR_BACKEND);
                session.loading = false;
            }
        }

        self.mirror(&session);
    }

    /// Select a home-grid template: optimistically show its model, then
    /// try to bind the backend session keyed by the template name. When
    /// no session exists the template description becomes the only chat
    /// message and no artifact list is fabricated.
    pub async fn select_template(&self, item: &TemplateItem) {
        let token = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut session = self.session.write();
            session.mode = Mode::Model;
            session.model_url = Some(item.model_url.clone());
            session.carousel.clear();
            self.mirror(&session);
        }

        match self.gateway.model_chat(&item.name).await {
            Ok(chat) if chat.chat_id.is_some() => {
                if let Some(id) = chat.chat_id {
                    self.load_session(&id).await;
                }
            }
            other => {
                if let Err(e) = other {
                    tracing::warn!(template = %item.name, error = %e, "No chat for template");
                }
                let mut session = self.session.write();
                if self.epoch.load(Ordering::SeqCst) != token {
                    return;
                }
                session.messages = vec![ChatMessage::bot(item.description.clone())];
                self.mirror(&session);
            }
        }
    }

    /// The only operation allowed to discard content outright.
    pub fn back_to_home(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        let mut session = self.session.write();
        *session = Session::fresh();

        if let Err(e) = self.snapshots.clear() {
            tracing::error!(error = %e, "Failed to clear persisted snapshot");
        }

        tracing::info!("Reset to home");
    }

    pub fn select_model_index(&self, index: usize) {
        let mut session = self.session.write();
        session.carousel.select(index);
        session.sync_model_url();
        self.mirror(&session);
    }

    pub fn next_model(&self) {
        let mut session = self.session.write();
        session.carousel.next();
        session.sync_model_url();
        self.mirror(&session);
    }

    pub fn prev_model(&self) {
        let mut session = self.session.write();
        session.carousel.prev();
        session.sync_model_url();
        self.mirror(&session);
    }

    /// Mirror the round-tripped fields into durable storage. Persistence
    /// is a passive mirror; failures are logged, never propagated.
    fn mirror(&self, session: &Session) {
        let snapshot = PersistedSnapshot {
            mode: Some(session.mode.as_str().to_string()),
            model_url: session.model_url.clone(),
            chat_id: session.id.clone(),
        };

        if let Err(e) = self.snapshots.save(&snapshot) {
            tracing::error!(error = %e, "Failed to mirror session snapshot");
        }
    }
}

impl<G> Clone for SessionStore<G> {
    fn clone(&self) -> Self {
        Self {
            session: Arc::clone(&self.session),
            snapshots: self.snapshots.clone(),
            gateway: Arc::clone(&self.gateway),
            epoch: Arc::clone(&self.epoch),
            user_id: self.user_id,
        }
    }
}

/// Apply one generate response to a staged session. The caller swaps
/// the staged copy in whole, so observers see all effects or none.
fn apply_generate(staged: &mut Session, response: GenerateResponse) {
    if let Some(chat_id) = response.chat_id {
        staged.id = Some(chat_id);
    }

    let reply = response
        .response
        .unwrap_or_else(|| DEFAULT_REPLY.to_string());

    match response.mode {
        ResponseMode::Model => {
            staged.mode = Mode::Model;

            if let Some(models) = response.models.filter(|m| !m.is_empty()) {
                // A full array supersedes model_url; show the newest.
                staged.carousel.replace_select_last(models);
            } else if let Some(model_url) = response.model_url {
                let name = response.title.unwrap_or_else(|| "Model".to_string());
                let mut artifact = ModelArtifact::new(name, model_url);
                artifact.thumbnail_url = response.thumbnail;
                staged.carousel.push(artifact);
            }
            staged.sync_model_url();

            // The reply lands after the model mutation, so a message
            // referencing new content is never visible before it exists.
            staged.push_bot(reply);
        }
        ResponseMode::Chat | ResponseMode::Invalid => {
            // Upgrade-only: an active Model session is never demoted.
            if staged.mode != Mode::Model {
                staged.mode = Mode::Chat;
            }
            staged.push_bot(reply);
        }
    }
}
