//! Workspace coordination
//!
//! The composition root: wires the database, session store, split
//! layout and the external renderer together. All state lives on the
//! Rust side; the UI layer is a stateless projection of it.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

use meku_gateway::{Gateway, HttpGateway, SessionSummary};
use meku_layout::LayoutController;
use meku_session::{Mode, Session, SessionStore, TemplateItem};
use meku_storage::{Database, SnapshotStore};

use crate::config::Config;
use crate::error::CoreError;
use crate::folders::FolderStore;
use crate::renderer::ModelRenderer;
use crate::Result;

pub struct Workspace<G> {
    config: Config,
    db: Database,
    sessions: SessionStore<G>,
    folders: FolderStore,
    layout: Arc<RwLock<LayoutController>>,
    renderer: Arc<RwLock<Option<Arc<dyn ModelRenderer>>>>,
}

impl Workspace<HttpGateway> {
    /// Open a workspace against the real backend.
    pub fn new(config: Config) -> Result<Self> {
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;
        let gateway = HttpGateway::new(&config.api_base)?;

        Ok(Self::with_gateway(config, db, gateway))
    }
}

impl<G: Gateway> Workspace<G> {
    pub fn with_gateway(config: Config, db: Database, gateway: G) -> Self {
        let sessions = SessionStore::new(gateway, SnapshotStore::new(db.clone()), config.user_id);
        let folders = FolderStore::new(db.clone());

        Self {
            config,
            db,
            sessions,
            folders,
            layout: Arc::new(RwLock::new(LayoutController::new())),
            renderer: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_renderer(&self, renderer: Arc<dyn ModelRenderer>) {
        *self.renderer.write() = Some(renderer);
    }

    /// Rehydrate persisted state and bring the layout and renderer in
    /// step with it.
    pub async fn initialize(&self) -> Result<()> {
        let before = self.sessions.current();
        self.sessions.initialize().await?;
        self.reconcile(&before);

        tracing::info!("Workspace initialized");

        Ok(())
    }

    // === Session operations ===

    pub fn session(&self) -> Session {
        self.sessions.current()
    }

    pub fn store(&self) -> &SessionStore<G> {
        &self.sessions
    }

    pub fn set_prompt(&self, text: impl Into<String>) {
        self.sessions.set_prompt(text);
    }

    pub async fn submit_prompt(&self, text: &str) {
        let before = self.sessions.current();
        self.sessions.submit_prompt(text).await;
        self.reconcile(&before);
    }

    pub async fn load_session(&self, id: &str) {
        let before = self.sessions.current();
        self.sessions.load_session(id).await;
        self.reconcile(&before);
    }

    pub async fn select_session(&self, summary: &SessionSummary) {
        self.load_session(&summary.id).await;
    }

    pub async fn select_template(&self, item: &TemplateItem) {
        let before = self.sessions.current();
        self.sessions.select_template(item).await;
        self.reconcile(&before);
    }

    pub fn back_to_home(&self) {
        self.sessions.back_to_home();
    }

    pub fn select_model_index(&self, index: usize) {
        let before = self.sessions.current();
        self.sessions.select_model_index(index);
        self.reconcile(&before);
    }

    pub fn next_model(&self) {
        let before = self.sessions.current();
        self.sessions.next_model();
        self.reconcile(&before);
    }

    pub fn prev_model(&self) {
        let before = self.sessions.current();
        self.sessions.prev_model();
        self.reconcile(&before);
    }

    /// Bring the layout and the renderer in step with a session commit.
    fn reconcile(&self, before: &Session) {
        let session = self.sessions.current();

        // A fresh model view always starts from the default open split.
        if session.mode == Mode::Model && before.mode != Mode::Model {
            self.layout.write().reset_open();
        }

        if session.mode == Mode::Model && session.model_url != before.model_url {
            if let Some(url) = session.model_url.as_deref() {
                let atom_data = session
                    .carousel
                    .current()
                    .map(|m| m.atom_data.clone())
                    .unwrap_or_default();

                if let Some(renderer) = self.renderer.read().as_ref() {
                    tracing::debug!(model_url = %url, "Dispatching model to renderer");
                    renderer.render(url, &atom_data);
                }
            }
        }
    }

    // === Layout operations ===

    pub fn layout_sizes(&self) -> [f32; 2] {
        self.layout.read().sizes()
    }

    pub fn panel_collapsed(&self) -> bool {
        self.layout.read().collapsed()
    }

    pub fn set_container_width(&self, width_px: f32) {
        self.layout.write().set_container_width(width_px);
    }

    pub fn on_drag_update(&self, sizes: [f32; 2], now: Instant) {
        self.layout.write().on_drag_update(sizes, now);
    }

    pub fn on_drag_end(&self, sizes: [f32; 2], now: Instant) {
        self.layout.write().on_drag_end(sizes, now);
    }

    pub fn collapse_panel(&self, now: Instant) {
        self.layout.write().collapse(now);
    }

    pub fn expand_panel(&self, now: Instant) {
        self.layout.write().expand(now);
    }

    /// Advance the layout clock. Returns true while an animation is
    /// still running; due reflow notifications go to the renderer.
    pub fn tick(&self, now: Instant) -> bool {
        let (animating, reflow) = {
            let mut layout = self.layout.write();
            let animating = layout.tick(now);
            (animating, layout.take_reflow(now))
        };

        if reflow {
            if let Some(renderer) = self.renderer.read().as_ref() {
                renderer.request_resize();
            }
        }

        animating
    }

    // === Sidebar operations ===

    pub async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        Ok(self
            .sessions
            .gateway()
            .list_sessions(self.config.user_id)
            .await?)
    }

    pub async fn delete_session(&self, id: &str) -> Result<()> {
        self.sessions.gateway().delete_session(id).await?;
        self.folders.forget_session(id)?;

        // Deleting the open session falls back to home.
        if self.sessions.current().id.as_deref() == Some(id) {
            self.sessions.back_to_home();
        }

        Ok(())
    }

    pub async fn toggle_pin(&self, id: &str) -> Result<()> {
        Ok(self.sessions.gateway().toggle_pin(id).await?)
    }

    pub fn folders(&self) -> &FolderStore {
        &self.folders
    }

    // === Config ===

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl<G> Clone for Workspace<G> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            sessions: self.sessions.clone(),
            folders: self.folders.clone(),
            layout: Arc::clone(&self.layout),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

// Implement std::io::Error conversion for fs operations
impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meku_gateway::{GatewayError, GenerateResponse, ModelChatResponse, RemoteSession};
    use meku_layout::{ANIMATION_DURATION, DEFAULT_OPEN_SIZES, REFLOW_DELAY};
    use parking_lot::Mutex;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct ScriptedGateway {
        generate_responses: Mutex<Vec<meku_gateway::Result<GenerateResponse>>>,
        deleted: Mutex<Vec<String>>,
    }

    impl Gateway for ScriptedGateway {
        async fn get_session(&self, id: &str) -> meku_gateway::Result<RemoteSession> {
            Err(GatewayError::NotFound(id.to_string()))
        }

        async fn generate(
            &self,
            _prompt: &str,
            _user_id: i64,
            _session_id: Option<&str>,
        ) -> meku_gateway::Result<GenerateResponse> {
            self.generate_responses
                .lock()
                .pop()
                .unwrap_or_else(|| Err(GatewayError::Network("no scripted response".into())))
        }

        async fn model_chat(&self, name: &str) -> meku_gateway::Result<ModelChatResponse> {
            Err(GatewayError::NotFound(name.to_string()))
        }

        async fn list_sessions(&self, _user_id: i64) -> meku_gateway::Result<Vec<SessionSummary>> {
            Ok(Vec::new())
        }

        async fn delete_session(&self, id: &str) -> meku_gateway::Result<()> {
            self.deleted.lock().push(id.to_string());
            Ok(())
        }

        async fn toggle_pin(&self, _id: &str) -> meku_gateway::Result<()> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        rendered: Mutex<Vec<String>>,
        resizes: AtomicUsize,
    }

    impl ModelRenderer for RecordingRenderer {
        fn render(&self, model_url: &str, _atom_data: &[serde_json::Value]) {
            self.rendered.lock().push(model_url.to_string());
        }

        fn request_resize(&self) {
            self.resizes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn test_config() -> Config {
        Config {
            api_base: "http://127.0.0.1:8000".to_string(),
            database_path: PathBuf::from(":memory:"),
            user_id: 1,
        }
    }

    fn workspace(gateway: ScriptedGateway) -> Workspace<ScriptedGateway> {
        let db = Database::open_in_memory().unwrap();
        Workspace::with_gateway(test_config(), db, gateway)
    }

    fn model_response(url: &str, title: &str, chat_id: &str) -> GenerateResponse {
        serde_json::from_value(serde_json::json!({
            "mode": "model",
            "response": format!("Here is {}.", title),
            "chat_id": chat_id,
            "model_url": url,
            "title": title,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_entering_model_mode_resets_layout_and_renders() {
        let gateway = ScriptedGateway::default();
        gateway
            .generate_responses
            .lock()
            .push(Ok(model_response("/m/1.glb", "Caffeine", "c1")));
        let workspace = workspace(gateway);

        let renderer = Arc::new(RecordingRenderer::default());
        workspace.set_renderer(renderer.clone());

        // Leave the layout collapsed from an earlier session
        let t0 = Instant::now();
        workspace.set_container_width(1000.0);
        workspace.on_drag_end([3.0, 97.0], t0);
        assert!(workspace.panel_collapsed());

        workspace.submit_prompt("draw caffeine").await;

        assert_eq!(workspace.session().mode, Mode::Model);
        assert!(!workspace.panel_collapsed());
        assert_eq!(workspace.layout_sizes(), DEFAULT_OPEN_SIZES);
        assert_eq!(renderer.rendered.lock().as_slice(), ["/m/1.glb"]);
    }

    #[tokio::test]
    async fn test_carousel_navigation_re_renders() {
        let gateway = ScriptedGateway::default();
        {
            let mut responses = gateway.generate_responses.lock();
            responses.push(Ok(model_response("/m/2.glb", "Glucose", "c1")));
            responses.push(Ok(model_response("/m/1.glb", "Caffeine", "c1")));
        }
        let workspace = workspace(gateway);
        let renderer = Arc::new(RecordingRenderer::default());
        workspace.set_renderer(renderer.clone());

        workspace.submit_prompt("draw caffeine").await;
        workspace.submit_prompt("now glucose").await;
        workspace.prev_model();

        assert_eq!(
            renderer.rendered.lock().as_slice(),
            ["/m/1.glb", "/m/2.glb", "/m/1.glb"]
        );
    }

    #[tokio::test]
    async fn test_tick_dispatches_reflow_to_renderer() {
        let workspace = workspace(ScriptedGateway::default());
        let renderer = Arc::new(RecordingRenderer::default());
        workspace.set_renderer(renderer.clone());

        let t0 = Instant::now();
        workspace.collapse_panel(t0);

        // Animation completes, reflow is scheduled but not yet due
        assert!(!workspace.tick(t0 + ANIMATION_DURATION + Duration::from_millis(1)));
        assert_eq!(renderer.resizes.load(Ordering::SeqCst), 0);

        workspace.tick(t0 + ANIMATION_DURATION + REFLOW_DELAY + Duration::from_millis(1));
        assert_eq!(renderer.resizes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_deleting_open_session_returns_home() {
        let gateway = ScriptedGateway::default();
        gateway
            .generate_responses
            .lock()
            .push(Ok(model_response("/m/1.glb", "Caffeine", "c1")));
        let workspace = workspace(gateway);

        workspace.submit_prompt("draw caffeine").await;
        assert_eq!(workspace.session().id.as_deref(), Some("c1"));

        workspace.delete_session("c1").await.unwrap();

        assert_eq!(workspace.session().mode, Mode::Home);
        assert_eq!(
            workspace.store().gateway().deleted.lock().as_slice(),
            ["c1"]
        );
    }

    #[tokio::test]
    async fn test_deleting_other_session_keeps_state() {
        let gateway = ScriptedGateway::default();
        gateway
            .generate_responses
            .lock()
            .push(Ok(model_response("/m/1.glb", "Caffeine", "c1")));
        let workspace = workspace(gateway);

        workspace.submit_prompt("draw caffeine").await;
        workspace.delete_session("other").await.unwrap();

        assert_eq!(workspace.session().id.as_deref(), Some("c1"));
        assert_eq!(workspace.session().mode, Mode::Model);
    }
}
