use crate::models::{BackendKind, ChatConfig};
use crate::state::{EventBus, MetricsCollector};
use std::sync::Arc;
use toxchat_classifier::{
    LexiconLoader, LoadOptions, ModelLifecycle, ModelLoader, RemoteLoader,
};
use toxchat_core::{Error, Result};
use toxchat_session::{ChatSession, Transcript};

/// Build the configured classifier loader
pub fn build_loader(config: &ChatConfig) -> Result<Arc<dyn ModelLoader>> {
    match config.backend {
        BackendKind::Lexicon => Ok(Arc::new(LexiconLoader::new())),
        BackendKind::Remote => {
            let url = config
                .remote_url
                .as_deref()
                .ok_or_else(|| Error::config("remote backend requires --remote-url"))?;
            Ok(Arc::new(RemoteLoader::new(url)?))
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct ChatAppState {
    /// One-shot model lifecycle; gates submissions until Ready
    pub lifecycle: Arc<ModelLifecycle>,

    /// The submission orchestrator
    pub session: Arc<ChatSession>,

    /// The conversation transcript
    pub transcript: Arc<Transcript>,

    /// Real-time event bus for WebSocket broadcasting
    pub event_bus: Arc<EventBus>,

    /// Session counters for the stats endpoint
    pub metrics: Arc<MetricsCollector>,
}

impl ChatAppState {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let loader = build_loader(config)?;
        let options = LoadOptions::default().with_threshold(config.threshold);
        let lifecycle = Arc::new(ModelLifecycle::new(loader, options));
        let transcript = Arc::new(Transcript::seeded());
        let session = Arc::new(ChatSession::new(lifecycle.clone(), transcript.clone()));

        Ok(Self {
            lifecycle,
            session,
            transcript,
            event_bus: Arc::new(EventBus::default()),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }
}
