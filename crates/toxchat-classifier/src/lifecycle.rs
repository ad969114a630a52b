//! One-shot model lifecycle
//!
//! Owns the single `load()` issued at system start. Loading failure is
//! permanent for the process lifetime; there is no unload or reload.

use crate::backend::{LoadOptions, ModelHandle, ModelLoader};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Lifecycle state of the classifier
#[derive(Clone)]
pub enum LifecycleState {
    /// Load not yet complete; submissions are disabled
    NotReady,
    /// Model loaded and available for classification
    Ready(ModelHandle),
    /// Load failed; submissions stay disabled for the process lifetime
    Failed(String),
}

/// Manages the one-time, idempotent load of the classifier
pub struct ModelLifecycle {
    loader: Arc<dyn ModelLoader>,
    options: LoadOptions,
    started: AtomicBool,
    state: RwLock<LifecycleState>,
}

impl ModelLifecycle {
    /// Create a lifecycle around the given loader
    pub fn new(loader: Arc<dyn ModelLoader>, options: LoadOptions) -> Self {
        Self {
            loader,
            options,
            started: AtomicBool::new(false),
            state: RwLock::new(LifecycleState::NotReady),
        }
    }

    /// Issue the load exactly once. Later calls return immediately without
    /// contacting the backend, whatever the outcome of the first call.
    pub async fn start(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!(backend = self.loader.name(), "loading toxicity model");

        match self.loader.load(&self.options).await {
            Ok(model) => {
                *self.state.write() = LifecycleState::Ready(model);
                tracing::info!(backend = self.loader.name(), "model ready");
            }
            Err(e) => {
                tracing::error!(backend = self.loader.name(), error = %e, "model load failed");
                *self.state.write() = LifecycleState::Failed(e.to_string());
            }
        }
    }

    /// Whether classification requests may be issued
    pub fn is_ready(&self) -> bool {
        matches!(&*self.state.read(), LifecycleState::Ready(_))
    }

    /// Handle to the loaded model, if ready
    pub fn model(&self) -> Option<ModelHandle> {
        match &*self.state.read() {
            LifecycleState::Ready(model) => Some(model.clone()),
            _ => None,
        }
    }

    /// The load failure message, if loading failed
    pub fn failure(&self) -> Option<String> {
        match &*self.state.read() {
            LifecycleState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ModelLoader, ToxicityModel};
    use async_trait::async_trait;
    use std::sync::atomic::AtomicU32;
    use toxchat_core::labels::DEFAULT_LABELS;
    use toxchat_core::{Error, Prediction, Result};

    struct StubModel;

    #[async_trait]
    impl ToxicityModel for StubModel {
        async fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
            Ok(DEFAULT_LABELS
                .iter()
                .map(|label| Prediction {
                    label: label.to_string(),
                    results: inputs
                        .iter()
                        .map(|_| toxchat_core::LabelResult::new(Some(false), [0.95, 0.05]))
                        .collect(),
                })
                .collect())
        }
    }

    struct CountingLoader {
        calls: AtomicU32,
        fail: bool,
    }

    impl CountingLoader {
        fn new(fail: bool) -> Self {
            Self {
                calls: AtomicU32::new(0),
                fail,
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::Relaxed)
        }
    }

    #[async_trait]
    impl ModelLoader for CountingLoader {
        async fn load(&self, _options: &LoadOptions) -> Result<ModelHandle> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if self.fail {
                Err(Error::model("simulated load failure"))
            } else {
                Ok(Arc::new(StubModel))
            }
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[tokio::test]
    async fn start_transitions_to_ready() {
        let loader = Arc::new(CountingLoader::new(false));
        let lifecycle = ModelLifecycle::new(loader, LoadOptions::default());

        assert!(!lifecycle.is_ready());
        lifecycle.start().await;
        assert!(lifecycle.is_ready());
        assert!(lifecycle.model().is_some());
        assert!(lifecycle.failure().is_none());
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let loader = Arc::new(CountingLoader::new(false));
        let lifecycle = ModelLifecycle::new(loader.clone(), LoadOptions::default());

        lifecycle.start().await;
        lifecycle.start().await;

        assert_eq!(loader.calls(), 1);
    }

    #[tokio::test]
    async fn load_failure_is_permanent() {
        let loader = Arc::new(CountingLoader::new(true));
        let lifecycle = ModelLifecycle::new(loader.clone(), LoadOptions::default());

        lifecycle.start().await;
        assert!(!lifecycle.is_ready());
        assert!(lifecycle.model().is_none());
        assert!(lifecycle.failure().unwrap().contains("simulated load failure"));

        // No retry on a later start call.
        lifecycle.start().await;
        assert_eq!(loader.calls(), 1);
        assert!(!lifecycle.is_ready());
    }
}
