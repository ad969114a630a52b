//! Adapter traits and load options for classifier backends

use async_trait::async_trait;
use std::sync::Arc;
use toxchat_core::{Prediction, Result};

/// Match-confidence threshold used when none is configured
pub const DEFAULT_THRESHOLD: f32 = 0.9;

/// Opaque handle to a loaded classifier. Lives for the process lifetime;
/// never reloaded.
pub type ModelHandle = Arc<dyn ToxicityModel>;

/// Options passed to a backend when loading its model
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Minimum positive-class probability for a label to count as matched,
    /// in `[0, 1]`
    pub threshold: f32,

    /// Labels to evaluate. Empty means all default labels.
    pub labels: Vec<String>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            labels: Vec::new(),
        }
    }
}

impl LoadOptions {
    /// Set the match-confidence threshold
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Restrict evaluation to the given labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// A backend that can load the pretrained multi-label toxicity model
#[async_trait]
pub trait ModelLoader: Send + Sync {
    /// Load the model, returning a handle ready for classification
    async fn load(&self, options: &LoadOptions) -> Result<ModelHandle>;

    /// Get the backend name
    fn name(&self) -> &str;
}

/// A loaded classifier able to score a batch of input strings
#[async_trait]
pub trait ToxicityModel: Send + Sync {
    /// Classify the given inputs, returning one prediction per label in the
    /// fixed label set, each carrying one result per input
    async fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>>;
}
