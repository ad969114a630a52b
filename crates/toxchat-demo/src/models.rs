//! Configuration, API payloads, and WebSocket events for the chat server

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use toxchat_classifier::DEFAULT_THRESHOLD;
use toxchat_core::{Message, Verdict};

/// Which classifier backend the server runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// In-process Aho-Corasick lexicon scoring (offline)
    Lexicon,
    /// External inference service over HTTP
    Remote,
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexicon" => Ok(Self::Lexicon),
            "remote" => Ok(Self::Remote),
            other => Err(format!("unknown backend {other:?} (expected lexicon or remote)")),
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexicon => write!(f, "lexicon"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Server configuration assembled from the CLI
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Classifier backend to load at startup
    pub backend: BackendKind,

    /// Base URL of the inference service (remote backend only)
    pub remote_url: Option<String>,

    /// Match-confidence threshold passed to the one-time model load
    pub threshold: f32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Lexicon,
            remote_url: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Readiness and busy flags exposed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Whether the one-time model load has completed successfully
    pub has_loaded: bool,

    /// Whether a classification is currently in flight
    pub is_classifying: bool,

    /// Load failure message, when loading failed permanently
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
}

/// A message-submission intent
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
}

/// Result of an accepted submission
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    /// The user message and its paired bot response, in append order
    pub messages: Vec<Message>,

    /// The derived verdict
    pub verdict: Verdict,

    /// Whether the client should clear its input field
    pub clear_input: bool,
}

/// Aggregated session counters
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatsSnapshot {
    /// Submissions that produced a verdict
    pub submissions: u64,

    /// Submissions flagged as toxic
    pub toxic: u64,

    /// Submissions with a clean verdict
    pub clean: u64,

    /// Submissions abandoned by a classification failure
    pub failures: u64,

    /// Submissions rejected before classification (empty, busy, not ready)
    pub rejected: u64,

    /// Current transcript length
    pub messages: usize,
}

/// Events broadcast to WebSocket clients
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ChatEvent {
    /// The model finished loading; submissions are enabled
    ModelReady,

    /// The model failed to load; submissions stay disabled
    ModelFailed { error: String },

    /// A submission was applied to the transcript
    MessagesAppended { messages: Vec<Message> },

    /// Counters changed
    StatsUpdate(StatsSnapshot),
}
