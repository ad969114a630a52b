//! Core types for toxchat

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The local participant
    User,
    /// The automated responder
    Bot,
}

/// A single message in the conversation transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique, monotonically assigned id
    pub id: u64,

    /// Who produced the message
    pub speaker: Speaker,

    /// Message text
    pub text: String,

    /// When the message was appended
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(id: u64, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Create a user message
    pub fn user(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, Speaker::User, text)
    }

    /// Create a bot message
    pub fn bot(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, Speaker::Bot, text)
    }
}

/// Per-input result for one label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelResult {
    /// Whether the label matched. None when the backend cannot confidently
    /// decide (neither class probability crosses the threshold).
    #[serde(rename = "match")]
    pub matched: Option<bool>,

    /// Class probabilities as `[p_negative, p_positive]`
    pub probabilities: [f32; 2],
}

impl LabelResult {
    /// Create a new label result
    pub fn new(matched: Option<bool>, probabilities: [f32; 2]) -> Self {
        Self {
            matched,
            probabilities,
        }
    }

    /// Probability of the positive (toxic) class
    pub fn positive_probability(&self) -> f32 {
        self.probabilities[1]
    }

    /// Whether this result is a confident positive match
    pub fn is_match(&self) -> bool {
        self.matched == Some(true)
    }
}

/// Raw classifier output for one label across a batch of inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// The toxicity label this prediction belongs to
    pub label: String,

    /// One result per input string in the classified batch
    pub results: Vec<LabelResult>,
}

impl Prediction {
    /// Create a prediction with a single result (batch of one)
    pub fn single(label: impl Into<String>, matched: Option<bool>, probabilities: [f32; 2]) -> Self {
        Self {
            label: label.into(),
            results: vec![LabelResult::new(matched, probabilities)],
        }
    }

    /// Result for the first (and in this system, only) input of the batch
    pub fn first_result(&self) -> Option<&LabelResult> {
        self.results.first()
    }
}
