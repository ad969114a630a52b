//! toxchat Core
//!
//! Shared types and utilities for the toxchat classification pipeline.
//!
//! This crate provides:
//! - The fixed toxicity label set and the summary-label convention
//! - Message, prediction, and verdict types
//! - Verdict derivation from raw multi-label predictions
//! - Error types and result handling

pub mod error;
pub mod labels;
pub mod types;
pub mod verdict;

pub use error::{Error, Result};
pub use types::{LabelResult, Message, Prediction, Speaker};
pub use verdict::{Evidence, Verdict};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::labels::{DEFAULT_LABELS, SUMMARY_LABEL};
    pub use crate::types::{LabelResult, Message, Prediction, Speaker};
    pub use crate::verdict::{Evidence, Verdict};
}
