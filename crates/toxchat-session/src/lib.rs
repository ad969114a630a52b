//! toxchat Session
//!
//! The core of the pipeline: the classification orchestrator, which turns
//! one submission at a time into a verdict against the loaded model, and
//! the append-only transcript it drives.

pub mod orchestrator;
pub mod transcript;

pub use orchestrator::{ChatSession, SubmissionOutcome};
pub use transcript::{Transcript, NO_TOXICITY_REPLY};
