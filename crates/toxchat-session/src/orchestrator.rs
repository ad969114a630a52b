//! Classification orchestrator
//!
//! Accepts one message at a time, runs it through the loaded model as a
//! batch of one, derives the verdict, and hands it to the transcript.
//! Submissions are single-flight: while one classification is awaited, new
//! submissions are rejected rather than queued, mirroring a disabled input
//! affordance.

use crate::transcript::Transcript;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use toxchat_classifier::{ModelLifecycle, ToxicityModel as _};
use toxchat_core::{Error, Message, Result, Verdict};

/// Result of an accepted submission
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// The decision derived for the submitted message
    pub verdict: Verdict,

    /// The user message and its paired bot response, in append order
    pub appended: [Message; 2],

    /// Presentation hint: clear the input only for clean messages, so a
    /// flagged message stays visible for revision
    pub clear_input: bool,
}

/// Orchestrates submissions against the model lifecycle and transcript
pub struct ChatSession {
    lifecycle: Arc<ModelLifecycle>,
    transcript: Arc<Transcript>,
    classifying: AtomicBool,
}

// Clears the busy flag on every exit path, error paths included.
struct ClassifyingGuard<'a>(&'a AtomicBool);

impl Drop for ClassifyingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl ChatSession {
    /// Create a session over the given lifecycle and transcript
    pub fn new(lifecycle: Arc<ModelLifecycle>, transcript: Arc<Transcript>) -> Self {
        Self {
            lifecycle,
            transcript,
            classifying: AtomicBool::new(false),
        }
    }

    /// Whether a classification is currently in flight
    pub fn is_classifying(&self) -> bool {
        self.classifying.load(Ordering::SeqCst)
    }

    /// The transcript this session appends to
    pub fn transcript(&self) -> &Arc<Transcript> {
        &self.transcript
    }

    /// Submit one message: classify it and apply the verdict to the
    /// transcript.
    ///
    /// Any failure leaves the transcript unchanged and the busy flag
    /// cleared; the caller keeps the typed text and may resubmit.
    pub async fn submit(&self, text: &str) -> Result<SubmissionOutcome> {
        let model = self.lifecycle.model().ok_or(Error::ModelNotReady)?;

        if text.trim().is_empty() {
            return Err(Error::EmptyMessage);
        }

        if self
            .classifying
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::Busy);
        }
        let _guard = ClassifyingGuard(&self.classifying);

        tracing::debug!(chars = text.len(), "classifying submission");

        let predictions = model.classify(&[text.to_string()]).await.map_err(|e| {
            tracing::warn!(error = %e, "classification failed; transcript unchanged");
            e
        })?;

        let verdict = Verdict::from_predictions(&predictions)?;
        let appended = self.transcript.apply(text, &verdict);

        tracing::debug!(
            is_toxic = verdict.is_toxic,
            evidence = verdict.evidence.len(),
            "submission applied"
        );

        Ok(SubmissionOutcome {
            clear_input: !verdict.is_toxic,
            verdict,
            appended,
        })
    }
}
