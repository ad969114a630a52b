use crate::models::StatsSnapshot;
use parking_lot::RwLock;
use toxchat_core::Verdict;

/// Aggregates per-session submission counters
pub struct MetricsCollector {
    inner: RwLock<MetricsInner>,
}

#[derive(Default)]
struct MetricsInner {
    submissions: u64,
    toxic: u64,
    clean: u64,
    failures: u64,
    rejected: u64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MetricsInner::default()),
        }
    }

    /// Record a submission that produced a verdict
    pub fn record_verdict(&self, verdict: &Verdict) {
        let mut inner = self.inner.write();
        inner.submissions += 1;
        if verdict.is_toxic {
            inner.toxic += 1;
        } else {
            inner.clean += 1;
        }
    }

    /// Record a submission abandoned by a classification failure
    pub fn record_failure(&self) {
        self.inner.write().failures += 1;
    }

    /// Record a submission rejected before classification
    pub fn record_rejection(&self) {
        self.inner.write().rejected += 1;
    }

    /// Get a snapshot of the counters
    pub fn snapshot(&self, transcript_len: usize) -> StatsSnapshot {
        let inner = self.inner.read();
        StatsSnapshot {
            submissions: inner.submissions,
            toxic: inner.toxic,
            clean: inner.clean,
            failures: inner.failures,
            rejected: inner.rejected,
            messages: transcript_len,
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
