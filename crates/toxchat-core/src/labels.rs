//! The fixed toxicity label set
//!
//! The classifier evaluates every label independently per message. The
//! summary label carries the overall toxic/non-toxic decision and is always
//! resolved by name, never by position in the prediction set.

/// All labels the reference model evaluates, in model order.
pub const DEFAULT_LABELS: [&str; 7] = [
    "identity_attack",
    "insult",
    "obscene",
    "severe_toxicity",
    "sexual_explicit",
    "threat",
    "toxicity",
];

/// The label whose match flag decides the overall verdict for a message.
pub const SUMMARY_LABEL: &str = "toxicity";

/// Check whether a label belongs to the fixed label set.
pub fn is_known(label: &str) -> bool {
    DEFAULT_LABELS.contains(&label)
}
