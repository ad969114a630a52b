//! Lexicon-based classifier backend
//!
//! Deterministic Aho-Corasick keyword scoring per label. Confidence grows
//! with the number of distinct hits and stays bounded; the lexicon approach
//! cannot justify certainty.

use crate::backend::{LoadOptions, ModelHandle, ModelLoader, ToxicityModel};
use aho_corasick::AhoCorasick;
use async_trait::async_trait;
use std::sync::Arc;
use toxchat_core::labels::{DEFAULT_LABELS, SUMMARY_LABEL};
use toxchat_core::{Error, LabelResult, Prediction, Result};

const IDENTITY_ATTACK_TERMS: &[&str] = &[
    "go back to your country",
    "your kind",
    "you people are",
    "subhuman",
];

const INSULT_TERMS: &[&str] = &[
    "idiot", "stupid", "dumb", "moron", "loser", "pathetic", "clown",
];

const OBSCENE_TERMS: &[&str] = &[
    "fuck", "shit", "asshole", "bitch", "bastard", "damn",
];

const SEVERE_TOXICITY_TERMS: &[&str] = &[
    "kill yourself",
    "rot in hell",
    "die in a fire",
    "nobody would miss you",
];

const SEXUAL_EXPLICIT_TERMS: &[&str] = &["porn", "nudes", "explicit pics"];

const THREAT_TERMS: &[&str] = &[
    "i will kill you",
    "i will hurt you",
    "i will find you",
    "watch your back",
    "you will regret this",
];

// Terms that flag the summary label without belonging to a narrower one.
const GENERAL_TOXICITY_TERMS: &[&str] = &[
    "hate", "worthless", "disgusting", "garbage", "trash", "shut up",
];

fn label_terms(label: &str) -> &'static [&'static str] {
    match label {
        "identity_attack" => IDENTITY_ATTACK_TERMS,
        "insult" => INSULT_TERMS,
        "obscene" => OBSCENE_TERMS,
        "severe_toxicity" => SEVERE_TOXICITY_TERMS,
        "sexual_explicit" => SEXUAL_EXPLICIT_TERMS,
        "threat" => THREAT_TERMS,
        _ => GENERAL_TOXICITY_TERMS,
    }
}

// The summary label matches whenever any narrower label would, so a flagged
// message always carries the overall decision.
fn summary_terms() -> Vec<&'static str> {
    DEFAULT_LABELS
        .iter()
        .filter(|label| **label != SUMMARY_LABEL)
        .flat_map(|label| label_terms(label).iter().copied())
        .chain(GENERAL_TOXICITY_TERMS.iter().copied())
        .collect()
}

/// Loader for the in-process lexicon backend
#[derive(Debug, Default)]
pub struct LexiconLoader;

impl LexiconLoader {
    /// Create a new lexicon loader
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ModelLoader for LexiconLoader {
    async fn load(&self, options: &LoadOptions) -> Result<ModelHandle> {
        let requested: Vec<&str> = if options.labels.is_empty() {
            DEFAULT_LABELS.to_vec()
        } else {
            for label in &options.labels {
                if !toxchat_core::labels::is_known(label) {
                    return Err(Error::config(format!("unknown toxicity label {label:?}")));
                }
            }
            // Preserve model order regardless of request order.
            DEFAULT_LABELS
                .iter()
                .copied()
                .filter(|label| options.labels.iter().any(|l| l == label))
                .collect()
        };

        let mut automata = Vec::with_capacity(requested.len());
        for label in requested {
            let terms: Vec<&str> = if label == SUMMARY_LABEL {
                summary_terms()
            } else {
                label_terms(label).to_vec()
            };

            let automaton = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .build(&terms)
                .map_err(|e| {
                    Error::model(format!("failed to build lexicon for {label:?}: {e}"))
                })?;

            automata.push((label.to_string(), automaton));
        }

        tracing::info!(
            labels = automata.len(),
            threshold = options.threshold,
            "lexicon model loaded"
        );

        Ok(Arc::new(LexiconModel {
            threshold: options.threshold,
            automata,
        }))
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}

/// Loaded lexicon model
pub struct LexiconModel {
    threshold: f32,
    automata: Vec<(String, AhoCorasick)>,
}

impl LexiconModel {
    fn score(&self, automaton: &AhoCorasick, text: &str) -> LabelResult {
        let hits = automaton.find_iter(text).count();

        let p_positive = if hits == 0 {
            0.02
        } else {
            (0.85 + 0.06 * hits as f32).min(0.98)
        };
        let p_negative = 1.0 - p_positive;

        let matched = if p_positive >= self.threshold {
            Some(true)
        } else if p_negative >= self.threshold {
            Some(false)
        } else {
            None
        };

        LabelResult::new(matched, [p_negative, p_positive])
    }
}

#[async_trait]
impl ToxicityModel for LexiconModel {
    async fn classify(&self, inputs: &[String]) -> Result<Vec<Prediction>> {
        Ok(self
            .automata
            .iter()
            .map(|(label, automaton)| Prediction {
                label: label.clone(),
                results: inputs
                    .iter()
                    .map(|input| self.score(automaton, input))
                    .collect(),
            })
            .collect())
    }
}
