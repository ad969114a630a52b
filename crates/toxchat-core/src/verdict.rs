//! Verdict derivation from raw multi-label predictions

use crate::error::{Error, Result};
use crate::labels::{DEFAULT_LABELS, SUMMARY_LABEL};
use crate::types::Prediction;
use serde::{Deserialize, Serialize};

/// One matched label with its confidence, in fixed label order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evidence {
    /// The matched toxicity label
    pub label: String,

    /// Positive-class probability rounded to a whole percentage
    pub confidence_percent: u8,
}

/// The decision derived from one classified message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// True iff the summary label reported a confident match
    pub is_toxic: bool,

    /// Every matched label in fixed label order.
    /// Non-empty whenever `is_toxic` is true.
    pub evidence: Vec<Evidence>,
}

impl Verdict {
    /// Derive a verdict from the prediction set of a batch-of-one classify
    /// call.
    ///
    /// The set must carry exactly one entry per label in the fixed label
    /// list, each with at least one per-input result; anything else is a
    /// contract violation fatal to the submission that produced it.
    pub fn from_predictions(predictions: &[Prediction]) -> Result<Self> {
        if predictions.len() != DEFAULT_LABELS.len() {
            return Err(Error::contract(format!(
                "expected {} label predictions, got {}",
                DEFAULT_LABELS.len(),
                predictions.len()
            )));
        }

        let mut evidence = Vec::new();

        // Walk the fixed label order so evidence ordering never depends on
        // how the backend happened to order its output.
        for label in DEFAULT_LABELS {
            let prediction = predictions
                .iter()
                .find(|p| p.label == label)
                .ok_or_else(|| Error::contract(format!("missing prediction for label {label:?}")))?;

            let result = prediction
                .first_result()
                .ok_or_else(|| Error::contract(format!("label {label:?} carries no results")))?;

            if result.is_match() {
                evidence.push(Evidence {
                    label: label.to_string(),
                    confidence_percent: (result.positive_probability() * 100.0).round() as u8,
                });
            }
        }

        // The summary label decides the overall verdict; when it matched it
        // is part of the evidence, so a toxic verdict never lacks evidence.
        let is_toxic = evidence.iter().any(|e| e.label == SUMMARY_LABEL);

        Ok(Self { is_toxic, evidence })
    }

    /// The strongest piece of evidence (first matched label in fixed order)
    pub fn primary_evidence(&self) -> Option<&Evidence> {
        self.evidence.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Prediction;

    fn predictions_with(matches: &[(&str, f32)]) -> Vec<Prediction> {
        DEFAULT_LABELS
            .iter()
            .map(|label| {
                match matches.iter().find(|(l, _)| l == label) {
                    Some((_, p)) => Prediction::single(*label, Some(true), [1.0 - p, *p]),
                    None => Prediction::single(*label, Some(false), [0.95, 0.05]),
                }
            })
            .collect()
    }

    #[test]
    fn clean_predictions_yield_non_toxic_verdict() {
        let verdict = Verdict::from_predictions(&predictions_with(&[])).unwrap();
        assert!(!verdict.is_toxic);
        assert!(verdict.evidence.is_empty());
    }

    #[test]
    fn summary_match_drives_the_decision() {
        let verdict =
            Verdict::from_predictions(&predictions_with(&[("toxicity", 0.97)])).unwrap();
        assert!(verdict.is_toxic);
        assert_eq!(
            verdict.primary_evidence(),
            Some(&Evidence {
                label: "toxicity".to_string(),
                confidence_percent: 97,
            })
        );
    }

    #[test]
    fn evidence_follows_fixed_label_order() {
        let verdict = Verdict::from_predictions(&predictions_with(&[
            ("toxicity", 0.93),
            ("insult", 0.96),
        ]))
        .unwrap();
        assert!(verdict.is_toxic);
        let labels: Vec<_> = verdict.evidence.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["insult", "toxicity"]);
    }

    #[test]
    fn matched_non_summary_label_alone_does_not_flag_the_message() {
        let verdict =
            Verdict::from_predictions(&predictions_with(&[("insult", 0.92)])).unwrap();
        assert!(!verdict.is_toxic);
        assert_eq!(verdict.evidence.len(), 1);
    }

    #[test]
    fn toxic_verdict_always_carries_evidence() {
        let verdict =
            Verdict::from_predictions(&predictions_with(&[("toxicity", 0.91)])).unwrap();
        assert!(verdict.is_toxic);
        assert!(!verdict.evidence.is_empty());
    }

    #[test]
    fn short_prediction_set_is_a_contract_violation() {
        let mut predictions = predictions_with(&[]);
        predictions.pop();
        let err = Verdict::from_predictions(&predictions).unwrap_err();
        assert!(matches!(err, Error::Contract(_)));
    }

    #[test]
    fn unexpected_label_set_is_a_contract_violation() {
        let mut predictions = predictions_with(&[]);
        predictions[6] = Prediction::single("sarcasm", Some(false), [0.9, 0.1]);
        let err = Verdict::from_predictions(&predictions).unwrap_err();
        assert!(matches!(err, Error::Contract(_)));
    }

    #[test]
    fn empty_results_are_a_contract_violation() {
        let mut predictions = predictions_with(&[]);
        predictions[0].results.clear();
        let err = Verdict::from_predictions(&predictions).unwrap_err();
        assert!(matches!(err, Error::Contract(_)));
    }

    #[test]
    fn undecided_summary_label_is_not_toxic() {
        let mut predictions = predictions_with(&[]);
        predictions[6] = Prediction::single("toxicity", None, [0.55, 0.45]);
        let verdict = Verdict::from_predictions(&predictions).unwrap();
        assert!(!verdict.is_toxic);
    }

    #[test]
    fn confidence_is_rounded_to_whole_percent() {
        let verdict =
            Verdict::from_predictions(&predictions_with(&[("toxicity", 0.914)])).unwrap();
        assert_eq!(verdict.evidence[0].confidence_percent, 91);
    }
}
