//! Append-only conversation transcript
//!
//! The transcript is the only shared mutable state in the system. Both
//! messages of a submission are appended under one write lock, so a reader
//! can never observe the user message without its paired bot response.

use parking_lot::RwLock;
use toxchat_core::{Message, Verdict};

/// Fixed acknowledgement appended for messages with a clean verdict
pub const NO_TOXICITY_REPLY: &str = "No toxicity detected";

struct TranscriptInner {
    messages: Vec<Message>,
    next_id: u64,
}

/// The ordered conversation log
pub struct Transcript {
    inner: RwLock<TranscriptInner>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(TranscriptInner {
                messages: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Create a transcript pre-populated with the demonstration exchange
    pub fn seeded() -> Self {
        let transcript = Self::new();
        {
            let mut inner = transcript.inner.write();
            let seed = [
                Message::bot(1, "Hello!"),
                Message::user(2, "What's up?"),
                Message::bot(3, "Hello!"),
            ];
            inner.next_id = seed.len() as u64 + 1;
            inner.messages.extend(seed);
        }
        transcript
    }

    /// Apply a verdict: append the user message and its paired bot response
    /// as one atomic update, assigning consecutive ids.
    ///
    /// A submission that failed before a verdict was derived never reaches
    /// this point, so a failed classification leaves the transcript
    /// untouched.
    pub fn apply(&self, user_text: &str, verdict: &Verdict) -> [Message; 2] {
        let reply = bot_reply(verdict);

        let mut inner = self.inner.write();
        let user = Message::user(inner.next_id, user_text);
        let bot = Message::bot(inner.next_id + 1, reply);
        inner.next_id += 2;
        inner.messages.push(user.clone());
        inner.messages.push(bot.clone());

        [user, bot]
    }

    /// Snapshot of all messages in order
    pub fn messages(&self) -> Vec<Message> {
        self.inner.read().messages.clone()
    }

    /// Number of messages in the transcript
    pub fn len(&self) -> usize {
        self.inner.read().messages.len()
    }

    /// Whether the transcript holds no messages
    pub fn is_empty(&self) -> bool {
        self.inner.read().messages.is_empty()
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

fn bot_reply(verdict: &Verdict) -> String {
    match verdict.primary_evidence() {
        Some(evidence) if verdict.is_toxic => {
            format!("{} {}%", evidence.label, evidence.confidence_percent)
        }
        _ => NO_TOXICITY_REPLY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toxchat_core::{Evidence, Speaker};

    fn clean_verdict() -> Verdict {
        Verdict {
            is_toxic: false,
            evidence: Vec::new(),
        }
    }

    fn toxic_verdict(label: &str, confidence_percent: u8) -> Verdict {
        Verdict {
            is_toxic: true,
            evidence: vec![Evidence {
                label: label.to_string(),
                confidence_percent,
            }],
        }
    }

    #[test]
    fn seeded_transcript_matches_the_demonstration_exchange() {
        let transcript = Transcript::seeded();
        let messages = transcript.messages();

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].speaker, Speaker::Bot);
        assert_eq!(messages[1].speaker, Speaker::User);
        assert_eq!(messages[1].text, "What's up?");
    }

    #[test]
    fn apply_appends_user_then_bot() {
        let transcript = Transcript::new();
        let [user, bot] = transcript.apply("Hello", &clean_verdict());

        assert_eq!(user.speaker, Speaker::User);
        assert_eq!(user.text, "Hello");
        assert_eq!(bot.speaker, Speaker::Bot);
        assert_eq!(bot.text, NO_TOXICITY_REPLY);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn toxic_reply_names_the_first_evidence_label() {
        let transcript = Transcript::new();
        let [_, bot] = transcript.apply("I hate you", &toxic_verdict("toxicity", 97));

        assert_eq!(bot.text, "toxicity 97%");
    }

    #[test]
    fn ids_are_consecutive_within_a_submission() {
        let transcript = Transcript::seeded();
        let [user, bot] = transcript.apply("Hello", &clean_verdict());

        assert_eq!(bot.id, user.id + 1);
    }

    #[test]
    fn ids_stay_unique_across_submissions() {
        let transcript = Transcript::seeded();
        transcript.apply("one", &clean_verdict());
        transcript.apply("two", &toxic_verdict("insult", 92));

        let messages = transcript.messages();
        let mut ids: Vec<u64> = messages.iter().map(|m| m.id).collect();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);

        // Strictly increasing append order.
        assert!(messages.windows(2).all(|w| w[0].id < w[1].id));
    }
}
