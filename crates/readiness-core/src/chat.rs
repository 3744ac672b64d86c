//! Canned assistant for the dashboard playground. Replies are picked by
//! keyword and delivered after a random delay to feel conversational.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

const REPLIES: &[(&[&str], &str)] = &[
    (
        &["gdpr", "privacy", "personal data", "dpia"],
        "For anything touching personal data, start with a DPIA and check the lawful basis for processing. The GDPR page lists a checklist and a DPIA template.",
    ),
    (
        &["roi", "cost", "budget", "payback"],
        "Invoice processing and predictive maintenance typically return 200% or more. The ROI calculator in Resources helps you estimate payback for your own numbers.",
    ),
    (
        &["roadmap", "plan", "prioritise", "prioritize"],
        "Add promising use cases to your roadmap from the catalog, then drag them across the board as work starts. Begin with quick wins of low complexity.",
    ),
    (
        &["agent", "automation", "workflow"],
        "The agent and workflow templates come with integrations and steps ready to adapt. Email triage and invoice approval are good first candidates.",
    ),
    (
        &["training", "skills", "course", "learn"],
        "AI Fundamentals is a good starting point for everyone; Prompt Engineering suits the people who will use assistants daily.",
    ),
    (
        &["assessment", "score", "readiness", "maturity"],
        "The assessment scores five pillars from 0 to 5. Your report highlights the weakest pillars and what to do about them.",
    ),
    (
        &["hello", "hi", "hey"],
        "Hello! Ask me about use cases, your roadmap, GDPR or training and I will point you in the right direction.",
    ),
];

const FALLBACK: &str = "I can help with AI use cases, roadmap planning, GDPR questions and training. Could you tell me a bit more about what you are looking for?";

/// Pick a reply for `message` by case-insensitive keyword match.
pub fn reply_for(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    REPLIES
        .iter()
        .find(|(keywords, _)| {
            keywords.iter().any(|k| {
                if k.contains(' ') {
                    lowered.contains(k)
                } else {
                    words.contains(k)
                }
            })
        })
        .map(|(_, reply)| *reply)
        .unwrap_or(FALLBACK)
}

/// Uniform delay between `min_ms` and `max_ms` inclusive. The bounds may be
/// given in either order.
pub fn simulated_delay<R: Rng + ?Sized>(rng: &mut R, min_ms: u64, max_ms: u64) -> Duration {
    let (lo, hi) = if min_ms <= max_ms {
        (min_ms, max_ms)
    } else {
        (max_ms, min_ms)
    };
    Duration::from_millis(rng.gen_range(lo..=hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn keyword_replies() {
        assert!(reply_for("What about GDPR?").contains("DPIA"));
        assert!(reply_for("how do I build a ROADMAP").contains("roadmap"));
        assert!(reply_for("Is there a course for my team").contains("AI Fundamentals"));
    }

    #[test]
    fn keywords_match_whole_words() {
        // "this" contains "hi" but is not a greeting.
        assert_eq!(reply_for("this is unrelated"), FALLBACK);
    }

    #[test]
    fn unknown_message_gets_fallback() {
        assert_eq!(reply_for(""), FALLBACK);
        assert_eq!(reply_for("weather tomorrow?"), FALLBACK);
    }

    #[test]
    fn delay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let d = simulated_delay(&mut rng, 600, 1500);
            assert!(d >= Duration::from_millis(600) && d <= Duration::from_millis(1500));
        }
        assert_eq!(simulated_delay(&mut rng, 50, 50), Duration::from_millis(50));
        let swapped = simulated_delay(&mut rng, 20, 10);
        assert!(swapped >= Duration::from_millis(10) && swapped <= Duration::from_millis(20));
    }
}
