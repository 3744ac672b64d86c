use crate::error::Result;
use crate::storage::{KeyValueStore, ASSESSMENT_DRAFT_KEY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::FormData;

/// Stored copy of in-progress answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub answers: FormData,
    pub saved_at: DateTime<Utc>,
}

impl Draft {
    /// Read the stored draft. Read errors and malformed drafts are logged and
    /// treated as no draft.
    pub fn load(store: &dyn KeyValueStore) -> Option<Draft> {
        let raw = match store.get(ASSESSMENT_DRAFT_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read assessment draft");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Some(draft),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed assessment draft");
                None
            }
        }
    }

    pub fn save(store: &dyn KeyValueStore, answers: &FormData) -> Result<()> {
        let draft = Draft {
            answers: answers.clone(),
            saved_at: Utc::now(),
        };
        store.set(ASSESSMENT_DRAFT_KEY, &serde_json::to_string(&draft)?)
    }

    pub fn clear(store: &dyn KeyValueStore) -> Result<bool> {
        store.remove(ASSESSMENT_DRAFT_KEY)
    }
}

/// Debounce timer: a save becomes due once `debounce` has passed since the
/// most recent change.
#[derive(Debug, Clone)]
pub struct Autosave {
    debounce: Duration,
    last_change: Option<Instant>,
}

impl Autosave {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            last_change: None,
        }
    }

    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    pub fn arm(&mut self, now: Instant) {
        self.last_change = Some(now);
    }

    pub fn disarm(&mut self) {
        self.last_change = None;
    }

    pub fn is_pending(&self) -> bool {
        self.last_change.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.last_change
            .is_some_and(|at| now.saturating_duration_since(at) >= self.debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::Answer;
    use crate::storage::MemoryStore;

    #[test]
    fn debounce_waits_for_quiet_period() {
        let start = Instant::now();
        let mut autosave = Autosave::new(Duration::from_millis(500));
        assert!(!autosave.is_due(start));
        autosave.arm(start);
        assert!(!autosave.is_due(start + Duration::from_millis(499)));
        assert!(autosave.is_due(start + Duration::from_millis(500)));

        // A later change pushes the deadline out.
        autosave.arm(start + Duration::from_millis(400));
        assert!(!autosave.is_due(start + Duration::from_millis(600)));
        assert!(autosave.is_due(start + Duration::from_millis(900)));

        autosave.disarm();
        assert!(!autosave.is_pending());
    }

    #[test]
    fn draft_roundtrip() {
        let store = MemoryStore::new();
        let mut answers = FormData::new();
        answers
            .entry("governance".to_string())
            .or_default()
            .insert("ai-policy".to_string(), Answer::Text("draft".to_string()));
        Draft::save(&store, &answers).unwrap();
        assert_eq!(Draft::load(&store).unwrap().answers, answers);
        assert!(Draft::clear(&store).unwrap());
        assert!(Draft::load(&store).is_none());
    }

    #[test]
    fn malformed_draft_is_ignored() {
        let store = MemoryStore::new();
        store.set(ASSESSMENT_DRAFT_KEY, "not json").unwrap();
        assert!(Draft::load(&store).is_none());
    }
}
