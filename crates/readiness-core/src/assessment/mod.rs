//! The multi-section readiness assessment: static questionnaire, form state
//! with validation and progress, debounced draft autosave, and submission.

pub mod draft;
pub mod form;
pub mod sections;
pub mod submit;

pub use draft::{Autosave, Draft};
pub use form::AssessmentForm;
pub use sections::{
    find_section, section, sections, AnswerOption, Question, QuestionKind, Section,
};
pub use submit::{LocalSubmissionService, SubmissionRecord, SubmissionResult, SubmissionService};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single answer. Choice and text questions store a string, multi-choice
/// questions a list of option values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Multi(Vec<String>),
}

impl Answer {
    /// Blank strings and lists without a non-blank value count as unanswered.
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(s) => s.trim().is_empty(),
            Answer::Multi(values) => values.iter().all(|v| v.trim().is_empty()),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Answer::Text(s) => f.write_str(s),
            Answer::Multi(values) => f.write_str(&values.join(", ")),
        }
    }
}

/// Answers keyed by section id, then question id.
pub type FormData = BTreeMap<String, BTreeMap<String, Answer>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub answered: usize,
    pub total: usize,
    pub percentage: u8,
}

impl Progress {
    pub fn new(answered: usize, total: usize) -> Self {
        let percentage = if total == 0 {
            0
        } else {
            (answered.min(total) * 100 / total) as u8
        };
        Self {
            answered,
            total,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_untagged_serde() {
        let text: Answer = serde_json::from_str("\"good\"").unwrap();
        assert_eq!(text, Answer::Text("good".to_string()));
        let multi: Answer = serde_json::from_str("[\"crm\",\"erp\"]").unwrap();
        assert_eq!(multi, Answer::Multi(vec!["crm".to_string(), "erp".to_string()]));
        assert_eq!(serde_json::to_string(&multi).unwrap(), "[\"crm\",\"erp\"]");
    }

    #[test]
    fn empty_answers() {
        assert!(Answer::Text("  ".to_string()).is_empty());
        assert!(Answer::Multi(vec![]).is_empty());
        assert!(Answer::Multi(vec![" ".to_string()]).is_empty());
        assert!(!Answer::Multi(vec!["crm".to_string()]).is_empty());
    }

    #[test]
    fn progress_floors_percentage() {
        assert_eq!(Progress::new(1, 3).percentage, 33);
        assert_eq!(Progress::new(2, 3).percentage, 66);
        assert_eq!(Progress::new(3, 3).percentage, 100);
        assert_eq!(Progress::new(0, 0).percentage, 0);
    }
}
