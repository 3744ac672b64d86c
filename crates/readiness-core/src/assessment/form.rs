use crate::error::{ReadinessError, Result};
use crate::storage::KeyValueStore;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::draft::{Autosave, Draft};
use super::sections::{find_section, sections, Question, Section};
use super::submit::{SubmissionResult, SubmissionService};
use super::{Answer, FormData, Progress};

pub const REQUIRED_MESSAGE: &str = "This field is required";

/// State behind the assessment page: answers, per-question validation
/// errors and the pending autosave.
pub struct AssessmentForm {
    answers: FormData,
    errors: BTreeMap<String, String>,
    autosave: Autosave,
    storage: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for AssessmentForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentForm")
            .field("answers", &self.answers)
            .field("errors", &self.errors)
            .field("autosave", &self.autosave)
            .finish_non_exhaustive()
    }
}

impl AssessmentForm {
    pub fn new(storage: Arc<dyn KeyValueStore>, debounce: Duration) -> Self {
        Self {
            answers: FormData::new(),
            errors: BTreeMap::new(),
            autosave: Autosave::new(debounce),
            storage,
        }
    }

    /// Start from the stored draft, if there is a readable one. Answers to
    /// questions that no longer exist are dropped.
    pub fn restore(storage: Arc<dyn KeyValueStore>, debounce: Duration) -> Self {
        let mut form = Self::new(storage, debounce);
        if let Some(draft) = Draft::load(form.storage.as_ref()) {
            for (section_id, answers) in draft.answers {
                let Some((_, section)) = find_section(&section_id) else {
                    continue;
                };
                for (question_id, answer) in answers {
                    let known = section
                        .question(&question_id)
                        .is_some_and(|q| q.check(&answer).is_ok());
                    if known && !answer.is_empty() {
                        form.answers
                            .entry(section_id.clone())
                            .or_default()
                            .insert(question_id, answer);
                    }
                }
            }
            tracing::debug!(saved_at = %draft.saved_at, "restored assessment draft");
        }
        form
    }

    pub fn answers(&self) -> &FormData {
        &self.answers
    }

    pub fn answer(&self, section_id: &str, question_id: &str) -> Option<&Answer> {
        self.answers.get(section_id)?.get(question_id)
    }

    /// Validation errors keyed by question id.
    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn autosave_pending(&self) -> bool {
        self.autosave.is_pending()
    }

    pub fn debounce(&self) -> Duration {
        self.autosave.debounce()
    }

    fn is_answered(&self, section: &Section, question: &Question) -> bool {
        self.answer(&section.id, &question.id)
            .is_some_and(|a| !a.is_empty())
    }

    /// Set one answer. An empty answer clears the question.
    pub fn update_answer(
        &mut self,
        section_id: &str,
        question_id: &str,
        answer: Answer,
        now: Instant,
    ) -> Result<()> {
        let (_, section) = find_section(section_id)
            .ok_or_else(|| ReadinessError::SectionNotFound(section_id.to_string()))?;
        let question =
            section
                .question(question_id)
                .ok_or_else(|| ReadinessError::QuestionNotFound {
                    section: section_id.to_string(),
                    question: question_id.to_string(),
                })?;
        question
            .check(&answer)
            .map_err(|reason| ReadinessError::InvalidAnswer {
                question: question_id.to_string(),
                reason,
            })?;

        if answer.is_empty() {
            if let Some(section_answers) = self.answers.get_mut(section_id) {
                section_answers.remove(question_id);
                if section_answers.is_empty() {
                    self.answers.remove(section_id);
                }
            }
        } else {
            self.answers
                .entry(section_id.to_string())
                .or_default()
                .insert(question_id.to_string(), answer);
        }
        self.errors.remove(question_id);
        self.autosave.arm(now);
        Ok(())
    }

    /// Check the required questions of one section, replacing that section's
    /// entries in the error map. Returns true when the section is valid.
    pub fn validate_section(&mut self, index: usize) -> Result<bool> {
        let section = sections()
            .get(index)
            .ok_or_else(|| ReadinessError::SectionNotFound(index.to_string()))?;
        let mut valid = true;
        for question in &section.questions {
            self.errors.remove(&question.id);
            if question.required && !self.is_answered(section, question) {
                self.errors
                    .insert(question.id.clone(), REQUIRED_MESSAGE.to_string());
                valid = false;
            }
        }
        Ok(valid)
    }

    pub fn progress(&self) -> Progress {
        let mut answered = 0;
        let mut total = 0;
        for section in sections() {
            for question in &section.questions {
                total += 1;
                if self.is_answered(section, question) {
                    answered += 1;
                }
            }
        }
        Progress::new(answered, total)
    }

    pub fn section_progress(&self, index: usize) -> Result<Progress> {
        let section = sections()
            .get(index)
            .ok_or_else(|| ReadinessError::SectionNotFound(index.to_string()))?;
        let answered = section
            .questions
            .iter()
            .filter(|q| self.is_answered(section, q))
            .count();
        Ok(Progress::new(answered, section.questions.len()))
    }

    /// `(section id, question id)` of every required question still empty.
    pub fn missing_required(&self) -> Vec<(String, String)> {
        sections()
            .iter()
            .flat_map(|s| s.questions.iter().map(move |q| (s, q)))
            .filter(|(s, q)| q.required && !self.is_answered(s, q))
            .map(|(s, q)| (s.id.clone(), q.id.clone()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required().is_empty()
    }

    // -----------------------------------------------------------------------
    // Draft
    // -----------------------------------------------------------------------

    /// Write the draft if the debounce period has passed since the last
    /// change. Returns true if a save was attempted.
    pub fn autosave_tick(&mut self, now: Instant) -> bool {
        if !self.autosave.is_due(now) {
            return false;
        }
        self.flush_draft();
        true
    }

    /// Write the draft now. Failures are logged; the form stays usable.
    pub fn flush_draft(&mut self) {
        self.autosave.disarm();
        match Draft::save(self.storage.as_ref(), &self.answers) {
            Ok(()) => tracing::debug!("assessment draft saved"),
            Err(e) => tracing::warn!(error = %e, "failed to save assessment draft"),
        }
    }

    pub fn clear_draft(&mut self) {
        self.autosave.disarm();
        if let Err(e) = Draft::clear(self.storage.as_ref()) {
            tracing::warn!(error = %e, "failed to clear assessment draft");
        }
    }

    // -----------------------------------------------------------------------
    // Submit
    // -----------------------------------------------------------------------

    /// Submit the answers. Incomplete forms are rejected without contacting
    /// the service and every missing required question gets an error. After
    /// a successful submission the answers and draft are cleared; on failure
    /// everything is kept for a retry.
    pub fn submit(&mut self, service: &dyn SubmissionService) -> Result<SubmissionResult> {
        let missing = self.missing_required();
        if !missing.is_empty() {
            for (_, question_id) in &missing {
                self.errors
                    .insert(question_id.clone(), REQUIRED_MESSAGE.to_string());
            }
            return Err(ReadinessError::AssessmentIncomplete {
                missing: missing.len(),
            });
        }

        let result = service.submit(&self.answers)?;
        if result.success {
            tracing::info!(
                submission_id = result.submission_id.as_deref().unwrap_or("-"),
                "assessment submitted"
            );
            self.answers.clear();
            self.errors.clear();
            self.clear_draft();
        } else {
            tracing::warn!(
                error = result.error.as_deref().unwrap_or("unknown"),
                "assessment submission rejected"
            );
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, ASSESSMENT_DRAFT_KEY};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn memory() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::new())
    }

    fn form(store: &Arc<MemoryStore>) -> AssessmentForm {
        AssessmentForm::new(store.clone(), Duration::from_millis(1000))
    }

    fn text(s: &str) -> Answer {
        Answer::Text(s.to_string())
    }

    /// Every required question with a valid answer.
    fn complete_answers() -> Vec<(&'static str, &'static str, Answer)> {
        vec![
            ("company-profile", "company-name", text("Acme")),
            ("company-profile", "industry", text("retail")),
            ("company-profile", "company-size", text("50-249")),
            ("data-foundation", "data-quality", text("good")),
            ("data-foundation", "data-accessibility", text("3")),
            ("ai-strategy", "ai-vision", text("exploring")),
            ("ai-strategy", "executive-sponsorship", text("4")),
            ("technology", "cloud-adoption", text("hybrid")),
            ("technology", "integration-maturity", text("2")),
            ("talent-culture", "ai-skills", text("enthusiasts")),
            ("talent-culture", "change-readiness", text("3")),
            ("governance", "gdpr-compliance", text("documented")),
            ("governance", "ai-policy", text("draft")),
        ]
    }

    fn fill(form: &mut AssessmentForm) {
        let now = Instant::now();
        for (s, q, a) in complete_answers() {
            form.update_answer(s, q, a, now).unwrap();
        }
    }

    struct CountingService {
        calls: AtomicUsize,
        accept: bool,
    }

    impl CountingService {
        fn new(accept: bool) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                accept,
            }
        }
    }

    impl SubmissionService for CountingService {
        fn submit(&self, _answers: &FormData) -> Result<SubmissionResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(if self.accept {
                SubmissionResult::accepted("sub-1")
            } else {
                SubmissionResult::rejected("backend unavailable")
            })
        }
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let store = memory();
        let mut form = form(&store);
        let now = Instant::now();
        assert!(matches!(
            form.update_answer("nope", "company-name", text("x"), now),
            Err(ReadinessError::SectionNotFound(_))
        ));
        assert!(matches!(
            form.update_answer("company-profile", "nope", text("x"), now),
            Err(ReadinessError::QuestionNotFound { .. })
        ));
        assert!(matches!(
            form.update_answer("company-profile", "industry", text("space"), now),
            Err(ReadinessError::InvalidAnswer { .. })
        ));
        assert_eq!(form.progress().answered, 0);
    }

    #[test]
    fn progress_counts_non_empty_answers() {
        let store = memory();
        let mut form = form(&store);
        let total = form.progress().total;
        assert_eq!(total, sections().iter().map(|s| s.questions.len()).sum::<usize>());
        assert_eq!(form.progress().percentage, 0);

        let now = Instant::now();
        let mut last = 0;
        for (s, q, a) in complete_answers() {
            form.update_answer(s, q, a, now).unwrap();
            let p = form.progress();
            assert!(p.percentage >= last);
            assert_eq!(p.percentage as usize, 100 * p.answered / p.total);
            last = p.percentage;
        }
        assert_eq!(form.progress().answered, complete_answers().len());
    }

    #[test]
    fn changing_an_answer_keeps_progress() {
        let store = memory();
        let mut form = form(&store);
        let now = Instant::now();
        form.update_answer("data-foundation", "data-quality", text("poor"), now)
            .unwrap();
        let before = form.progress();
        form.update_answer("data-foundation", "data-quality", text("good"), now)
            .unwrap();
        assert_eq!(form.progress(), before);

        form.update_answer("data-foundation", "data-quality", text(""), now)
            .unwrap();
        assert_eq!(form.progress().answered, before.answered - 1);
    }

    #[test]
    fn validate_section_flags_missing_required() {
        let store = memory();
        let mut form = form(&store);
        assert!(!form.validate_section(0).unwrap());
        assert_eq!(
            form.errors().get("company-name").map(String::as_str),
            Some(REQUIRED_MESSAGE)
        );
        // Optional questions never error.
        assert!(!form.errors().contains_key("role"));

        let now = Instant::now();
        form.update_answer("company-profile", "company-name", text("Acme"), now)
            .unwrap();
        assert!(!form.errors().contains_key("company-name"));
        form.update_answer("company-profile", "industry", text("retail"), now)
            .unwrap();
        assert!(!form.validate_section(0).unwrap());
        form.update_answer("company-profile", "company-size", text("1-49"), now)
            .unwrap();
        assert!(form.validate_section(0).unwrap());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn validate_section_out_of_range() {
        let store = memory();
        let mut form = form(&store);
        assert!(matches!(
            form.validate_section(sections().len()),
            Err(ReadinessError::SectionNotFound(_))
        ));
    }

    #[test]
    fn section_progress_per_section() {
        let store = memory();
        let mut form = form(&store);
        form.update_answer("talent-culture", "ai-skills", text("team"), Instant::now())
            .unwrap();
        let index = find_section("talent-culture").unwrap().0;
        assert_eq!(form.section_progress(index).unwrap(), Progress::new(1, 2));
        assert_eq!(form.section_progress(0).unwrap().answered, 0);
    }

    #[test]
    fn autosave_waits_for_debounce() {
        let store = memory();
        let mut form = form(&store);
        let start = Instant::now();
        form.update_answer("company-profile", "company-name", text("Acme"), start)
            .unwrap();
        assert!(!form.autosave_tick(start + Duration::from_millis(200)));
        assert_eq!(store.get(ASSESSMENT_DRAFT_KEY).unwrap(), None);

        assert!(form.autosave_tick(start + Duration::from_millis(1000)));
        assert!(store.get(ASSESSMENT_DRAFT_KEY).unwrap().is_some());
        assert!(!form.autosave_pending());
        // Nothing new to save.
        assert!(!form.autosave_tick(start + Duration::from_millis(5000)));
    }

    #[test]
    fn restore_picks_up_draft() {
        let store = memory();
        let mut first = form(&store);
        first
            .update_answer("governance", "ai-policy", text("published"), Instant::now())
            .unwrap();
        first.flush_draft();

        let restored = AssessmentForm::restore(store.clone(), Duration::from_millis(1000));
        assert_eq!(
            restored.answer("governance", "ai-policy"),
            Some(&text("published"))
        );
    }

    #[test]
    fn restore_ignores_malformed_draft() {
        let store = memory();
        store.set(ASSESSMENT_DRAFT_KEY, "{\"answers\": 42}").unwrap();
        let restored = AssessmentForm::restore(store.clone(), Duration::from_millis(1000));
        assert!(restored.answers().is_empty());
    }

    #[test]
    fn incomplete_submit_never_calls_service() {
        let store = memory();
        let mut form = form(&store);
        form.update_answer("company-profile", "company-name", text("Acme"), Instant::now())
            .unwrap();
        let service = CountingService::new(true);
        let err = form.submit(&service).unwrap_err();
        assert!(matches!(err, ReadinessError::AssessmentIncomplete { missing } if missing == 12));
        assert_eq!(service.calls.load(Ordering::SeqCst), 0);
        assert!(form.errors().contains_key("industry"));
        assert_eq!(form.progress().answered, 1);
    }

    #[test]
    fn successful_submit_clears_state() {
        let store = memory();
        let mut form = form(&store);
        fill(&mut form);
        form.flush_draft();
        assert!(form.is_complete());

        let service = CountingService::new(true);
        let result = form.submit(&service).unwrap();
        assert!(result.success);
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert!(form.answers().is_empty());
        assert_eq!(store.get(ASSESSMENT_DRAFT_KEY).unwrap(), None);
    }

    #[test]
    fn rejected_submit_keeps_answers() {
        let store = memory();
        let mut form = form(&store);
        fill(&mut form);
        let service = CountingService::new(false);
        let result = form.submit(&service).unwrap();
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("backend unavailable"));
        assert!(form.is_complete());
    }

    #[test]
    fn missing_required_lists_section_and_question() {
        let store = memory();
        let mut form = form(&store);
        fill(&mut form);
        form.update_answer("governance", "ai-policy", text(""), Instant::now())
            .unwrap();
        assert_eq!(
            form.missing_required(),
            vec![("governance".to_string(), "ai-policy".to_string())]
        );
    }
}
