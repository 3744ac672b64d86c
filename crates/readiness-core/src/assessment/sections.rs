use crate::types::Pillar;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::Answer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    SingleChoice,
    MultiChoice,
    Text,
    /// 1–5 rating; the chosen value is also the score.
    Scale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerOption {
    pub value: String,
    pub label: String,
    /// Contribution to the pillar score, 0–5.
    pub score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub required: bool,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pillar: Option<Pillar>,
}

impl Question {
    pub fn option(&self, value: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.value == value)
    }

    /// Check an answer against the question's kind and options. Empty answers
    /// are always accepted; they clear the question.
    pub fn check(&self, answer: &Answer) -> Result<(), String> {
        if answer.is_empty() {
            return Ok(());
        }
        match (self.kind, answer) {
            (QuestionKind::Text, Answer::Text(_)) => Ok(()),
            (QuestionKind::SingleChoice | QuestionKind::Scale, Answer::Text(value)) => self
                .option(value.trim())
                .map(|_| ())
                .ok_or_else(|| format!("'{value}' is not one of the options")),
            (QuestionKind::MultiChoice, Answer::Multi(values)) => {
                match values.iter().find(|v| self.option(v.trim()).is_none()) {
                    Some(bad) => Err(format!("'{bad}' is not one of the options")),
                    None => Ok(()),
                }
            }
            (QuestionKind::MultiChoice, Answer::Text(_)) => {
                Err("expected a list of options".to_string())
            }
            (_, Answer::Multi(_)) => Err("expected a single value".to_string()),
        }
    }

    /// Build an answer from command-line style input. Multi-choice questions
    /// accept several values or one comma-separated value.
    pub fn parse_answer(&self, raw: &[String]) -> Answer {
        match self.kind {
            QuestionKind::MultiChoice => Answer::Multi(
                raw.iter()
                    .flat_map(|r| r.split(','))
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            _ => Answer::Text(raw.join(" ")),
        }
    }

    /// Score of an answer on the 0–5 scale, or `None` for unscored questions
    /// and empty answers.
    pub fn score(&self, answer: &Answer) -> Option<f64> {
        if answer.is_empty() || self.options.is_empty() {
            return None;
        }
        match (self.kind, answer) {
            (QuestionKind::SingleChoice | QuestionKind::Scale, Answer::Text(value)) => {
                self.option(value.trim()).map(|o| f64::from(o.score))
            }
            (QuestionKind::MultiChoice, Answer::Multi(values)) => {
                let scores: Vec<f64> = values
                    .iter()
                    .filter_map(|v| self.option(v.trim()))
                    .map(|o| f64::from(o.score))
                    .collect();
                if scores.is_empty() {
                    None
                } else {
                    Some(scores.iter().sum::<f64>() / scores.len() as f64)
                }
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

impl Section {
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

// ---------------------------------------------------------------------------
// Static questionnaire
// ---------------------------------------------------------------------------

fn opt(value: &str, label: &str, score: u8) -> AnswerOption {
    AnswerOption {
        value: value.to_string(),
        label: label.to_string(),
        score,
    }
}

fn text(id: &str, prompt: &str, required: bool) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::Text,
        required,
        options: Vec::new(),
        pillar: None,
    }
}

fn choice(
    id: &str,
    prompt: &str,
    required: bool,
    pillar: Option<Pillar>,
    options: Vec<AnswerOption>,
) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::SingleChoice,
        required,
        options,
        pillar,
    }
}

fn multi(id: &str, prompt: &str, pillar: Pillar, options: Vec<AnswerOption>) -> Question {
    Question {
        kind: QuestionKind::MultiChoice,
        ..choice(id, prompt, false, Some(pillar), options)
    }
}

fn scale(id: &str, prompt: &str, required: bool, pillar: Pillar) -> Question {
    let labels = [
        "Not at all",
        "Slightly",
        "Moderately",
        "Largely",
        "Completely",
    ];
    Question {
        kind: QuestionKind::Scale,
        ..choice(
            id,
            prompt,
            required,
            Some(pillar),
            (1u8..=5)
                .zip(labels)
                .map(|(n, label)| opt(&n.to_string(), label, n))
                .collect(),
        )
    }
}

fn new_section(id: &str, title: &str, description: &str, questions: Vec<Question>) -> Section {
    Section {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        questions,
    }
}

static SECTIONS: OnceLock<Vec<Section>> = OnceLock::new();

/// The assessment questionnaire, in the order it is presented.
pub fn sections() -> &'static [Section] {
    SECTIONS.get_or_init(|| {
        vec![
            new_section(
                "company-profile",
                "Company Profile",
                "Tell us about your organisation so recommendations fit your context.",
                vec![
                    text("company-name", "Company name", true),
                    choice(
                        "industry",
                        "Which industry are you in?",
                        true,
                        None,
                        vec![
                            opt("retail", "Retail", 0),
                            opt("manufacturing", "Manufacturing", 0),
                            opt("financial-services", "Financial Services", 0),
                            opt("healthcare", "Healthcare", 0),
                            opt("public-sector", "Public Sector", 0),
                            opt("other", "Other", 0),
                        ],
                    ),
                    choice(
                        "company-size",
                        "How many employees do you have?",
                        true,
                        None,
                        vec![
                            opt("1-49", "1–49", 0),
                            opt("50-249", "50–249", 0),
                            opt("250-999", "250–999", 0),
                            opt("1000+", "1000 or more", 0),
                        ],
                    ),
                    text("role", "Your role", false),
                ],
            ),
            new_section(
                "data-foundation",
                "Data Foundation",
                "How well your data can support AI use cases.",
                vec![
                    choice(
                        "data-quality",
                        "How would you describe the quality of your core business data?",
                        true,
                        Some(Pillar::DataFoundation),
                        vec![
                            opt("poor", "Inconsistent and mostly manual", 1),
                            opt("fair", "Usable with significant cleanup", 2),
                            opt("good", "Mostly clean and documented", 4),
                            opt("excellent", "Governed, clean and trusted", 5),
                        ],
                    ),
                    scale(
                        "data-accessibility",
                        "Can teams access the data they need without IT tickets?",
                        true,
                        Pillar::DataFoundation,
                    ),
                    multi(
                        "data-sources",
                        "Which data sources are centrally available?",
                        Pillar::DataFoundation,
                        vec![
                            opt("spreadsheets", "Spreadsheets", 1),
                            opt("erp", "ERP", 3),
                            opt("crm", "CRM", 3),
                            opt("data-warehouse", "Data warehouse", 5),
                        ],
                    ),
                ],
            ),
            new_section(
                "ai-strategy",
                "AI Strategy",
                "Where AI sits in your business priorities.",
                vec![
                    choice(
                        "ai-vision",
                        "Does your organisation have a defined AI vision?",
                        true,
                        Some(Pillar::AiStrategy),
                        vec![
                            opt("none", "Not yet", 0),
                            opt("exploring", "We are exploring ideas", 2),
                            opt("defined", "Defined but not funded", 3),
                            opt("funded", "Defined, funded and tracked", 5),
                        ],
                    ),
                    scale(
                        "executive-sponsorship",
                        "How actively does leadership sponsor AI initiatives?",
                        true,
                        Pillar::AiStrategy,
                    ),
                    text(
                        "priority-use-cases",
                        "Which processes would you most like to improve with AI?",
                        false,
                    ),
                ],
            ),
            new_section(
                "technology",
                "Technology",
                "Infrastructure and tooling available to AI projects.",
                vec![
                    choice(
                        "cloud-adoption",
                        "How much of your infrastructure runs in the cloud?",
                        true,
                        Some(Pillar::Technology),
                        vec![
                            opt("on-premise", "Entirely on-premise", 1),
                            opt("hybrid", "Hybrid", 3),
                            opt("cloud-first", "Cloud-first", 5),
                        ],
                    ),
                    scale(
                        "integration-maturity",
                        "How easily can new tools be integrated with existing systems?",
                        true,
                        Pillar::Technology,
                    ),
                    multi(
                        "tools-in-use",
                        "Which AI tools are already in use?",
                        Pillar::Technology,
                        vec![
                            opt("none", "None", 0),
                            opt("assistants", "Chat assistants", 2),
                            opt("automation", "Workflow automation", 3),
                            opt("custom-models", "Custom models", 5),
                        ],
                    ),
                ],
            ),
            new_section(
                "talent-culture",
                "Talent & Culture",
                "Skills and openness to change across the organisation.",
                vec![
                    choice(
                        "ai-skills",
                        "What AI skills exist in-house?",
                        true,
                        Some(Pillar::TalentCulture),
                        vec![
                            opt("none", "None", 0),
                            opt("enthusiasts", "A few enthusiasts", 2),
                            opt("team", "A dedicated team", 4),
                            opt("company-wide", "Broad literacy across the company", 5),
                        ],
                    ),
                    scale(
                        "change-readiness",
                        "How open are employees to new ways of working?",
                        true,
                        Pillar::TalentCulture,
                    ),
                ],
            ),
            new_section(
                "governance",
                "Governance",
                "Compliance, policy and risk management for AI.",
                vec![
                    choice(
                        "gdpr-compliance",
                        "How mature is your GDPR compliance programme?",
                        true,
                        Some(Pillar::Governance),
                        vec![
                            opt("ad-hoc", "Ad hoc", 1),
                            opt("documented", "Documented processes", 3),
                            opt("audited", "Regularly audited", 5),
                        ],
                    ),
                    choice(
                        "ai-policy",
                        "Do you have an acceptable-use policy for AI?",
                        true,
                        Some(Pillar::Governance),
                        vec![
                            opt("no", "No", 0),
                            opt("draft", "In draft", 2),
                            opt("published", "Published and trained", 5),
                        ],
                    ),
                    scale(
                        "risk-management",
                        "How systematically are AI risks assessed before deployment?",
                        false,
                        Pillar::Governance,
                    ),
                ],
            ),
        ]
    })
}

pub fn section(index: usize) -> Option<&'static Section> {
    sections().get(index)
}

pub fn find_section(id: &str) -> Option<(usize, &'static Section)> {
    sections().iter().enumerate().find(|(_, s)| s.id == id)
}
