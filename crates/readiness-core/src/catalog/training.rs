use crate::filter::Filterable;
use crate::types::Complexity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::strings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl TrainingLevel {
    /// Level expressed on the shared complexity scale so course lists can be
    /// filtered with the same predicates as the other catalogs.
    pub fn complexity(self) -> Complexity {
        match self {
            TrainingLevel::Beginner => Complexity::Low,
            TrainingLevel::Intermediate => Complexity::Medium,
            TrainingLevel::Advanced => Complexity::High,
        }
    }
}

impl fmt::Display for TrainingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TrainingLevel::Beginner => "beginner",
            TrainingLevel::Intermediate => "intermediate",
            TrainingLevel::Advanced => "advanced",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingCourse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub level: TrainingLevel,
    pub duration: String,
    pub format: String,
    pub audience: String,
    pub modules: Vec<String>,
    pub tags: Vec<String>,
}

impl Filterable for TrainingCourse {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn department(&self) -> Option<&str> {
        Some(&self.audience)
    }

    fn complexity(&self) -> Option<Complexity> {
        Some(self.level.complexity())
    }
}

static COURSES: OnceLock<Vec<TrainingCourse>> = OnceLock::new();

pub fn training_courses() -> &'static [TrainingCourse] {
    COURSES.get_or_init(build)
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    title: &str,
    description: &str,
    level: TrainingLevel,
    duration: &str,
    format: &str,
    audience: &str,
    modules: &[&str],
    tags: &[&str],
) -> TrainingCourse {
    TrainingCourse {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        level,
        duration: duration.to_string(),
        format: format.to_string(),
        audience: audience.to_string(),
        modules: strings(modules),
        tags: strings(tags),
    }
}

fn build() -> Vec<TrainingCourse> {
    vec![
        course(
            "ai-fundamentals",
            "AI Fundamentals for Everyone",
            "What AI can and cannot do, explained with everyday business examples.",
            TrainingLevel::Beginner,
            "3 hours",
            "Self-paced",
            "All Staff",
            &["What is AI", "Machine learning in plain words", "Generative AI", "Working safely with AI"],
            &["fundamentals", "literacy"],
        ),
        course(
            "prompt-engineering",
            "Prompt Engineering in Practice",
            "Hands-on techniques for getting reliable results from generative AI assistants.",
            TrainingLevel::Intermediate,
            "1 day",
            "Workshop",
            "Knowledge Workers",
            &["Prompt patterns", "Giving context", "Evaluating output", "Building prompt libraries"],
            &["generative-ai", "productivity"],
        ),
        course(
            "data-literacy",
            "Data Literacy for Teams",
            "Reading, questioning and presenting data so AI initiatives start from solid ground.",
            TrainingLevel::Beginner,
            "2 half-days",
            "Live online",
            "Team Leads",
            &["Data quality basics", "Reading dashboards", "Asking good data questions"],
            &["data", "literacy"],
        ),
        course(
            "responsible-ai-gdpr",
            "Responsible AI and GDPR",
            "Legal and ethical guardrails for AI projects, from lawful basis to impact assessments.",
            TrainingLevel::Intermediate,
            "1 day",
            "Workshop",
            "Legal & Compliance",
            &["Lawful basis for AI processing", "DPIAs for AI", "Bias and fairness", "EU AI Act overview"],
            &["gdpr", "ethics", "governance"],
        ),
        course(
            "ai-for-leaders",
            "AI Strategy for Leaders",
            "Building the business case, portfolio and operating model for AI at scale.",
            TrainingLevel::Advanced,
            "2 days",
            "Executive programme",
            "Leadership",
            &["Value mapping", "Portfolio prioritisation", "Operating models", "Measuring impact"],
            &["strategy", "leadership"],
        ),
    ]
}
