use crate::filter::Filterable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::strings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Guide,
    Template,
    Checklist,
    Video,
    Article,
    Tool,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResourceKind::Guide => "guide",
            ResourceKind::Template => "template",
            ResourceKind::Checklist => "checklist",
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
            ResourceKind::Tool => "tool",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guide" => Ok(ResourceKind::Guide),
            "template" => Ok(ResourceKind::Template),
            "checklist" => Ok(ResourceKind::Checklist),
            "video" => Ok(ResourceKind::Video),
            "article" => Ok(ResourceKind::Article),
            "tool" => Ok(ResourceKind::Tool),
            other => Err(format!("unknown resource kind '{other}'")),
        }
    }
}

/// An entry in the resource hub.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: String,
    pub title: String,
    pub description: String,
    pub kind: ResourceKind,
    pub topic: String,
    pub tags: Vec<String>,
}

impl Filterable for Resource {
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
        Some(&self.topic)
    }
}

static RESOURCES: OnceLock<Vec<Resource>> = OnceLock::new();

pub fn resources() -> &'static [Resource] {
    RESOURCES.get_or_init(|| {
        [
            (
                "ai-readiness-playbook",
                "AI Readiness Playbook",
                "Step-by-step guide from first assessment to a funded AI roadmap.",
                ResourceKind::Guide,
                "Strategy",
                &["strategy", "roadmap"][..],
            ),
            (
                "use-case-canvas",
                "Use Case Canvas",
                "One-page template to describe value, data and risks of an AI use case.",
                ResourceKind::Template,
                "Strategy",
                &["template", "use-cases"][..],
            ),
            (
                "gdpr-ai-checklist",
                "GDPR Checklist for AI Projects",
                "Questions to settle before personal data enters a model: lawful basis, minimisation, retention and transparency.",
                ResourceKind::Checklist,
                "Governance",
                &["gdpr", "privacy", "compliance"][..],
            ),
            (
                "dpia-template",
                "DPIA Template for AI Systems",
                "Data protection impact assessment template adapted for machine learning systems.",
                ResourceKind::Template,
                "Governance",
                &["gdpr", "dpia"][..],
            ),
            (
                "data-quality-webinar",
                "Data Quality Foundations",
                "Recorded session on profiling, cleansing and owning the data your AI depends on.",
                ResourceKind::Video,
                "Data",
                &["data", "quality"][..],
            ),
            (
                "roi-calculator",
                "AI ROI Calculator",
                "Spreadsheet model for estimating payback of automation and prediction use cases.",
                ResourceKind::Tool,
                "Strategy",
                &["roi", "business-case"][..],
            ),
            (
                "change-management-article",
                "Bringing People Along",
                "What works when introducing AI assistants to teams that are sceptical of them.",
                ResourceKind::Article,
                "Talent & Culture",
                &["change-management", "culture"][..],
            ),
        ]
        .into_iter()
        .map(|(id, title, description, kind, topic, tags)| Resource {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            kind,
            topic: topic.to_string(),
            tags: strings(tags),
        })
        .collect()
    })
}

/// Resource hub entries on GDPR, shown on the dashboard's GDPR page.
pub fn gdpr_resources() -> Vec<&'static Resource> {
    resources()
        .iter()
        .filter(|r| r.tags.iter().any(|t| t == "gdpr"))
        .collect()
}
