use crate::filter::Filterable;
use crate::types::Complexity;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::strings;

/// A pre-configured AI agent a client can deploy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub department: String,
    pub capabilities: Vec<String>,
    pub integrations: Vec<String>,
    pub complexity: Complexity,
    pub setup_time: String,
    pub tags: Vec<String>,
}

impl Filterable for AgentTemplate {
    fn title(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn department(&self) -> Option<&str> {
        Some(&self.department)
    }

    fn complexity(&self) -> Option<Complexity> {
        Some(self.complexity)
    }
}

static AGENTS: OnceLock<Vec<AgentTemplate>> = OnceLock::new();

pub fn agent_templates() -> &'static [AgentTemplate] {
    AGENTS.get_or_init(build)
}

struct Row<'a> {
    id: &'a str,
    name: &'a str,
    description: &'a str,
    department: &'a str,
    capabilities: &'a [&'a str],
    integrations: &'a [&'a str],
    complexity: Complexity,
    setup_time: &'a str,
    tags: &'a [&'a str],
}

impl From<Row<'_>> for AgentTemplate {
    fn from(s: Row<'_>) -> Self {
        Self {
            id: s.id.to_string(),
            name: s.name.to_string(),
            description: s.description.to_string(),
            department: s.department.to_string(),
            capabilities: strings(s.capabilities),
            integrations: strings(s.integrations),
            complexity: s.complexity,
            setup_time: s.setup_time.to_string(),
            tags: strings(s.tags),
        }
    }
}

fn build() -> Vec<AgentTemplate> {
    [
        Row {
            id: "email-triage-agent",
            name: "Email Triage Agent",
            description: "Reads shared inboxes, classifies intent and urgency, drafts replies and routes the rest to the right team.",
            department: "Customer Service",
            capabilities: &["Intent classification", "Reply drafting", "Routing"],
            integrations: &["Microsoft 365", "Google Workspace", "Zendesk"],
            complexity: Complexity::Low,
            setup_time: "1-2 weeks",
            tags: &["email", "nlp", "automation"],
        },
        Row {
            id: "meeting-notes-agent",
            name: "Meeting Notes Agent",
            description: "Joins calls, produces summaries with decisions and action items, and files them in the project workspace.",
            department: "Operations",
            capabilities: &["Transcription", "Summarisation", "Action item extraction"],
            integrations: &["Teams", "Zoom", "Notion"],
            complexity: Complexity::Low,
            setup_time: "1 week",
            tags: &["productivity", "summarisation"],
        },
        Row {
            id: "research-agent",
            name: "Market Research Agent",
            description: "Monitors competitors and industry news and compiles a weekly briefing with sources.",
            department: "Marketing",
            capabilities: &["Web research", "Source citation", "Trend detection"],
            integrations: &["Slack", "SharePoint"],
            complexity: Complexity::Medium,
            setup_time: "2-3 weeks",
            tags: &["research", "marketing", "monitoring"],
        },
        Row {
            id: "compliance-monitor-agent",
            name: "Compliance Monitor Agent",
            description: "Checks new documents and data flows against GDPR and internal policies and raises findings for the privacy team.",
            department: "Legal & Compliance",
            capabilities: &["Policy checks", "Personal data detection", "Audit trail"],
            integrations: &["SharePoint", "OneTrust", "Jira"],
            complexity: Complexity::High,
            setup_time: "4-6 weeks",
            tags: &["gdpr", "privacy", "compliance"],
        },
        Row {
            id: "it-helpdesk-agent",
            name: "IT Helpdesk Agent",
            description: "Resolves password resets, access requests and common device issues, escalating with a full diagnostic log.",
            department: "IT",
            capabilities: &["Self-service resolution", "Access provisioning", "Escalation"],
            integrations: &["ServiceNow", "Entra ID", "Jamf"],
            complexity: Complexity::Medium,
            setup_time: "3-4 weeks",
            tags: &["it", "service-desk", "automation"],
        },
    ]
    .into_iter()
    .map(AgentTemplate::from)
    .collect()
}
