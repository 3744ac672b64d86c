use crate::filter::Filterable;
use crate::types::Complexity;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::strings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub department: String,
    pub steps: Vec<String>,
    pub tools: Vec<String>,
    pub complexity: Complexity,
    pub time_savings: String,
    pub tags: Vec<String>,
}

impl Filterable for WorkflowTemplate {
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

static WORKFLOWS: OnceLock<Vec<WorkflowTemplate>> = OnceLock::new();

pub fn workflow_templates() -> &'static [WorkflowTemplate] {
    WORKFLOWS.get_or_init(build)
}

#[allow(clippy::too_many_arguments)]
fn workflow(
    id: &str,
    name: &str,
    description: &str,
    department: &str,
    steps: &[&str],
    tools: &[&str],
    complexity: Complexity,
    time_savings: &str,
    tags: &[&str],
) -> WorkflowTemplate {
    WorkflowTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        department: department.to_string(),
        steps: strings(steps),
        tools: strings(tools),
        complexity,
        time_savings: time_savings.to_string(),
        tags: strings(tags),
    }
}

fn build() -> Vec<WorkflowTemplate> {
    vec![
        workflow(
            "invoice-approval-flow",
            "Invoice Approval Flow",
            "Captured invoices are validated, matched and sent to the right approver with an AI-written summary.",
            "Finance",
            &["Capture", "Extract fields", "Match to PO", "Summarise", "Approve", "Post to ERP"],
            &["Document AI", "ERP connector", "Approval inbox"],
            Complexity::Medium,
            "60% less manual handling",
            &["finance", "approval", "document-ai"],
        ),
        workflow(
            "customer-onboarding-flow",
            "Customer Onboarding Flow",
            "Collects documents, verifies identity, and prepares the account with a personalised welcome pack.",
            "Sales",
            &["Collect documents", "Verify identity", "Risk check", "Create account", "Send welcome pack"],
            &["KYC service", "CRM", "Email"],
            Complexity::Medium,
            "3 days faster onboarding",
            &["onboarding", "kyc", "crm"],
        ),
        workflow(
            "content-review-flow",
            "Marketing Content Review",
            "Drafts are checked for brand voice, claims and accessibility before going to a human editor.",
            "Marketing",
            &["Draft", "Brand voice check", "Claims check", "Accessibility check", "Editor approval"],
            &["LLM reviewer", "CMS"],
            Complexity::Low,
            "40% shorter review cycle",
            &["marketing", "content", "review"],
        ),
        workflow(
            "incident-response-flow",
            "IT Incident Response",
            "Alerts are correlated, enriched with runbook context and assigned with a suggested first action.",
            "IT",
            &["Ingest alert", "Correlate", "Enrich with runbook", "Assign", "Post-incident summary"],
            &["Monitoring", "ServiceNow", "Chat"],
            Complexity::High,
            "30% lower time to resolve",
            &["it", "incident", "operations"],
        ),
        workflow(
            "recruitment-screening-flow",
            "Recruitment Screening",
            "Applications are screened against role criteria with explainable scoring and GDPR-compliant retention.",
            "Human Resources",
            &["Receive application", "Parse CV", "Score against criteria", "Recruiter review", "Schedule interview"],
            &["ATS", "CV parser", "Calendar"],
            Complexity::Medium,
            "50% less screening time",
            &["hr", "recruitment", "gdpr"],
        ),
    ]
}
