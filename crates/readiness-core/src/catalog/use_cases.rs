use crate::filter::Filterable;
use crate::types::Complexity;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::strings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UseCase {
    pub id: String,
    pub title: String,
    pub description: String,
    pub industries: Vec<String>,
    pub department: String,
    pub complexity: Complexity,
    /// Expected return, e.g. "150-250%".
    pub roi: String,
    pub time_to_value: String,
    pub tags: Vec<String>,
    pub prerequisites: Vec<String>,
    pub implementation_steps: Vec<String>,
    pub success_metrics: Vec<String>,
}

impl Filterable for UseCase {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn industries(&self) -> &[String] {
        &self.industries
    }

    fn department(&self) -> Option<&str> {
        Some(&self.department)
    }

    fn complexity(&self) -> Option<Complexity> {
        Some(self.complexity)
    }

    fn roi(&self) -> Option<&str> {
        Some(&self.roi)
    }
}

static USE_CASES: OnceLock<Vec<UseCase>> = OnceLock::new();

pub fn use_cases() -> &'static [UseCase] {
    USE_CASES.get_or_init(build)
}

#[allow(clippy::too_many_arguments)]
fn use_case(
    id: &str,
    title: &str,
    description: &str,
    industries: &[&str],
    department: &str,
    complexity: Complexity,
    roi: &str,
    time_to_value: &str,
    tags: &[&str],
    prerequisites: &[&str],
    implementation_steps: &[&str],
    success_metrics: &[&str],
) -> UseCase {
    UseCase {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        industries: strings(industries),
        department: department.to_string(),
        complexity,
        roi: roi.to_string(),
        time_to_value: time_to_value.to_string(),
        tags: strings(tags),
        prerequisites: strings(prerequisites),
        implementation_steps: strings(implementation_steps),
        success_metrics: strings(success_metrics),
    }
}

fn build() -> Vec<UseCase> {
    vec![
        use_case(
            "customer-service-chatbot",
            "AI Customer Service Assistant",
            "Conversational assistant that answers routine customer questions around the clock and hands complex cases to human agents with full context.",
            &["Retail", "Financial Services", "Telecommunications"],
            "Customer Service",
            Complexity::Low,
            "150-250%",
            "2-3 months",
            &["chatbot", "nlp", "customer-experience"],
            &["Curated FAQ and knowledge base", "Ticketing system with API access"],
            &[
                "Collect and clean the top 200 customer questions",
                "Configure the assistant on the knowledge base",
                "Pilot on one channel with human fallback",
                "Roll out to remaining channels",
            ],
            &["First-contact resolution rate", "Average handling time", "Customer satisfaction score"],
        ),
        use_case(
            "invoice-processing",
            "Intelligent Invoice Processing",
            "Extracts supplier, amount and line items from incoming invoices, matches them to purchase orders, and routes exceptions for approval.",
            &["Manufacturing", "Retail", "Professional Services"],
            "Finance",
            Complexity::Medium,
            "200-300%",
            "3-4 months",
            &["document-ai", "ocr", "automation"],
            &["Digitised invoice intake", "ERP with purchase order data"],
            &[
                "Sample 500 historical invoices for training",
                "Set up extraction and validation rules",
                "Integrate three-way matching with the ERP",
                "Move exception handling into the approval workflow",
            ],
            &["Invoices processed without touch", "Cost per invoice", "Days payable outstanding"],
        ),
        use_case(
            "gdpr-data-discovery",
            "GDPR Personal Data Discovery",
            "Scans file shares, mailboxes and databases for personal data and builds a living record of processing activities.",
            &["Financial Services", "Healthcare", "Public Sector"],
            "Legal & Compliance",
            Complexity::Medium,
            "120-180%",
            "2-4 months",
            &["privacy", "compliance", "data-mapping"],
            &["Inventory of data stores", "Data protection officer sign-off"],
            &[
                "Connect scanners to priority data stores",
                "Tune classifiers for local identifiers",
                "Review findings with data owners",
                "Publish the record of processing activities",
            ],
            &["Share of data stores mapped", "Time to answer regulator queries"],
        ),
        use_case(
            "dsar-automation",
            "Subject Access Request Automation",
            "Automates intake, search and redaction of data subject access requests under GDPR Article 15 so responses go out well within the one-month deadline.",
            &["Financial Services", "Retail", "Telecommunications"],
            "Legal & Compliance",
            Complexity::Medium,
            "130-200%",
            "3 months",
            &["privacy", "redaction", "document-ai"],
            &["Personal data map", "Identity verification process"],
            &[
                "Standardise the request intake form",
                "Automate search across mapped systems",
                "Add automatic redaction of third-party data",
                "Track deadlines on a compliance dashboard",
            ],
            &["Median response time", "Requests answered past deadline"],
        ),
        use_case(
            "predictive-maintenance",
            "Predictive Maintenance",
            "Uses sensor telemetry to forecast equipment failures and schedule maintenance before breakdowns stop production.",
            &["Manufacturing", "Energy", "Logistics"],
            "Operations",
            Complexity::High,
            "250-400%",
            "6-9 months",
            &["iot", "forecasting", "machine-learning"],
            &["Sensor data history of at least 12 months", "Maintenance logs"],
            &[
                "Instrument critical assets",
                "Build a failure history dataset",
                "Train and validate failure models",
                "Feed alerts into the maintenance planning system",
            ],
            &["Unplanned downtime", "Maintenance cost per asset", "Mean time between failures"],
        ),
        use_case(
            "demand-forecasting",
            "Demand Forecasting",
            "Predicts product demand per store and week from sales history, promotions and seasonality to cut stock-outs and overstock.",
            &["Retail", "Manufacturing", "Logistics"],
            "Supply Chain",
            Complexity::High,
            "180-300%",
            "4-6 months",
            &["forecasting", "inventory", "machine-learning"],
            &["Two years of sales history", "Promotion calendar"],
            &[
                "Consolidate sales and promotion data",
                "Benchmark baseline forecasts",
                "Deploy model-driven replenishment for one category",
                "Extend to the full assortment",
            ],
            &["Forecast accuracy", "Stock-out rate", "Inventory turns"],
        ),
        use_case(
            "contract-review",
            "Contract Review Assistant",
            "Highlights risky clauses, missing terms and deviations from the company playbook in incoming contracts.",
            &["Professional Services", "Technology", "Financial Services"],
            "Legal & Compliance",
            Complexity::Medium,
            "150-220%",
            "2-3 months",
            &["nlp", "contracts", "gdpr"],
            &["Clause playbook", "Repository of signed contracts"],
            &[
                "Encode the clause playbook",
                "Pilot on non-disclosure agreements",
                "Extend to supplier and data processing agreements",
            ],
            &["Review turnaround time", "Clauses escalated to counsel"],
        ),
        use_case(
            "sales-lead-scoring",
            "Sales Lead Scoring",
            "Ranks inbound leads by likelihood to convert using CRM history and engagement signals so sales focuses on the best opportunities.",
            &["Technology", "Financial Services", "Professional Services"],
            "Sales",
            Complexity::Low,
            "120-200%",
            "1-2 months",
            &["crm", "scoring", "machine-learning"],
            &["CRM with closed-won history"],
            &[
                "Export two years of lead outcomes",
                "Train a scoring model",
                "Surface scores in the CRM lead view",
            ],
            &["Lead-to-opportunity conversion", "Sales cycle length"],
        ),
        use_case(
            "hr-onboarding-assistant",
            "HR Onboarding Assistant",
            "Answers new-hire questions about policies, benefits and tools and walks them through their first-week checklist.",
            &["Cross-Industry"],
            "Human Resources",
            Complexity::Low,
            "100-150%",
            "1-2 months",
            &["hr", "knowledge-base", "chatbot"],
            &["Up-to-date employee handbook"],
            &[
                "Index the employee handbook",
                "Draft the first-week checklist flow",
                "Launch with the next onboarding cohort",
            ],
            &["HR tickets per new hire", "Time to productivity"],
        ),
    ]
}
