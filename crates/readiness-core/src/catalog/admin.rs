use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Onboarding,
    Inactive,
}

/// Sample client record shown on the admin page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClient {
    pub id: String,
    pub company: String,
    pub industry: String,
    pub segment: String,
    /// Overall readiness on the 0–5 pillar scale.
    pub readiness_score: f64,
    pub assessments_completed: u32,
    pub status: ClientStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub clients: usize,
    pub active: usize,
    pub assessments_completed: u32,
    pub average_readiness: f64,
}

static CLIENTS: OnceLock<Vec<AdminClient>> = OnceLock::new();

pub fn clients() -> &'static [AdminClient] {
    CLIENTS.get_or_init(|| {
        [
            ("northwind-retail", "Northwind Retail", "Retail", "enterprise", 3.4, 3, ClientStatus::Active),
            ("baltic-freight", "Baltic Freight", "Logistics", "sme", 2.1, 1, ClientStatus::Active),
            ("helix-health", "Helix Health", "Healthcare", "enterprise", 2.8, 2, ClientStatus::Onboarding),
            ("city-of-aarvik", "City of Aarvik", "Public Sector", "public-sector", 1.9, 1, ClientStatus::Active),
            ("lumen-legal", "Lumen Legal", "Professional Services", "sme", 3.9, 4, ClientStatus::Inactive),
        ]
        .into_iter()
        .map(
            |(id, company, industry, segment, readiness_score, assessments_completed, status)| {
                AdminClient {
                    id: id.to_string(),
                    company: company.to_string(),
                    industry: industry.to_string(),
                    segment: segment.to_string(),
                    readiness_score,
                    assessments_completed,
                    status,
                }
            },
        )
        .collect()
    })
}

pub fn summary() -> AdminSummary {
    let all = clients();
    let average = if all.is_empty() {
        0.0
    } else {
        all.iter().map(|c| c.readiness_score).sum::<f64>() / all.len() as f64
    };
    AdminSummary {
        clients: all.len(),
        active: all
            .iter()
            .filter(|c| c.status == ClientStatus::Active)
            .count(),
        assessments_completed: all.iter().map(|c| c.assessments_completed).sum(),
        average_readiness: (average * 10.0).round() / 10.0,
    }
}
