//! Client-side page routing: maps URL paths onto the pages of the app.

use serde::{Deserialize, Serialize};
use std::fmt;
use url::form_urlencoded;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardSection {
    Overview,
    Report,
    UseCases,
    Solutions,
    Agents,
    Workflows,
    Roadmap,
    Training,
    Resources,
    Gdpr,
    Playground,
    Services,
    Admin,
}

impl DashboardSection {
    pub fn all() -> &'static [DashboardSection] {
        &[
            DashboardSection::Overview,
            DashboardSection::Report,
            DashboardSection::UseCases,
            DashboardSection::Solutions,
            DashboardSection::Agents,
            DashboardSection::Workflows,
            DashboardSection::Roadmap,
            DashboardSection::Training,
            DashboardSection::Resources,
            DashboardSection::Gdpr,
            DashboardSection::Playground,
            DashboardSection::Services,
            DashboardSection::Admin,
        ]
    }

    /// Path segment under `/dashboard`; empty for the overview.
    pub fn slug(self) -> &'static str {
        match self {
            DashboardSection::Overview => "",
            DashboardSection::Report => "report",
            DashboardSection::UseCases => "use-cases",
            DashboardSection::Solutions => "solutions",
            DashboardSection::Agents => "agents",
            DashboardSection::Workflows => "workflows",
            DashboardSection::Roadmap => "roadmap",
            DashboardSection::Training => "training",
            DashboardSection::Resources => "resources",
            DashboardSection::Gdpr => "gdpr",
            DashboardSection::Playground => "playground",
            DashboardSection::Services => "services",
            DashboardSection::Admin => "admin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DashboardSection::Overview => "Overview",
            DashboardSection::Report => "Readiness Report",
            DashboardSection::UseCases => "Use Cases",
            DashboardSection::Solutions => "Solutions",
            DashboardSection::Agents => "AI Agents",
            DashboardSection::Workflows => "Workflows",
            DashboardSection::Roadmap => "Roadmap",
            DashboardSection::Training => "Training",
            DashboardSection::Resources => "Resources",
            DashboardSection::Gdpr => "GDPR",
            DashboardSection::Playground => "Playground",
            DashboardSection::Services => "Services",
            DashboardSection::Admin => "Admin",
        }
    }

    fn from_slug(slug: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.slug() == slug)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum Page {
    Home,
    Start,
    HowItWorks,
    UseCases,
    Contact,
    Diagnostic { segment: Option<String> },
    Assessment,
    Dashboard { section: DashboardSection },
    NotFound { path: String },
}

impl Page {
    /// Resolve a path with optional query string. Trailing slashes are
    /// ignored; unknown paths resolve to `NotFound`.
    pub fn resolve(path_and_query: &str) -> Page {
        let (path, query) = match path_and_query.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path_and_query, None),
        };
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Page::Home,
            ["start"] => Page::Start,
            ["how-it-works"] => Page::HowItWorks,
            ["use-cases"] => Page::UseCases,
            ["contact"] => Page::Contact,
            ["diagnostic"] => Page::Diagnostic {
                segment: query.and_then(|q| query_param(q, "segment")),
            },
            ["assessment"] => Page::Assessment,
            ["dashboard"] => Page::Dashboard {
                section: DashboardSection::Overview,
            },
            ["dashboard", slug] => match DashboardSection::from_slug(slug) {
                Some(section) if section != DashboardSection::Overview => {
                    Page::Dashboard { section }
                }
                _ => Page::NotFound {
                    path: path.to_string(),
                },
            },
            _ => Page::NotFound {
                path: path.to_string(),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Page::Home => "/".to_string(),
            Page::Start => "/start".to_string(),
            Page::HowItWorks => "/how-it-works".to_string(),
            Page::UseCases => "/use-cases".to_string(),
            Page::Contact => "/contact".to_string(),
            Page::Diagnostic { segment: None } => "/diagnostic".to_string(),
            Page::Diagnostic {
                segment: Some(segment),
            } => {
                let query = form_urlencoded::Serializer::new(String::new())
                    .append_pair("segment", segment)
                    .finish();
                format!("/diagnostic?{query}")
            }
            Page::Assessment => "/assessment".to_string(),
            Page::Dashboard {
                section: DashboardSection::Overview,
            } => "/dashboard".to_string(),
            Page::Dashboard { section } => format!("/dashboard/{}", section.slug()),
            Page::NotFound { path } => path.clone(),
        }
    }

    pub fn title(&self) -> String {
        match self {
            Page::Home => "AI Readiness".to_string(),
            Page::Start => "Get Started".to_string(),
            Page::HowItWorks => "How It Works".to_string(),
            Page::UseCases => "Use Cases".to_string(),
            Page::Contact => "Contact".to_string(),
            Page::Diagnostic { .. } => "Diagnostic".to_string(),
            Page::Assessment => "Assessment".to_string(),
            Page::Dashboard { section } => format!("Dashboard · {}", section.label()),
            Page::NotFound { .. } => "Page Not Found".to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Page::NotFound { .. })
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}
