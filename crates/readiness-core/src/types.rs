use crate::error::ReadinessError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fold a user-supplied enum string ("In Progress", "in-progress",
/// "IN_PROGRESS", "Talent & Culture") to its snake_case wire form.
fn normalize(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

// ---------------------------------------------------------------------------
// ItemCategory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    UseCase,
    Agent,
    Workflow,
    Training,
}

impl ItemCategory {
    pub fn all() -> &'static [ItemCategory] {
        &[
            ItemCategory::UseCase,
            ItemCategory::Agent,
            ItemCategory::Workflow,
            ItemCategory::Training,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemCategory::UseCase => "use_case",
            ItemCategory::Agent => "agent",
            ItemCategory::Workflow => "workflow",
            ItemCategory::Training => "training",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::UseCase => "Use Case",
            ItemCategory::Agent => "Agent",
            ItemCategory::Workflow => "Workflow",
            ItemCategory::Training => "Training",
        }
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ItemCategory {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "use_case" | "use_cases" => Ok(ItemCategory::UseCase),
            "agent" | "agents" => Ok(ItemCategory::Agent),
            "workflow" | "workflows" => Ok(ItemCategory::Workflow),
            "training" => Ok(ItemCategory::Training),
            _ => Err(ReadinessError::InvalidCategory(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// CatalogSource
// ---------------------------------------------------------------------------

/// Which static catalog a roadmap item was created from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    #[serde(alias = "use-cases")]
    UseCases,
    Agents,
    Workflows,
    Training,
}

impl CatalogSource {
    pub fn all() -> &'static [CatalogSource] {
        &[
            CatalogSource::UseCases,
            CatalogSource::Agents,
            CatalogSource::Workflows,
            CatalogSource::Training,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CatalogSource::UseCases => "use_cases",
            CatalogSource::Agents => "agents",
            CatalogSource::Workflows => "workflows",
            CatalogSource::Training => "training",
        }
    }

    /// Path segment used by the dashboard and the HTTP API.
    pub fn slug(self) -> &'static str {
        match self {
            CatalogSource::UseCases => "use-cases",
            CatalogSource::Agents => "agents",
            CatalogSource::Workflows => "workflows",
            CatalogSource::Training => "training",
        }
    }

    pub fn category(self) -> ItemCategory {
        match self {
            CatalogSource::UseCases => ItemCategory::UseCase,
            CatalogSource::Agents => ItemCategory::Agent,
            CatalogSource::Workflows => ItemCategory::Workflow,
            CatalogSource::Training => ItemCategory::Training,
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for CatalogSource {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "use_cases" | "use_case" => Ok(CatalogSource::UseCases),
            "agents" | "agent" => Ok(CatalogSource::Agents),
            "workflows" | "workflow" => Ok(CatalogSource::Workflows),
            "training" => Ok(CatalogSource::Training),
            _ => Err(ReadinessError::InvalidSource(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RoadmapStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStatus {
    ToPlan,
    Ready,
    InProgress,
    Testing,
    Completed,
    OnHold,
}

impl RoadmapStatus {
    /// Kanban column order.
    pub fn all() -> &'static [RoadmapStatus] {
        &[
            RoadmapStatus::ToPlan,
            RoadmapStatus::Ready,
            RoadmapStatus::InProgress,
            RoadmapStatus::Testing,
            RoadmapStatus::Completed,
            RoadmapStatus::OnHold,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RoadmapStatus::ToPlan => "to_plan",
            RoadmapStatus::Ready => "ready",
            RoadmapStatus::InProgress => "in_progress",
            RoadmapStatus::Testing => "testing",
            RoadmapStatus::Completed => "completed",
            RoadmapStatus::OnHold => "on_hold",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RoadmapStatus::ToPlan => "To Plan",
            RoadmapStatus::Ready => "Ready",
            RoadmapStatus::InProgress => "In Progress",
            RoadmapStatus::Testing => "Testing",
            RoadmapStatus::Completed => "Completed",
            RoadmapStatus::OnHold => "On Hold",
        }
    }
}

impl fmt::Display for RoadmapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RoadmapStatus {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "to_plan" => Ok(RoadmapStatus::ToPlan),
            "ready" => Ok(RoadmapStatus::Ready),
            "in_progress" => Ok(RoadmapStatus::InProgress),
            "testing" => Ok(RoadmapStatus::Testing),
            "completed" => Ok(RoadmapStatus::Completed),
            "on_hold" => Ok(RoadmapStatus::OnHold),
            _ => Err(ReadinessError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn all() -> &'static [Priority] {
        &[
            Priority::Critical,
            Priority::High,
            Priority::Medium,
            Priority::Low,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Priority {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "critical" => Ok(Priority::Critical),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ReadinessError::InvalidPriority(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Complexity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Complexity {
    type Err = ReadinessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "low" => Ok(Complexity::Low),
            "medium" => Ok(Complexity::Medium),
            "high" => Ok(Complexity::High),
            _ => Err(ReadinessError::InvalidComplexity(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Pillar
// ---------------------------------------------------------------------------

/// One of the five AI-readiness dimensions scored in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    DataFoundation,
    AiStrategy,
    Technology,
    TalentCulture,
    Governance,
}

impl Pillar {
    pub fn all() -> &'static [Pillar] {
        &[
            Pillar::DataFoundation,
            Pillar::AiStrategy,
            Pillar::Technology,
            Pillar::TalentCulture,
            Pillar::Governance,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Pillar::DataFoundation => "data_foundation",
            Pillar::AiStrategy => "ai_strategy",
            Pillar::Technology => "technology",
            Pillar::TalentCulture => "talent_culture",
            Pillar::Governance => "governance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Pillar::DataFoundation => "Data Foundation",
            Pillar::AiStrategy => "AI Strategy",
            Pillar::Technology => "Technology",
            Pillar::TalentCulture => "Talent & Culture",
            Pillar::Governance => "Governance",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_accepts_label_and_wire_forms() {
        for status in RoadmapStatus::all() {
            assert_eq!(RoadmapStatus::from_str(status.as_str()).unwrap(), *status);
            assert_eq!(RoadmapStatus::from_str(status.label()).unwrap(), *status);
        }
        assert_eq!(
            RoadmapStatus::from_str("in-progress").unwrap(),
            RoadmapStatus::InProgress
        );
        assert!(RoadmapStatus::from_str("done").is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&RoadmapStatus::OnHold).unwrap();
        assert_eq!(json, "\"on_hold\"");
    }

    #[test]
    fn source_accepts_kebab_alias() {
        let parsed: CatalogSource = serde_json::from_str("\"use-cases\"").unwrap();
        assert_eq!(parsed, CatalogSource::UseCases);
        assert_eq!(
            CatalogSource::from_str("use-cases").unwrap(),
            CatalogSource::UseCases
        );
        assert_eq!(CatalogSource::Workflows.category(), ItemCategory::Workflow);
    }

    #[test]
    fn complexity_is_ordered() {
        assert!(Complexity::Low < Complexity::Medium);
        assert!(Complexity::Medium < Complexity::High);
    }

    #[test]
    fn pillar_labels() {
        assert_eq!(Pillar::all().len(), 5);
        assert_eq!(Pillar::TalentCulture.label(), "Talent & Culture");
    }

    #[test]
    fn category_parses_label() {
        assert_eq!(
            ItemCategory::from_str("Use Case").unwrap(),
            ItemCategory::UseCase
        );
        assert!(ItemCategory::from_str("gadget").is_err());
    }
}
