//! Static, read-only catalog data: use cases, agent and workflow templates,
//! training courses, the resource hub, and admin sample data.
//!
//! Records are built once on first access and never mutated. Roadmap items
//! point back into this data through `(CatalogSource, id)`.

pub mod admin;
pub mod agents;
pub mod resources;
pub mod training;
pub mod use_cases;
pub mod workflows;

pub use agents::{agent_templates, AgentTemplate};
pub use resources::{resources, Resource, ResourceKind};
pub use training::{training_courses, TrainingCourse, TrainingLevel};
pub use use_cases::{use_cases, UseCase};
pub use workflows::{workflow_templates, WorkflowTemplate};

use crate::error::{ReadinessError, Result};
use crate::filter::Filterable;
use crate::types::CatalogSource;
use serde::Serialize;

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ---------------------------------------------------------------------------
// CatalogEntry
// ---------------------------------------------------------------------------

/// A record from any of the catalogs a roadmap item can originate from.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(tag = "source")]
pub enum CatalogEntry<'a> {
    #[serde(rename = "use_cases")]
    UseCase(&'a UseCase),
    #[serde(rename = "agents")]
    Agent(&'a AgentTemplate),
    #[serde(rename = "workflows")]
    Workflow(&'a WorkflowTemplate),
    #[serde(rename = "training")]
    Training(&'a TrainingCourse),
}

impl<'a> CatalogEntry<'a> {
    pub fn source(&self) -> CatalogSource {
        match self {
            CatalogEntry::UseCase(_) => CatalogSource::UseCases,
            CatalogEntry::Agent(_) => CatalogSource::Agents,
            CatalogEntry::Workflow(_) => CatalogSource::Workflows,
            CatalogEntry::Training(_) => CatalogSource::Training,
        }
    }

    pub fn id(&self) -> &'a str {
        match self {
            CatalogEntry::UseCase(uc) => &uc.id,
            CatalogEntry::Agent(a) => &a.id,
            CatalogEntry::Workflow(w) => &w.id,
            CatalogEntry::Training(t) => &t.id,
        }
    }

    fn filterable(&self) -> &'a dyn Filterable {
        match self {
            CatalogEntry::UseCase(uc) => *uc,
            CatalogEntry::Agent(a) => *a,
            CatalogEntry::Workflow(w) => *w,
            CatalogEntry::Training(t) => *t,
        }
    }

    pub fn title(&self) -> &'a str {
        self.filterable().title()
    }

    pub fn description(&self) -> &'a str {
        self.filterable().description()
    }

    pub fn tags(&self) -> &'a [String] {
        self.filterable().tags()
    }
}

/// All entries of one catalog, in catalog order.
pub fn entries(source: CatalogSource) -> Vec<CatalogEntry<'static>> {
    match source {
        CatalogSource::UseCases => use_cases().iter().map(CatalogEntry::UseCase).collect(),
        CatalogSource::Agents => agent_templates().iter().map(CatalogEntry::Agent).collect(),
        CatalogSource::Workflows => workflow_templates()
            .iter()
            .map(CatalogEntry::Workflow)
            .collect(),
        CatalogSource::Training => training_courses()
            .iter()
            .map(CatalogEntry::Training)
            .collect(),
    }
}

/// Look up the record a roadmap item's `(source, source_id)` refers to.
pub fn resolve(source: CatalogSource, id: &str) -> Result<CatalogEntry<'static>> {
    let found = match source {
        CatalogSource::UseCases => use_cases()
            .iter()
            .find(|uc| uc.id == id)
            .map(CatalogEntry::UseCase),
        CatalogSource::Agents => agent_templates()
            .iter()
            .find(|a| a.id == id)
            .map(CatalogEntry::Agent),
        CatalogSource::Workflows => workflow_templates()
            .iter()
            .find(|w| w.id == id)
            .map(CatalogEntry::Workflow),
        CatalogSource::Training => training_courses()
            .iter()
            .find(|t| t.id == id)
            .map(CatalogEntry::Training),
    };
    found.ok_or_else(|| ReadinessError::CatalogEntryNotFound {
        source_name: source.slug().to_string(),
        id: id.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::validate_id;
    use std::collections::HashSet;

    #[test]
    fn every_catalog_is_populated() {
        for source in CatalogSource::all() {
            assert!(!entries(*source).is_empty(), "{source} is empty");
        }
        assert!(!resources().is_empty());
    }

    #[test]
    fn ids_unique_within_each_source() {
        for source in CatalogSource::all() {
            let mut seen = HashSet::new();
            for entry in entries(*source) {
                validate_id(entry.id()).unwrap();
                assert!(seen.insert(entry.id()), "duplicate {source}/{}", entry.id());
            }
        }
    }

    #[test]
    fn resolve_finds_each_entry() {
        for source in CatalogSource::all() {
            for entry in entries(*source) {
                let found = resolve(*source, entry.id()).unwrap();
                assert_eq!(found.source(), *source);
                assert_eq!(found.title(), entry.title());
            }
        }
    }

    #[test]
    fn resolve_unknown_id_errors() {
        let err = resolve(CatalogSource::Agents, "does-not-exist").unwrap_err();
        assert!(matches!(err, ReadinessError::CatalogEntryNotFound { .. }));
    }

    #[test]
    fn entry_serializes_with_source_tag() {
        let entry = resolve(CatalogSource::Workflows, "invoice-approval-flow").unwrap();
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["source"], "workflows");
        assert_eq!(json["id"], "invoice-approval-flow");
    }
}
