//! Catalog filtering.
//!
//! Filters are plain data (`FilterKind`) evaluated by a single dispatcher, so
//! dashboard tabs, query strings and CLI flags all describe membership the
//! same way and can be serialized, compared and tested.

use crate::types::Complexity;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Filterable
// ---------------------------------------------------------------------------

/// Fields the dispatcher can inspect on a catalog record.
pub trait Filterable {
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn tags(&self) -> &[String];

    fn industries(&self) -> &[String] {
        &[]
    }

    fn department(&self) -> Option<&str> {
        None
    }

    fn complexity(&self) -> Option<Complexity> {
        None
    }

    fn roi(&self) -> Option<&str> {
        None
    }
}

static ROI_RE: OnceLock<Regex> = OnceLock::new();

/// Lower bound of a ROI range like "150-250%" or "120%+".
pub fn roi_floor_percent(roi: &str) -> Option<u32> {
    let re = ROI_RE.get_or_init(|| Regex::new(r"(\d+)").unwrap());
    re.captures(roi)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// ---------------------------------------------------------------------------
// FilterKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterKind {
    /// Case-insensitive substring over title, description and tags.
    Search(String),
    Industry(String),
    Department(String),
    Complexity(Complexity),
    MaxComplexity(Complexity),
    Tag(String),
    MinRoiPercent(u32),
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Evaluate one filter against one record.
pub fn matches(item: &dyn Filterable, filter: &FilterKind) -> bool {
    match filter {
        FilterKind::Search(q) => {
            let q = q.trim().to_lowercase();
            if q.is_empty() {
                return true;
            }
            contains_ci(item.title(), &q)
                || contains_ci(item.description(), &q)
                || item.tags().iter().any(|t| contains_ci(t, &q))
        }
        FilterKind::Industry(industry) => item
            .industries()
            .iter()
            .any(|i| i.eq_ignore_ascii_case(industry) || i == "Cross-Industry"),
        FilterKind::Department(dept) => item
            .department()
            .is_some_and(|d| d.eq_ignore_ascii_case(dept)),
        FilterKind::Complexity(c) => item.complexity() == Some(*c),
        FilterKind::MaxComplexity(max) => item.complexity().is_some_and(|c| c <= *max),
        FilterKind::Tag(tag) => item.tags().iter().any(|t| t.eq_ignore_ascii_case(tag)),
        FilterKind::MinRoiPercent(min) => item
            .roi()
            .and_then(roi_floor_percent)
            .is_some_and(|floor| floor >= *min),
    }
}

// ---------------------------------------------------------------------------
// CatalogQuery
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Keep catalog order.
    #[default]
    Catalog,
    Title,
    Complexity,
    /// Highest ROI first.
    Roi,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "catalog" | "default" => Ok(SortKey::Catalog),
            "title" | "name" => Ok(SortKey::Title),
            "complexity" => Ok(SortKey::Complexity),
            "roi" => Ok(SortKey::Roi),
            other => Err(format!("unknown sort key '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub filters: Vec<FilterKind>,
    #[serde(default)]
    pub sort: SortKey,
}

/// "All", blank and missing values mean "no filter" in the dashboard selects.
fn selected(params: &HashMap<String, String>, key: &str) -> Option<String> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
        .map(str::to_string)
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, filter: FilterKind) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Build a query from request parameters: `q`, `industry`, `department`,
    /// `complexity`, `tag`, `category` (a use-case tab id), and `sort`.
    /// Unparseable complexity, category or sort values are ignored.
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let mut query = Self::new();
        if let Some(q) = selected(params, "q").or_else(|| selected(params, "search")) {
            query.filters.push(FilterKind::Search(q));
        }
        if let Some(industry) = selected(params, "industry") {
            query.filters.push(FilterKind::Industry(industry));
        }
        if let Some(dept) = selected(params, "department") {
            query.filters.push(FilterKind::Department(dept));
        }
        if let Some(c) = selected(params, "complexity").and_then(|c| c.parse().ok()) {
            query.filters.push(FilterKind::Complexity(c));
        }
        if let Some(tag) = selected(params, "tag") {
            query.filters.push(FilterKind::Tag(tag));
        }
        if let Some(tab) = selected(params, "category").and_then(|id| category_tab(&id)) {
            if let Some(f) = tab.filter {
                query.filters.push(f);
            }
        }
        if let Some(sort) = selected(params, "sort").and_then(|s| s.parse().ok()) {
            query.sort = sort;
        }
        query
    }

    pub fn matches(&self, item: &dyn Filterable) -> bool {
        self.filters.iter().all(|f| matches(item, f))
    }

    /// Filter then sort. Linear scan; the catalogs hold tens of records.
    pub fn apply<'a, T: Filterable>(&self, items: &'a [T]) -> Vec<&'a T> {
        let mut out: Vec<&T> = items.iter().filter(|i| self.matches(*i)).collect();
        match self.sort {
            SortKey::Catalog => {}
            SortKey::Title => out.sort_by_key(|i| i.title().to_lowercase()),
            SortKey::Complexity => out.sort_by_key(|i| i.complexity()),
            SortKey::Roi => out.sort_by(|a, b| {
                let ra = a.roi().and_then(roi_floor_percent);
                let rb = b.roi().and_then(roi_floor_percent);
                rb.cmp(&ra)
            }),
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Use-case category tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTab {
    pub id: String,
    pub label: String,
    /// `None` is the "All" tab.
    pub filter: Option<FilterKind>,
}

pub fn use_case_categories() -> Vec<CategoryTab> {
    let tab = |id: &str, label: &str, filter: Option<FilterKind>| CategoryTab {
        id: id.to_string(),
        label: label.to_string(),
        filter,
    };
    vec![
        tab("all", "All Use Cases", None),
        tab(
            "quick-wins",
            "Quick Wins",
            Some(FilterKind::MaxComplexity(Complexity::Low)),
        ),
        tab("high-roi", "High ROI", Some(FilterKind::MinRoiPercent(200))),
        tab(
            "customer-service",
            "Customer Service",
            Some(FilterKind::Department("Customer Service".to_string())),
        ),
        tab(
            "operations",
            "Operations",
            Some(FilterKind::Department("Operations".to_string())),
        ),
        tab(
            "compliance",
            "Compliance",
            Some(FilterKind::Department("Legal & Compliance".to_string())),
        ),
    ]
}

pub fn category_tab(id: &str) -> Option<CategoryTab> {
    use_case_categories().into_iter().find(|t| t.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{agent_templates, use_cases};

    fn ids<T: Filterable>(items: &[&T], id: impl Fn(&T) -> &str) -> Vec<String> {
        items.iter().map(|i| id(*i).to_string()).collect()
    }

    #[test]
    fn gdpr_search_matches_title_description_or_tags_only() {
        let query = CatalogQuery::new().with(FilterKind::Search("GDPR".to_string()));
        let hits = query.apply(use_cases());
        assert!(!hits.is_empty());
        for uc in &hits {
            let in_title = uc.title.to_lowercase().contains("gdpr");
            let in_desc = uc.description.to_lowercase().contains("gdpr");
            let in_tags = uc.tags.iter().any(|t| t.to_lowercase().contains("gdpr"));
            assert!(in_title || in_desc || in_tags, "{} should not match", uc.id);
        }
        let hit_ids = ids(&hits, |u| u.id.as_str());
        for uc in use_cases() {
            let expected = uc.title.to_lowercase().contains("gdpr")
                || uc.description.to_lowercase().contains("gdpr")
                || uc.tags.iter().any(|t| t.to_lowercase().contains("gdpr"));
            assert_eq!(hit_ids.contains(&uc.id), expected, "{}", uc.id);
        }
        // One hit per field: title, description, tags.
        assert!(hit_ids.contains(&"gdpr-data-discovery".to_string()));
        assert!(hit_ids.contains(&"dsar-automation".to_string()));
        assert!(hit_ids.contains(&"contract-review".to_string()));
    }

    #[test]
    fn blank_search_matches_everything() {
        let query = CatalogQuery::new().with(FilterKind::Search("   ".to_string()));
        assert_eq!(query.apply(use_cases()).len(), use_cases().len());
    }

    #[test]
    fn filters_are_anded() {
        let query = CatalogQuery::new()
            .with(FilterKind::Department("Legal & Compliance".to_string()))
            .with(FilterKind::Industry("Healthcare".to_string()));
        let hits = query.apply(use_cases());
        assert_eq!(ids(&hits, |u| u.id.as_str()), vec!["gdpr-data-discovery"]);
    }

    #[test]
    fn cross_industry_matches_any_industry() {
        let query = CatalogQuery::new().with(FilterKind::Industry("Energy".to_string()));
        let hit_ids = ids(&query.apply(use_cases()), |u| u.id.as_str());
        assert!(hit_ids.contains(&"predictive-maintenance".to_string()));
        assert!(hit_ids.contains(&"hr-onboarding-assistant".to_string()));
    }

    #[test]
    fn roi_floor_parses_ranges() {
        assert_eq!(roi_floor_percent("150-250%"), Some(150));
        assert_eq!(roi_floor_percent("120%+"), Some(120));
        assert_eq!(roi_floor_percent("n/a"), None);
    }

    #[test]
    fn high_roi_tab_and_roi_sort() {
        let tab = category_tab("high-roi").unwrap();
        let query = CatalogQuery::new()
            .with(tab.filter.unwrap())
            .sorted_by(SortKey::Roi);
        let hits = query.apply(use_cases());
        assert_eq!(
            ids(&hits, |u| u.id.as_str()),
            vec!["predictive-maintenance", "invoice-processing"]
        );
    }

    #[test]
    fn from_params_drops_all_and_blank() {
        let mut params = HashMap::new();
        params.insert("industry".to_string(), "all".to_string());
        params.insert("department".to_string(), "".to_string());
        params.insert("complexity".to_string(), "low".to_string());
        params.insert("sort".to_string(), "title".to_string());
        let query = CatalogQuery::from_params(&params);
        assert_eq!(query.filters, vec![FilterKind::Complexity(Complexity::Low)]);
        assert_eq!(query.sort, SortKey::Title);
    }

    #[test]
    fn from_params_expands_category_tab() {
        let mut params = HashMap::new();
        params.insert("category".to_string(), "quick-wins".to_string());
        let query = CatalogQuery::from_params(&params);
        for uc in query.apply(use_cases()) {
            assert_eq!(uc.complexity, Complexity::Low);
        }
    }

    #[test]
    fn agent_search_uses_name() {
        let query = CatalogQuery::new().with(FilterKind::Search("helpdesk".to_string()));
        let hits = query.apply(agent_templates());
        assert_eq!(ids(&hits, |a| a.id.as_str()), vec!["it-helpdesk-agent"]);
    }

    #[test]
    fn filter_kind_serializes_tagged() {
        let json = serde_json::to_value(FilterKind::MinRoiPercent(200)).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "min_roi_percent", "value": 200 }));
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let query = CatalogQuery::new().with(FilterKind::Search("quantum blockchain".to_string()));
        assert!(query.apply(use_cases()).is_empty());
    }
}
