use crate::output::{print_json, print_table, truncate};
use clap::{Args, Subcommand};
use readiness_core::{
    catalog::{self, CatalogEntry},
    filter::{self, CatalogQuery, FilterKind},
    recent::RecentSearches,
    storage::FileStore,
    types::{CatalogSource, Complexity},
};
use std::collections::HashMap;
use std::path::Path;

#[derive(Subcommand)]
pub enum CatalogSubcommand {
    /// List a catalog: use-cases, agents, workflows or training
    List {
        source: CatalogSource,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Show one catalog entry in full
    Show { source: CatalogSource, id: String },
    /// Search use cases and remember the query
    Search { query: String },
    /// Show or clear recent searches
    Recent {
        #[arg(long)]
        clear: bool,
    },
    /// List the use-case category tabs with match counts
    Categories,
}

#[derive(Args, Default)]
pub struct FilterArgs {
    /// Case-insensitive text over title, description and tags
    #[arg(long, short = 'q')]
    pub search: Option<String>,
    #[arg(long)]
    pub industry: Option<String>,
    #[arg(long)]
    pub department: Option<String>,
    /// low, medium or high
    #[arg(long)]
    pub complexity: Option<String>,
    #[arg(long)]
    pub tag: Option<String>,
    /// Use-case tab id (see `readiness catalog categories`)
    #[arg(long)]
    pub category: Option<String>,
    /// catalog, title, complexity or roi
    #[arg(long)]
    pub sort: Option<String>,
}

impl FilterArgs {
    /// Same parameter names as the dashboard query string.
    fn to_query(&self) -> CatalogQuery {
        let pairs = [
            ("q", &self.search),
            ("industry", &self.industry),
            ("department", &self.department),
            ("complexity", &self.complexity),
            ("tag", &self.tag),
            ("category", &self.category),
            ("sort", &self.sort),
        ];
        let params: HashMap<String, String> = pairs
            .into_iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
            .collect();
        CatalogQuery::from_params(&params)
    }
}

pub fn run(root: &Path, subcmd: CatalogSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        CatalogSubcommand::List { source, filters } => list(source, &filters.to_query(), json),
        CatalogSubcommand::Show { source, id } => show(source, &id, json),
        CatalogSubcommand::Search { query } => search(root, &query, json),
        CatalogSubcommand::Recent { clear } => recent(root, clear, json),
        CatalogSubcommand::Categories => categories(json),
    }
}

fn query_entries(source: CatalogSource, query: &CatalogQuery) -> Vec<CatalogEntry<'static>> {
    match source {
        CatalogSource::UseCases => query
            .apply(catalog::use_cases())
            .into_iter()
            .map(CatalogEntry::UseCase)
            .collect(),
        CatalogSource::Agents => query
            .apply(catalog::agent_templates())
            .into_iter()
            .map(CatalogEntry::Agent)
            .collect(),
        CatalogSource::Workflows => query
            .apply(catalog::workflow_templates())
            .into_iter()
            .map(CatalogEntry::Workflow)
            .collect(),
        CatalogSource::Training => query
            .apply(catalog::training_courses())
            .into_iter()
            .map(CatalogEntry::Training)
            .collect(),
    }
}

fn complexity(entry: &CatalogEntry<'_>) -> Complexity {
    match entry {
        CatalogEntry::UseCase(uc) => uc.complexity,
        CatalogEntry::Agent(a) => a.complexity,
        CatalogEntry::Workflow(w) => w.complexity,
        CatalogEntry::Training(t) => t.level.complexity(),
    }
}

/// The headline figure each catalog card shows.
fn headline(entry: &CatalogEntry<'_>) -> String {
    match entry {
        CatalogEntry::UseCase(uc) => format!("ROI {}", uc.roi),
        CatalogEntry::Agent(a) => format!("setup {}", a.setup_time),
        CatalogEntry::Workflow(w) => format!("saves {}", w.time_savings),
        CatalogEntry::Training(t) => format!("{} · {}", t.duration, t.level),
    }
}

fn print_entries(entries: &[CatalogEntry<'_>]) {
    let rows = entries
        .iter()
        .map(|e| {
            vec![
                e.id().to_string(),
                truncate(e.title(), 40),
                complexity(e).to_string(),
                headline(e),
            ]
        })
        .collect();
    print_table(&["ID", "TITLE", "COMPLEXITY", "DETAIL"], rows);
}

fn list(source: CatalogSource, query: &CatalogQuery, json: bool) -> anyhow::Result<()> {
    let entries = query_entries(source, query);
    if json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No {} match the filters.", source.slug());
        return Ok(());
    }
    print_entries(&entries);
    Ok(())
}

fn print_list(label: &str, values: &[String]) {
    if values.is_empty() {
        return;
    }
    println!("\n{label}:");
    for (i, v) in values.iter().enumerate() {
        println!("  {}. {v}", i + 1);
    }
}

fn show(source: CatalogSource, id: &str, json: bool) -> anyhow::Result<()> {
    let entry = catalog::resolve(source, id)?;
    if json {
        return print_json(&entry);
    }

    println!("{}  [{}]", entry.title(), entry.id());
    println!("{}", entry.description());
    println!("Complexity: {}  {}", complexity(&entry), headline(&entry));
    if !entry.tags().is_empty() {
        println!("Tags: {}", entry.tags().join(", "));
    }

    match entry {
        CatalogEntry::UseCase(uc) => {
            println!("Department: {}", uc.department);
            println!("Industries: {}", uc.industries.join(", "));
            println!("Time to value: {}", uc.time_to_value);
            print_list("Prerequisites", &uc.prerequisites);
            print_list("Implementation steps", &uc.implementation_steps);
            print_list("Success metrics", &uc.success_metrics);
        }
        CatalogEntry::Agent(a) => {
            println!("Department: {}", a.department);
            print_list("Capabilities", &a.capabilities);
            print_list("Integrations", &a.integrations);
        }
        CatalogEntry::Workflow(w) => {
            println!("Department: {}", w.department);
            print_list("Steps", &w.steps);
            print_list("Tools", &w.tools);
        }
        CatalogEntry::Training(t) => {
            println!("Format: {}  Audience: {}", t.format, t.audience);
            print_list("Modules", &t.modules);
        }
    }
    Ok(())
}

fn search(root: &Path, query: &str, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let store = FileStore::new(root);
    let mut recent = RecentSearches::load(&store, config.search.recent_limit);
    recent.record(&store, query);

    let q = CatalogQuery::new().with(FilterKind::Search(query.to_string()));
    let entries = query_entries(CatalogSource::UseCases, &q);

    if json {
        return print_json(&serde_json::json!({
            "query": query,
            "count": entries.len(),
            "results": entries,
            "recent": recent.queries(),
        }));
    }
    if entries.is_empty() {
        println!("No use cases match '{query}'.");
        return Ok(());
    }
    print_entries(&entries);
    Ok(())
}

fn recent(root: &Path, clear: bool, json: bool) -> anyhow::Result<()> {
    let config = super::load_config(root)?;
    let store = FileStore::new(root);
    let mut recent = RecentSearches::load(&store, config.search.recent_limit);

    if clear {
        recent.clear(&store);
        if json {
            return print_json(&serde_json::json!({ "cleared": true }));
        }
        println!("Cleared recent searches.");
        return Ok(());
    }

    if json {
        return print_json(&recent.queries());
    }
    if recent.queries().is_empty() {
        println!("No recent searches.");
    }
    for q in recent.queries() {
        println!("{q}");
    }
    Ok(())
}

fn categories(json: bool) -> anyhow::Result<()> {
    let tabs: Vec<(filter::CategoryTab, usize)> = filter::use_case_categories()
        .into_iter()
        .map(|tab| {
            let count = catalog::use_cases()
                .iter()
                .filter(|uc| tab.filter.as_ref().is_none_or(|f| filter::matches(*uc, f)))
                .count();
            (tab, count)
        })
        .collect();

    if json {
        let body: Vec<serde_json::Value> = tabs
            .iter()
            .map(|(tab, count)| {
                serde_json::json!({
                    "id": tab.id,
                    "label": tab.label,
                    "filter": tab.filter,
                    "count": count,
                })
            })
            .collect();
        return print_json(&body);
    }

    let rows = tabs
        .iter()
        .map(|(tab, count)| vec![tab.id.clone(), tab.label.clone(), count.to_string()])
        .collect();
    print_table(&["ID", "LABEL", "COUNT"], rows);
    Ok(())
}
