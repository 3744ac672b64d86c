use crate::output::{print_json, print_table, truncate};
use anyhow::Context;
use chrono::{DateTime, Local, Utc};
use clap::Subcommand;
use readiness_core::{
    catalog,
    error::ReadinessError,
    kanban,
    roadmap::{NewRoadmapItem, RoadmapFilter, RoadmapItem, RoadmapPatch, RoadmapStore},
    types::{CatalogSource, ItemCategory, Priority, RoadmapStatus},
};
use std::path::Path;

#[derive(Subcommand)]
pub enum RoadmapSubcommand {
    /// Add an item from scratch
    Add {
        title: String,
        /// use-case, agent, workflow or training
        #[arg(long, default_value = "use-case")]
        category: ItemCategory,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        status: Option<RoadmapStatus>,
        /// Repeatable: --tag gdpr --tag pilot
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Repeatable: --assignee alice --assignee bob
        #[arg(long = "assignee")]
        assignees: Vec<String>,
    },
    /// Add a catalog entry to the roadmap
    AddFrom { source: CatalogSource, id: String },
    /// List items, optionally filtered
    List {
        #[arg(long)]
        status: Option<RoadmapStatus>,
        #[arg(long)]
        category: Option<ItemCategory>,
        #[arg(long)]
        priority: Option<Priority>,
        #[arg(long)]
        search: Option<String>,
    },
    /// Show the kanban board
    Board,
    /// Show one item
    Show { id: String },
    /// Move an item to another board column
    Move { id: String, status: RoadmapStatus },
    /// Update item fields
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        priority: Option<Priority>,
        /// 0-100; larger values are capped
        #[arg(long)]
        progress: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
        /// Replaces the assignee list (repeatable)
        #[arg(long = "assignee")]
        assignees: Vec<String>,
    },
    /// Remove an item
    Remove { id: String },
}

pub fn run(root: &Path, subcmd: RoadmapSubcommand, json: bool) -> anyhow::Result<()> {
    super::load_config(root)?;
    let mut store = RoadmapStore::load(root).context("failed to load roadmap")?;

    match subcmd {
        RoadmapSubcommand::Add {
            title,
            category,
            description,
            priority,
            status,
            tags,
            assignees,
        } => {
            if title.trim().is_empty() {
                anyhow::bail!("title must not be empty");
            }
            let mut new = NewRoadmapItem::new(title, category);
            new.description = description.unwrap_or_default();
            new.priority = priority;
            new.status = status;
            new.tags = tags;
            new.assignees = assignees;
            let item = store.add_item(new);
            save(root, &store)?;
            report_item("Added", &item, json)
        }
        RoadmapSubcommand::AddFrom { source, id } => {
            let entry = catalog::resolve(source, &id)?;
            let item = store.add_item(NewRoadmapItem::from_catalog(&entry));
            save(root, &store)?;
            report_item("Added", &item, json)
        }
        RoadmapSubcommand::List {
            status,
            category,
            priority,
            search,
        } => {
            let filter = RoadmapFilter {
                status,
                category,
                priority,
                search,
            };
            list(&store, &filter, json)
        }
        RoadmapSubcommand::Board => board(&store, json),
        RoadmapSubcommand::Show { id } => show(&store, &id, json),
        RoadmapSubcommand::Move { id, status } => {
            let item = kanban::move_item(&mut store, &id, status)
                .ok_or(ReadinessError::RoadmapItemNotFound(id))?;
            save(root, &store)?;
            report_item("Moved", &item, json)
        }
        RoadmapSubcommand::Update {
            id,
            title,
            description,
            priority,
            progress,
            notes,
            assignees,
        } => {
            let patch = RoadmapPatch {
                title,
                description,
                priority,
                progress,
                notes,
                assignees: (!assignees.is_empty()).then_some(assignees),
                ..RoadmapPatch::default()
            };
            let item = store
                .update_item(&id, patch)
                .ok_or(ReadinessError::RoadmapItemNotFound(id))?;
            save(root, &store)?;
            report_item("Updated", &item, json)
        }
        RoadmapSubcommand::Remove { id } => {
            let item = store
                .remove_item(&id)
                .ok_or(ReadinessError::RoadmapItemNotFound(id))?;
            save(root, &store)?;
            if json {
                return print_json(&serde_json::json!({ "removed": item.id }));
            }
            println!("Removed {} ({})", item.id, item.title);
            Ok(())
        }
    }
}

fn save(root: &Path, store: &RoadmapStore) -> anyhow::Result<()> {
    store.save(root).context("failed to save roadmap")
}

fn report_item(verb: &str, item: &RoadmapItem, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(item);
    }
    println!(
        "{verb} {}: {} [{}]",
        item.id,
        item.title,
        item.status.label()
    );
    Ok(())
}

fn item_row(item: &RoadmapItem) -> Vec<String> {
    vec![
        item.id.clone(),
        truncate(&item.title, 40),
        item.category.label().to_string(),
        item.status.label().to_string(),
        item.priority.to_string(),
        format!("{}%", item.progress),
    ]
}

fn list(store: &RoadmapStore, filter: &RoadmapFilter, json: bool) -> anyhow::Result<()> {
    let items = store.filtered(filter);
    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No roadmap items.");
        return Ok(());
    }
    let rows = items.iter().map(|i| item_row(i)).collect();
    print_table(
        &["ID", "TITLE", "CATEGORY", "STATUS", "PRIORITY", "PROGRESS"],
        rows,
    );
    Ok(())
}

fn board(store: &RoadmapStore, json: bool) -> anyhow::Result<()> {
    let columns = store.board(&RoadmapFilter::default());
    if json {
        return print_json(&columns);
    }
    for column in &columns {
        println!("{} ({})", column.label, column.items.len());
        for item in &column.items {
            println!(
                "  {}  {}  [{}, {}%]",
                item.id, item.title, item.priority, item.progress
            );
        }
    }
    Ok(())
}

fn show(store: &RoadmapStore, id: &str, json: bool) -> anyhow::Result<()> {
    let item = store
        .get(id)
        .ok_or_else(|| ReadinessError::RoadmapItemNotFound(id.to_string()))?;
    if json {
        return print_json(item);
    }

    println!("{}  [{}]", item.title, item.id);
    if !item.description.is_empty() {
        println!("{}", item.description);
    }
    println!(
        "Category: {}  Status: {}  Priority: {}  Progress: {}%",
        item.category.label(),
        item.status.label(),
        item.priority,
        item.progress
    );
    if let (Some(source), Some(source_id)) = (item.source, item.source_id.as_deref()) {
        println!("From: {} / {source_id}", source.slug());
    }
    if !item.assignees.is_empty() {
        println!("Assignees: {}", item.assignees.join(", "));
    }
    if !item.tags.is_empty() {
        println!("Tags: {}", item.tags.join(", "));
    }
    for (label, values) in [
        ("Prerequisites", &item.prerequisites),
        ("Implementation steps", &item.implementation_steps),
        ("Success metrics", &item.success_metrics),
        ("Dependencies", &item.dependencies),
    ] {
        if !values.is_empty() {
            println!("\n{label}:");
            for v in values {
                println!("  - {v}");
            }
        }
    }
    if !item.notes.is_empty() {
        println!("\nNotes: {}", item.notes);
    }
    println!(
        "\nCreated {}  Updated {}",
        local_time(item.created_at),
        local_time(item.updated_at)
    );
    Ok(())
}

fn local_time(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}
