use crate::catalog::CatalogEntry;
use crate::error::Result;
use crate::filter::roi_floor_percent;
use crate::paths;
use crate::types::{CatalogSource, ItemCategory, Priority, RoadmapStatus};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, Weak};

// ---------------------------------------------------------------------------
// RoadmapItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ItemCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CatalogSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_id: Option<String>,
    pub status: RoadmapStatus,
    pub priority: Priority,
    /// Percent complete, always within 0..=100.
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub implementation_steps: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

/// Fields supplied when creating an item. Id, timestamps and progress are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRoadmapItem {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub source: Option<CatalogSource>,
    #[serde(default)]
    pub source_id: Option<String>,
    #[serde(default)]
    pub status: Option<RoadmapStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub implementation_steps: Vec<String>,
    #[serde(default)]
    pub success_metrics: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl NewRoadmapItem {
    pub fn new(title: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category,
            source: None,
            source_id: None,
            status: None,
            priority: None,
            assignees: Vec::new(),
            prerequisites: Vec::new(),
            implementation_steps: Vec::new(),
            success_metrics: Vec::new(),
            dependencies: Vec::new(),
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    /// The "add to roadmap" action on a catalog card.
    pub fn from_catalog(entry: &CatalogEntry<'_>) -> Self {
        let source = entry.source();
        let mut item = Self::new(entry.title(), source.category());
        item.description = entry.description().to_string();
        item.source = Some(source);
        item.source_id = Some(entry.id().to_string());
        item.tags = entry.tags().to_vec();

        match entry {
            CatalogEntry::UseCase(uc) => {
                item.prerequisites = uc.prerequisites.clone();
                item.implementation_steps = uc.implementation_steps.clone();
                item.success_metrics = uc.success_metrics.clone();
                let high_roi = roi_floor_percent(&uc.roi).is_some_and(|floor| floor >= 200);
                item.priority = Some(if high_roi {
                    Priority::High
                } else {
                    Priority::Medium
                });
            }
            CatalogEntry::Agent(agent) => {
                item.implementation_steps = agent
                    .integrations
                    .iter()
                    .map(|i| format!("Connect {i}"))
                    .collect();
                item.success_metrics = agent.capabilities.clone();
                item.priority = Some(Priority::Medium);
            }
            CatalogEntry::Workflow(wf) => {
                item.implementation_steps = wf.steps.clone();
                item.success_metrics = vec![wf.time_savings.clone()];
                item.prerequisites = wf.tools.clone();
                item.priority = Some(Priority::Medium);
            }
            CatalogEntry::Training(course) => {
                item.implementation_steps = course.modules.clone();
                item.assignees = vec![course.audience.clone()];
                item.priority = Some(Priority::Low);
            }
        }
        item
    }
}

/// Partial update. Every `Some` field replaces the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<ItemCategory>,
    #[serde(default)]
    pub status: Option<RoadmapStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Clamped to 100.
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    #[serde(default)]
    pub prerequisites: Option<Vec<String>>,
    #[serde(default)]
    pub implementation_steps: Option<Vec<String>>,
    #[serde(default)]
    pub success_metrics: Option<Vec<String>>,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl RoadmapPatch {
    pub fn status(status: RoadmapStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn apply_to(self, item: &mut RoadmapItem) {
        if let Some(v) = self.title {
            item.title = v;
        }
        if let Some(v) = self.description {
            item.description = v;
        }
        if let Some(v) = self.category {
            item.category = v;
        }
        if let Some(v) = self.status {
            item.status = v;
        }
        if let Some(v) = self.priority {
            item.priority = v;
        }
        if let Some(v) = self.progress {
            item.progress = v.min(100);
        }
        if let Some(v) = self.assignees {
            item.assignees = v;
        }
        if let Some(v) = self.prerequisites {
            item.prerequisites = v;
        }
        if let Some(v) = self.implementation_steps {
            item.implementation_steps = v;
        }
        if let Some(v) = self.success_metrics {
            item.success_metrics = v;
        }
        if let Some(v) = self.dependencies {
            item.dependencies = v;
        }
        if let Some(v) = self.tags {
            item.tags = v;
        }
        if let Some(v) = self.notes {
            item.notes = v;
        }
    }
}

/// Advance `updated_at` to now, and strictly past its previous value even
/// when the clock has not moved.
fn touch(item: &mut RoadmapItem) {
    let now = Utc::now();
    item.updated_at = if now > item.updated_at {
        now
    } else {
        item.updated_at + Duration::microseconds(1)
    };
}

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum RoadmapChange {
    Added(String),
    Updated(String),
    Removed(String),
}

impl RoadmapChange {
    pub fn id(&self) -> &str {
        match self {
            RoadmapChange::Added(id) | RoadmapChange::Updated(id) | RoadmapChange::Removed(id) => {
                id
            }
        }
    }
}

type Listener = Arc<dyn Fn(&RoadmapChange, &[RoadmapItem]) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Listener)>,
}

/// Handle returned by [`RoadmapStore::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut reg = registry.lock().unwrap_or_else(PoisonError::into_inner);
            reg.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}

// ---------------------------------------------------------------------------
// RoadmapStore
// ---------------------------------------------------------------------------

/// In-memory registry of roadmap items shared by every dashboard view.
///
/// Constructed by its owner and handed to consumers; there is no global
/// instance. All operations are synchronous. Listeners run after each applied
/// mutation, in registration order, and receive the new collection.
#[derive(Default)]
pub struct RoadmapStore {
    items: Vec<RoadmapItem>,
    registry: Arc<Mutex<Registry>>,
}

impl RoadmapStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<RoadmapItem>) -> Self {
        Self {
            items,
            registry: Arc::default(),
        }
    }

    pub fn items(&self) -> &[RoadmapItem] {
        &self.items
    }

    pub fn get(&self, id: &str) -> Option<&RoadmapItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn add_item(&mut self, new: NewRoadmapItem) -> RoadmapItem {
        let now = Utc::now();
        let mut id = format!("rm-{}", uuid::Uuid::new_v4().simple());
        while self.get(&id).is_some() {
            id = format!("rm-{}", uuid::Uuid::new_v4().simple());
        }
        let item = RoadmapItem {
            id,
            title: new.title,
            description: new.description,
            category: new.category,
            source: new.source,
            source_id: new.source_id,
            status: new.status.unwrap_or(RoadmapStatus::ToPlan),
            priority: new.priority.unwrap_or(Priority::Medium),
            progress: 0,
            created_at: now,
            updated_at: now,
            assignees: new.assignees,
            prerequisites: new.prerequisites,
            implementation_steps: new.implementation_steps,
            success_metrics: new.success_metrics,
            dependencies: new.dependencies,
            tags: new.tags,
            notes: new.notes,
        };
        tracing::debug!(id = %item.id, title = %item.title, "roadmap item added");
        self.items.push(item.clone());
        self.notify(RoadmapChange::Added(item.id.clone()));
        item
    }

    /// Merge `patch` into the item. Unknown ids are a no-op returning `None`.
    pub fn update_item(&mut self, id: &str, patch: RoadmapPatch) -> Option<RoadmapItem> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        patch.apply_to(item);
        touch(item);
        let updated = item.clone();
        tracing::debug!(id, status = %updated.status, "roadmap item updated");
        self.notify(RoadmapChange::Updated(id.to_string()));
        Some(updated)
    }

    /// Remove the item. Unknown ids are a no-op returning `None`.
    pub fn remove_item(&mut self, id: &str) -> Option<RoadmapItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let removed = self.items.remove(pos);
        tracing::debug!(id, "roadmap item removed");
        self.notify(RoadmapChange::Removed(id.to_string()));
        Some(removed)
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&RoadmapChange, &[RoadmapItem]) + Send + Sync + 'static,
    {
        let mut reg = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        reg.next_id += 1;
        let id = reg.next_id;
        reg.listeners.push((id, Arc::new(listener)));
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .len()
    }

    fn notify(&self, change: RoadmapChange) {
        // Snapshot first so listeners may subscribe or unsubscribe.
        let listeners: Vec<Listener> = self
            .registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .listeners
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(&change, &self.items);
        }
    }

    // -----------------------------------------------------------------------
    // Board
    // -----------------------------------------------------------------------

    /// One column per status in kanban order, empty columns included.
    pub fn board(&self, filter: &RoadmapFilter) -> Vec<BoardColumn> {
        RoadmapStatus::all()
            .iter()
            .map(|status| BoardColumn {
                status: *status,
                label: status.label().to_string(),
                items: self
                    .items
                    .iter()
                    .filter(|i| i.status == *status && filter.matches(i))
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    pub fn filtered(&self, filter: &RoadmapFilter) -> Vec<&RoadmapItem> {
        self.items.iter().filter(|i| filter.matches(i)).collect()
    }

    // -----------------------------------------------------------------------
    // Persistence
    // -----------------------------------------------------------------------

    /// Load the snapshot at `.readiness/roadmap.yaml`. Missing file → empty store.
    pub fn load(root: &Path) -> Result<Self> {
        Ok(Self::with_items(RoadmapSnapshot::load(root)?.items))
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        RoadmapSnapshot::save(root, &self.items)
    }
}

impl std::fmt::Debug for RoadmapStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoadmapStore")
            .field("items", &self.items.len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardColumn {
    pub status: RoadmapStatus,
    pub label: String,
    pub items: Vec<RoadmapItem>,
}

// ---------------------------------------------------------------------------
// RoadmapFilter
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapFilter {
    #[serde(default)]
    pub status: Option<RoadmapStatus>,
    #[serde(default)]
    pub category: Option<ItemCategory>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub search: Option<String>,
}

impl RoadmapFilter {
    pub fn matches(&self, item: &RoadmapItem) -> bool {
        if self.status.is_some_and(|s| s != item.status) {
            return false;
        }
        if self.category.is_some_and(|c| c != item.category) {
            return false;
        }
        if self.priority.is_some_and(|p| p != item.priority) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            Some(q) if !q.is_empty() => {
                let q = q.to_lowercase();
                item.title.to_lowercase().contains(&q)
                    || item.description.to_lowercase().contains(&q)
                    || item.tags.iter().any(|t| t.to_lowercase().contains(&q))
            }
            _ => true,
        }
    }
}

// ---------------------------------------------------------------------------
// RoadmapSnapshot
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoadmapSnapshot {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub items: Vec<RoadmapItem>,
}

fn default_version() -> u32 {
    1
}

impl RoadmapSnapshot {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::roadmap_path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        let snapshot: RoadmapSnapshot = serde_yaml::from_str(&data)?;
        Ok(snapshot)
    }

    pub fn save(root: &Path, items: &[RoadmapItem]) -> Result<()> {
        let snapshot = RoadmapSnapshot {
            version: 1,
            items: items.to_vec(),
        };
        let data = serde_yaml::to_string(&snapshot)?;
        crate::io::atomic_write(&paths::roadmap_path(root), data.as_bytes())
    }

    /// Move the current snapshot to `roadmap.yaml.bak`, replacing any older
    /// backup. Returns the backup path.
    pub fn set_aside(root: &Path) -> Result<PathBuf> {
        let backup = paths::roadmap_backup_path(root);
        std::fs::rename(paths::roadmap_path(root), &backup)?;
        Ok(backup)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
