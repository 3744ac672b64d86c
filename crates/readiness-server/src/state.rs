use readiness_core::assessment::{AssessmentForm, LocalSubmissionService, SubmissionService};
use readiness_core::config::Config;
use readiness_core::recent::RecentSearches;
use readiness_core::roadmap::{RoadmapChange, RoadmapSnapshot, RoadmapStore};
use readiness_core::storage::{FileStore, KeyValueStore};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

/// Pushed to `/api/events` subscribers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    Roadmap { change: RoadmapChange, count: usize },
    AssessmentSubmitted { submission_id: Option<String> },
}

impl ServerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::Roadmap { .. } => "roadmap",
            ServerEvent::AssessmentSubmitted { .. } => "assessment",
        }
    }
}

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub root: PathBuf,
    pub config: Arc<Config>,
    pub roadmap: Arc<Mutex<RoadmapStore>>,
    pub assessment: Arc<Mutex<AssessmentForm>>,
    pub recent: Arc<Mutex<RecentSearches>>,
    pub storage: Arc<dyn KeyValueStore>,
    pub submissions: Arc<dyn SubmissionService>,
    pub event_tx: broadcast::Sender<ServerEvent>,
}

impl AppState {
    pub fn new(root: PathBuf) -> Self {
        let config = Config::load_or_default(&root).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unreadable config, using defaults");
            Config::new("project")
        });
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&root));
        let submissions: Arc<dyn SubmissionService> = Arc::new(LocalSubmissionService::new(&root));
        Self::with_services(root, config, storage, submissions)
    }

    /// Build state around explicit storage and submission backends.
    pub fn with_services(
        root: PathBuf,
        config: Config,
        storage: Arc<dyn KeyValueStore>,
        submissions: Arc<dyn SubmissionService>,
    ) -> Self {
        let (tx, _) = broadcast::channel(64);

        let store = RoadmapStore::load(&root).unwrap_or_else(|e| {
            match RoadmapSnapshot::set_aside(&root) {
                Ok(backup) => tracing::warn!(
                    error = %e,
                    backup = %backup.display(),
                    "unreadable roadmap snapshot moved aside, starting empty"
                ),
                Err(mv) => tracing::warn!(
                    error = %e,
                    rename_error = %mv,
                    "unreadable roadmap snapshot, starting empty"
                ),
            }
            RoadmapStore::new()
        });

        // Persist every applied mutation and fan it out to SSE clients. The
        // subscriptions live as long as the store.
        let snapshot_root = root.clone();
        let _persist = store.subscribe(move |change, items| {
            if let Err(e) = RoadmapSnapshot::save(&snapshot_root, items) {
                tracing::warn!(error = %e, id = change.id(), "failed to save roadmap snapshot");
            }
        });
        let event_tx = tx.clone();
        let _broadcast = store.subscribe(move |change, items| {
            let _ = event_tx.send(ServerEvent::Roadmap {
                change: change.clone(),
                count: items.len(),
            });
        });

        let assessment = AssessmentForm::restore(
            Arc::clone(&storage),
            config.assessment.autosave_debounce(),
        );
        let recent = RecentSearches::load(storage.as_ref(), config.search.recent_limit);

        Self {
            root,
            config: Arc::new(config),
            roadmap: Arc::new(Mutex::new(store)),
            assessment: Arc::new(Mutex::new(assessment)),
            recent: Arc::new(Mutex::new(recent)),
            storage,
            submissions,
            event_tx: tx,
        }
    }

    pub fn lock_roadmap(&self) -> MutexGuard<'_, RoadmapStore> {
        self.roadmap.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lock_assessment(&self) -> MutexGuard<'_, AssessmentForm> {
        self.assessment.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn lock_recent(&self) -> MutexGuard<'_, RecentSearches> {
        self.recent.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_core::roadmap::NewRoadmapItem;
    use readiness_core::types::ItemCategory;

    #[test]
    fn new_state_stores_root() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(dir.path().to_path_buf());
        assert_eq!(state.root, dir.path());
        assert!(state.lock_roadmap().is_empty());
    }

    #[test]
    fn roadmap_mutations_are_persisted_and_broadcast() {
        let dir = tempfile::TempDir::new().unwrap();
        let state = AppState::new(dir.path().to_path_buf());
        let mut rx = state.event_tx.subscribe();

        let item = state
            .lock_roadmap()
            .add_item(NewRoadmapItem::new("Chatbot", ItemCategory::UseCase));

        let reloaded = RoadmapStore::load(dir.path()).unwrap();
        assert_eq!(reloaded.get(&item.id).unwrap().title, "Chatbot");

        match rx.try_recv().unwrap() {
            ServerEvent::Roadmap { change, count } => {
                assert_eq!(change, RoadmapChange::Added(item.id));
                assert_eq!(count, 1);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
