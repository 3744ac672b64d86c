use crate::error::ReadinessError;
use crate::storage::{KeyValueStore, RECENT_SEARCHES_KEY};
use serde::Serialize;

/// Most-recent-first list of catalog search queries, capped at `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentSearches {
    queries: Vec<String>,
    #[serde(skip)]
    limit: usize,
}

impl RecentSearches {
    pub fn new(limit: usize) -> Self {
        Self {
            queries: Vec::new(),
            limit,
        }
    }

    /// Read the stored list. A missing, unreadable or malformed value yields
    /// an empty list.
    pub fn load(store: &dyn KeyValueStore, limit: usize) -> Self {
        let mut queries = match store.get(RECENT_SEARCHES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
                Ok(q) => q,
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring malformed recent searches");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read recent searches");
                Vec::new()
            }
        };
        queries.truncate(limit);
        Self { queries, limit }
    }

    pub fn queries(&self) -> &[String] {
        &self.queries
    }

    pub fn record(&mut self, store: &dyn KeyValueStore, query: &str) {
        let query = query.trim();
        if query.is_empty() || self.limit == 0 {
            return;
        }
        let folded = query.to_lowercase();
        self.queries.retain(|q| q.to_lowercase() != folded);
        self.queries.insert(0, query.to_string());
        self.queries.truncate(self.limit);
        self.persist(store);
    }

    pub fn clear(&mut self, store: &dyn KeyValueStore) {
        self.queries.clear();
        if let Err(e) = store.remove(RECENT_SEARCHES_KEY) {
            tracing::warn!(error = %e, "failed to clear recent searches");
        }
    }

    fn persist(&self, store: &dyn KeyValueStore) {
        let result = serde_json::to_string(&self.queries)
            .map_err(ReadinessError::from)
            .and_then(|json| store.set(RECENT_SEARCHES_KEY, &json));
        if let Err(e) = result {
            tracing::warn!(error = %e, "failed to save recent searches");
        }
    }
}
