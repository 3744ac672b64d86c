use axum::extract::{Query, State};
use axum::Json;
use readiness_core::catalog;
use readiness_core::filter::{CatalogQuery, FilterKind};

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// GET /api/search?q=<query>: search use cases and remember the query.
pub async fn search(
    State(app): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let result = tokio::task::spawn_blocking(move || {
        let query = CatalogQuery::new().with(FilterKind::Search(params.q.clone()));
        let results = query.apply(catalog::use_cases());

        let recent = {
            let mut recent = app.lock_recent();
            recent.record(app.storage.as_ref(), &params.q);
            recent.queries().to_vec()
        };

        serde_json::json!({
            "query": params.q,
            "count": results.len(),
            "results": results,
            "recent": recent,
        })
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    Ok(Json(result))
}

/// GET /api/search/recent
pub async fn recent_searches(State(app): State<AppState>) -> Json<serde_json::Value> {
    let queries = app.lock_recent().queries().to_vec();
    Json(serde_json::json!(queries))
}

/// DELETE /api/search/recent
pub async fn clear_recent_searches(
    State(app): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    tokio::task::spawn_blocking(move || {
        app.lock_recent().clear(app.storage.as_ref());
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    Ok(Json(serde_json::json!({ "cleared": true })))
}
