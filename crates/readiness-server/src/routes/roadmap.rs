use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use readiness_core::catalog;
use readiness_core::error::ReadinessError;
use readiness_core::kanban;
use readiness_core::roadmap::{NewRoadmapItem, RoadmapFilter, RoadmapPatch};
use readiness_core::types::{CatalogSource, RoadmapStatus};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/roadmap?status=&category=&priority=&search=
pub async fn list_items(
    State(app): State<AppState>,
    Query(filter): Query<RoadmapFilter>,
) -> Result<Json<serde_json::Value>, AppError> {
    let store = app.lock_roadmap();
    let items = store.filtered(&filter);
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
    })))
}

/// POST /api/roadmap: create an item from scratch.
pub async fn create_item(
    State(app): State<AppState>,
    Json(body): Json<NewRoadmapItem>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    if body.title.trim().is_empty() {
        return Err(AppError::bad_request("title is required"));
    }
    let item = tokio::task::spawn_blocking(move || app.lock_roadmap().add_item(body))
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;

    Ok((StatusCode::CREATED, Json(serde_json::to_value(item)?)))
}

#[derive(serde::Deserialize)]
pub struct FromCatalogBody {
    pub source: CatalogSource,
    pub id: String,
}

/// POST /api/roadmap/from-catalog: the "add to roadmap" button on a card.
pub async fn add_from_catalog(
    State(app): State<AppState>,
    Json(body): Json<FromCatalogBody>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let item = tokio::task::spawn_blocking(move || {
        let entry = catalog::resolve(body.source, &body.id)?;
        let item = app
            .lock_roadmap()
            .add_item(NewRoadmapItem::from_catalog(&entry));
        Ok::<_, ReadinessError>(item)
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok((StatusCode::CREATED, Json(serde_json::to_value(item)?)))
}

/// GET /api/roadmap/board: kanban columns in display order.
pub async fn board(
    State(app): State<AppState>,
    Query(filter): Query<RoadmapFilter>,
) -> Result<Json<serde_json::Value>, AppError> {
    let columns = app.lock_roadmap().board(&filter);
    Ok(Json(serde_json::to_value(columns)?))
}

/// GET /api/roadmap/:id
pub async fn get_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let item = app
        .lock_roadmap()
        .get(&id)
        .cloned()
        .ok_or(ReadinessError::RoadmapItemNotFound(id))?;

    let source = match (item.source, item.source_id.as_deref()) {
        (Some(source), Some(source_id)) => catalog::resolve(source, source_id)
            .ok()
            .map(serde_json::to_value)
            .transpose()?,
        _ => None,
    };
    Ok(Json(serde_json::json!({
        "item": item,
        "source_entry": source,
    })))
}

/// PUT /api/roadmap/:id: partial update.
pub async fn update_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<RoadmapPatch>,
) -> Result<Json<serde_json::Value>, AppError> {
    let updated = tokio::task::spawn_blocking(move || {
        app.lock_roadmap()
            .update_item(&id, patch)
            .ok_or(ReadinessError::RoadmapItemNotFound(id))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::to_value(updated)?))
}

/// DELETE /api/roadmap/:id
pub async fn delete_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let removed = tokio::task::spawn_blocking(move || {
        app.lock_roadmap()
            .remove_item(&id)
            .ok_or(ReadinessError::RoadmapItemNotFound(id))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::json!({ "removed": removed.id })))
}

#[derive(serde::Deserialize)]
pub struct MoveBody {
    pub status: RoadmapStatus,
}

/// POST /api/roadmap/:id/move: drop a card onto a board column.
pub async fn move_item(
    State(app): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<MoveBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let moved = tokio::task::spawn_blocking(move || {
        let mut store = app.lock_roadmap();
        kanban::move_item(&mut store, &id, body.status)
            .ok_or(ReadinessError::RoadmapItemNotFound(id))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    Ok(Json(serde_json::to_value(moved)?))
}
