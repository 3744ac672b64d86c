use axum::extract::State;
use axum::Json;
use readiness_core::types::RoadmapStatus;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/state: project name, roadmap counts per column and assessment
/// progress.
pub async fn get_state(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let counts: serde_json::Map<String, serde_json::Value> = {
        let store = app.lock_roadmap();
        RoadmapStatus::all()
            .iter()
            .map(|status| {
                let n = store.items().iter().filter(|i| i.status == *status).count();
                (status.as_str().to_string(), serde_json::json!(n))
            })
            .collect()
    };
    let total = app.lock_roadmap().len();
    let (progress, complete, draft_pending) = {
        let form = app.lock_assessment();
        (form.progress(), form.is_complete(), form.autosave_pending())
    };

    let recent = app.lock_recent().queries().to_vec();

    Ok(Json(serde_json::json!({
        "project": app.config.project.name,
        "description": app.config.project.description,
        "roadmap": {
            "total": total,
            "by_status": counts,
        },
        "assessment": {
            "progress": progress,
            "complete": complete,
            "draft_pending": draft_pending,
        },
        "recent_searches": recent,
    })))
}
