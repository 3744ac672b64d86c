use axum::extract::State;
use axum::Json;
use readiness_core::report::ReadinessReport;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/report: report from the current answers, or the sample report
/// while nothing scored has been answered yet.
pub async fn get_report(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let report = ReadinessReport::from_answers(app.lock_assessment().answers());
    let report = if report.has_data() {
        report
    } else {
        ReadinessReport::sample()
    };
    Ok(Json(serde_json::to_value(report)?))
}
