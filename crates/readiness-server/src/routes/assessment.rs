use axum::extract::{Path, State};
use axum::Json;
use readiness_core::assessment::{self, Answer, AssessmentForm};
use readiness_core::error::ReadinessError;
use readiness_core::report::ReadinessReport;
use std::time::Instant;

use crate::error::AppError;
use crate::state::{AppState, ServerEvent};

fn form_json(form: &AssessmentForm) -> serde_json::Value {
    serde_json::json!({
        "answers": form.answers(),
        "errors": form.errors(),
        "progress": form.progress(),
        "complete": form.is_complete(),
        "missing_required": form.missing_required(),
        "draft_pending": form.autosave_pending(),
    })
}

/// GET /api/assessment/sections: the static questionnaire.
pub async fn get_sections() -> Json<serde_json::Value> {
    Json(serde_json::json!(assessment::sections()))
}

/// GET /api/assessment: current answers, errors and progress.
pub async fn get_assessment(State(app): State<AppState>) -> Json<serde_json::Value> {
    let body = form_json(&app.lock_assessment());
    Json(body)
}

#[derive(serde::Deserialize)]
pub struct AnswerBody {
    pub section_id: String,
    pub question_id: String,
    pub answer: Answer,
}

/// PUT /api/assessment/answers: set one answer and schedule the draft
/// autosave for when the form has been quiet for the debounce period.
pub async fn put_answer(
    State(app): State<AppState>,
    Json(body): Json<AnswerBody>,
) -> Result<Json<serde_json::Value>, AppError> {
    let (result, debounce) = {
        let mut form = app.lock_assessment();
        form.update_answer(
            &body.section_id,
            &body.question_id,
            body.answer,
            Instant::now(),
        )?;
        (form_json(&form), form.debounce())
    };

    let autosave = app.clone();
    tokio::spawn(async move {
        tokio::time::sleep(debounce).await;
        let _ = tokio::task::spawn_blocking(move || {
            autosave.lock_assessment().autosave_tick(Instant::now());
        })
        .await;
    });

    Ok(Json(result))
}

/// POST /api/assessment/sections/:index/validate
pub async fn validate_section(
    State(app): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut form = app.lock_assessment();
    let valid = form.validate_section(index)?;
    let section_progress = form.section_progress(index)?;
    Ok(Json(serde_json::json!({
        "index": index,
        "valid": valid,
        "errors": form.errors(),
        "progress": section_progress,
    })))
}

/// POST /api/assessment/submit: rejected with 422 while required answers are
/// missing; the submission backend is only contacted for complete forms.
pub async fn submit(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let events = app.event_tx.clone();
    let (result, report) = tokio::task::spawn_blocking(move || {
        let mut form = app.lock_assessment();
        let report = ReadinessReport::from_answers(form.answers());
        let result = form.submit(app.submissions.as_ref())?;
        Ok::<_, ReadinessError>((result, report))
    })
    .await
    .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))??;

    if result.success {
        let _ = events.send(ServerEvent::AssessmentSubmitted {
            submission_id: result.submission_id.clone(),
        });
    }
    let report = result.success.then_some(report);
    Ok(Json(serde_json::json!({
        "result": result,
        "report": report,
    })))
}

/// DELETE /api/assessment/draft
pub async fn clear_draft(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    tokio::task::spawn_blocking(move || app.lock_assessment().clear_draft())
        .await
        .map_err(|e| AppError(anyhow::anyhow!("task join error: {e}")))?;
    Ok(Json(serde_json::json!({ "cleared": true })))
}
