use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use readiness_core::error::ReadinessError;

/// Private sentinel for request bodies that parse but make no sense.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError: unified error type for HTTP responses
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }
}

fn status_for(e: &ReadinessError) -> StatusCode {
    match e {
        ReadinessError::NotInitialized => StatusCode::BAD_REQUEST,
        ReadinessError::RoadmapItemNotFound(_)
        | ReadinessError::CatalogEntryNotFound { .. }
        | ReadinessError::SectionNotFound(_)
        | ReadinessError::QuestionNotFound { .. } => StatusCode::NOT_FOUND,
        ReadinessError::InvalidId(_)
        | ReadinessError::InvalidStatus(_)
        | ReadinessError::InvalidPriority(_)
        | ReadinessError::InvalidCategory(_)
        | ReadinessError::InvalidSource(_)
        | ReadinessError::InvalidComplexity(_) => StatusCode::BAD_REQUEST,
        ReadinessError::InvalidAnswer { .. } | ReadinessError::AssessmentIncomplete { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ReadinessError::Storage(_)
        | ReadinessError::Io(_)
        | ReadinessError::Yaml(_)
        | ReadinessError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let status = self
            .0
            .downcast_ref::<ReadinessError>()
            .map(status_for)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(err: ReadinessError) -> StatusCode {
        AppError(err.into()).into_response().status()
    }

    #[test]
    fn roadmap_item_not_found_maps_to_404() {
        assert_eq!(
            status(ReadinessError::RoadmapItemNotFound("rm-1".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn catalog_entry_not_found_maps_to_404() {
        assert_eq!(
            status(ReadinessError::CatalogEntryNotFound {
                source_name: "agents".into(),
                id: "nope".into(),
            }),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn invalid_status_maps_to_400() {
        assert_eq!(
            status(ReadinessError::InvalidStatus("done".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn incomplete_assessment_maps_to_422() {
        assert_eq!(
            status(ReadinessError::AssessmentIncomplete { missing: 3 }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn invalid_answer_maps_to_422() {
        assert_eq!(
            status(ReadinessError::InvalidAnswer {
                question: "ai-policy".into(),
                reason: "bad".into(),
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        assert_eq!(
            status(ReadinessError::Io(io_err)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn non_readiness_error_maps_to_500() {
        let response = AppError(anyhow::anyhow!("something unexpected")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_maps_to_400() {
        assert_eq!(
            AppError::bad_request("title is required")
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(ReadinessError::NotInitialized.into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
