use axum::extract::Query;
use axum::Json;
use readiness_core::routes::Page;

use crate::error::AppError;

#[derive(serde::Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

/// GET /api/pages/resolve?path=<path and query>: which page a URL shows.
pub async fn resolve(
    Query(params): Query<ResolveParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let page = Page::resolve(&params.path);
    let mut body = serde_json::to_value(&page)?;
    if let Some(obj) = body.as_object_mut() {
        obj.insert("path".to_string(), serde_json::json!(page.path()));
        obj.insert("title".to_string(), serde_json::json!(page.title()));
        obj.insert("found".to_string(), serde_json::json!(!page.is_not_found()));
    }
    Ok(Json(body))
}
