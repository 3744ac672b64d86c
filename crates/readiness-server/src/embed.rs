use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use readiness_core::routes::Page;
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "$CARGO_MANIFEST_DIR/assets/"]
struct DashboardAssets;

/// Serve embedded assets. Known app pages get the SPA shell; anything else
/// is a 404.
pub async fn static_handler(uri: axum::http::Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if !path.is_empty() {
        if let Some(content) = <DashboardAssets as Embed>::get(path) {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                content.data.to_vec(),
            )
                .into_response();
        }
    }

    let page = Page::resolve(
        uri.path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path()),
    );
    if page.is_not_found() || uri.path().starts_with("/api/") {
        let body = serde_json::json!({ "error": format!("no page at {}", uri.path()) });
        return (StatusCode::NOT_FOUND, axum::Json(body)).into_response();
    }

    match <DashboardAssets as Embed>::get("index.html") {
        Some(content) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html")],
            content.data.to_vec(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "dashboard shell missing").into_response(),
    }
}
