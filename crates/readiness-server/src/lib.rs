pub mod embed;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post, put};
use axum::Router;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(root: PathBuf) -> Router {
    router_with_state(state::AppState::new(root))
}

/// Router around pre-built state, for callers that swap out storage or the
/// submission backend.
pub fn router_with_state(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Events (SSE)
        .route("/api/events", get(routes::events::sse_events))
        // State
        .route("/api/state", get(routes::state::get_state))
        // Catalog
        .route(
            "/api/catalog/use-cases/categories",
            get(routes::catalog::use_case_categories),
        )
        .route("/api/catalog/{source}", get(routes::catalog::list_catalog))
        .route(
            "/api/catalog/{source}/{id}",
            get(routes::catalog::get_catalog_entry),
        )
        .route("/api/resources", get(routes::catalog::list_resources))
        .route("/api/admin", get(routes::catalog::get_admin))
        // Search
        .route("/api/search", get(routes::search::search))
        .route(
            "/api/search/recent",
            get(routes::search::recent_searches).delete(routes::search::clear_recent_searches),
        )
        // Roadmap
        .route(
            "/api/roadmap",
            get(routes::roadmap::list_items).post(routes::roadmap::create_item),
        )
        .route(
            "/api/roadmap/from-catalog",
            post(routes::roadmap::add_from_catalog),
        )
        .route("/api/roadmap/board", get(routes::roadmap::board))
        .route(
            "/api/roadmap/{id}",
            get(routes::roadmap::get_item)
                .put(routes::roadmap::update_item)
                .delete(routes::roadmap::delete_item),
        )
        .route("/api/roadmap/{id}/move", post(routes::roadmap::move_item))
        // Assessment
        .route(
            "/api/assessment",
            get(routes::assessment::get_assessment),
        )
        .route(
            "/api/assessment/sections",
            get(routes::assessment::get_sections),
        )
        .route(
            "/api/assessment/answers",
            put(routes::assessment::put_answer),
        )
        .route(
            "/api/assessment/sections/{index}/validate",
            post(routes::assessment::validate_section),
        )
        .route("/api/assessment/submit", post(routes::assessment::submit))
        .route(
            "/api/assessment/draft",
            axum::routing::delete(routes::assessment::clear_draft),
        )
        // Report
        .route("/api/report", get(routes::report::get_report))
        // Playground
        .route("/api/playground/chat", post(routes::playground::chat))
        // Pages
        .route("/api/pages/resolve", get(routes::pages::resolve))
        .fallback(embed::static_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the dashboard server.
pub async fn serve(root: PathBuf, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener, open_browser).await
}

/// Start the dashboard server on a pre-bound listener.
///
/// The caller can read the actual port before starting, which matters when
/// binding port 0 and letting the OS pick.
pub async fn serve_on(
    root: PathBuf,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("readiness dashboard listening on http://localhost:{actual_port}");

    if open_browser {
        let url = format!("http://localhost:{actual_port}");
        if let Err(e) = open::that(&url) {
            tracing::warn!(error = %e, "could not open browser");
        }
    }

    axum::serve(listener, app).await?;
    Ok(())
}
