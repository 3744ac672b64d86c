use axum::http::StatusCode;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bootstrap a project with fast playground replies and a short autosave
/// debounce.
fn init_project(dir: &TempDir) {
    let mut config = readiness_core::config::Config::new("test-project");
    config.playground.min_delay_ms = 0;
    config.playground.max_delay_ms = 0;
    config.assessment.autosave_debounce_ms = 50;
    readiness_core::io::ensure_dir(&dir.path().join(".readiness")).unwrap();
    config.save(dir.path()).unwrap();
}

fn app(dir: &TempDir) -> axum::Router {
    readiness_server::build_router(dir.path().to_path_buf())
}

async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = axum::http::Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(axum::body::Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(axum::body::Body::empty()).unwrap(),
    };
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

async fn put_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PUT", uri, Some(body)).await
}

async fn delete(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}

async fn answer(
    app: axum::Router,
    section: &str,
    question: &str,
    value: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    put_json(
        app,
        "/api/assessment/answers",
        serde_json::json!({
            "section_id": section,
            "question_id": question,
            "answer": value,
        }),
    )
    .await
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

#[tokio::test]
async fn state_reports_project_and_empty_roadmap() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = get(app(&dir), "/api/state").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["project"], "test-project");
    assert_eq!(json["roadmap"]["total"], 0);
    assert_eq!(json["roadmap"]["by_status"]["to_plan"], 0);
    assert_eq!(json["assessment"]["progress"]["answered"], 0);
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[tokio::test]
async fn catalog_search_gdpr_matches_only_gdpr_use_cases() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = get(app(&dir), "/api/catalog/use-cases?q=GDPR").await;
    assert_eq!(status, StatusCode::OK);
    let items = json["items"].as_array().unwrap();
    assert!(!items.is_empty());
    for item in items {
        let haystack = format!(
            "{} {} {}",
            item["title"], item["description"], item["tags"]
        )
        .to_lowercase();
        assert!(haystack.contains("gdpr"), "unexpected match {}", item["id"]);
    }
}

#[tokio::test]
async fn catalog_all_filter_is_ignored() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (_, all) = get(app(&dir), "/api/catalog/use-cases").await;
    let (_, filtered) = get(
        app(&dir),
        "/api/catalog/use-cases?industry=all&department=all&complexity=all",
    )
    .await;
    assert_eq!(all["count"], filtered["count"]);
}

#[tokio::test]
async fn catalog_unknown_source_is_400() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, _) = get(app(&dir), "/api/catalog/recipes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn catalog_entry_lookup() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = get(app(&dir), "/api/catalog/agents/email-triage-agent").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["source"], "agents");

    let (status, _) = get(app(&dir), "/api/catalog/agents/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn use_case_categories_have_counts() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = get(app(&dir), "/api/catalog/use-cases/categories").await;
    assert_eq!(status, StatusCode::OK);
    let tabs = json.as_array().unwrap();
    assert_eq!(tabs[0]["id"], "all");
    assert!(tabs.iter().all(|t| t["count"].is_u64()));
}

#[tokio::test]
async fn resources_filter_by_kind() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = get(app(&dir), "/api/resources?kind=checklist").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 1);
    assert_eq!(json["items"][0]["id"], "gdpr-ai-checklist");

    let (status, _) = get(app(&dir), "/api/resources?kind=podcast").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_records_recent_queries() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (status, json) = get(router.clone(), "/api/search?q=invoice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["results"][0]["id"], "invoice-processing");
    get(router.clone(), "/api/search?q=chatbot").await;

    let (_, recent) = get(router.clone(), "/api/search/recent").await;
    assert_eq!(recent, serde_json::json!(["chatbot", "invoice"]));

    let (status, _) = delete(router.clone(), "/api/search/recent").await;
    assert_eq!(status, StatusCode::OK);
    let (_, recent) = get(router, "/api/search/recent").await;
    assert_eq!(recent, serde_json::json!([]));
}

// ---------------------------------------------------------------------------
// Roadmap
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roadmap_create_move_and_delete() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (status, item) = post_json(
        router.clone(),
        "/api/roadmap",
        serde_json::json!({ "title": "Pilot chatbot", "category": "use_case" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["status"], "to_plan");
    assert_eq!(item["priority"], "medium");
    let id = item["id"].as_str().unwrap().to_string();

    let (status, moved) = post_json(
        router.clone(),
        &format!("/api/roadmap/{id}/move"),
        serde_json::json!({ "status": "in_progress" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["status"], "in_progress");

    let (_, board) = get(router.clone(), "/api/roadmap/board").await;
    let columns = board.as_array().unwrap();
    assert_eq!(columns.len(), 6);
    assert_eq!(columns[0]["status"], "to_plan");
    assert!(columns[0]["items"].as_array().unwrap().is_empty());
    assert_eq!(columns[2]["items"][0]["id"], id.as_str());

    let (status, _) = delete(router.clone(), &format!("/api/roadmap/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = get(router, &format!("/api/roadmap/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roadmap_create_requires_title() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, _) = post_json(
        app(&dir),
        "/api/roadmap",
        serde_json::json!({ "title": "  ", "category": "agent" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn roadmap_update_missing_item_is_404() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, _) = put_json(
        app(&dir),
        "/api/roadmap/rm-missing",
        serde_json::json!({ "progress": 50 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn roadmap_from_catalog_links_source_and_persists() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (status, item) = post_json(
        router.clone(),
        "/api/roadmap/from-catalog",
        serde_json::json!({ "source": "use-cases", "id": "invoice-processing" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(item["source_id"], "invoice-processing");
    assert_eq!(item["priority"], "high");
    let id = item["id"].as_str().unwrap().to_string();

    let (_, detail) = get(router, &format!("/api/roadmap/{id}")).await;
    assert_eq!(detail["source_entry"]["id"], "invoice-processing");

    // A fresh server picks up the persisted snapshot.
    let (_, list) = get(app(&dir), "/api/roadmap").await;
    assert_eq!(list["count"], 1);
    assert_eq!(list["items"][0]["id"], id.as_str());
}

#[tokio::test]
async fn unreadable_roadmap_is_kept_as_backup() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let roadmap = dir.path().join(".readiness/roadmap.yaml");
    std::fs::write(&roadmap, "items: [unterminated").unwrap();

    let router = app(&dir);
    let (_, list) = get(router.clone(), "/api/roadmap").await;
    assert_eq!(list["count"], 0);

    let (status, _) = post_json(
        router,
        "/api/roadmap",
        serde_json::json!({ "title": "Fresh start", "category": "training" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let backup = dir.path().join(".readiness/roadmap.yaml.bak");
    assert_eq!(
        std::fs::read_to_string(backup).unwrap(),
        "items: [unterminated"
    );
    assert!(std::fs::read_to_string(roadmap)
        .unwrap()
        .contains("Fresh start"));
}

#[tokio::test]
async fn roadmap_update_clamps_progress() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (_, item) = post_json(
        router.clone(),
        "/api/roadmap",
        serde_json::json!({ "title": "Onboarding flow", "category": "workflow" }),
    )
    .await;
    let id = item["id"].as_str().unwrap();
    let (status, updated) = put_json(
        router,
        &format!("/api/roadmap/{id}"),
        serde_json::json!({ "progress": 255, "notes": "kickoff done" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["progress"], 100);
    assert_eq!(updated["notes"], "kickoff done");
}

// ---------------------------------------------------------------------------
// Assessment
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assessment_answer_updates_progress() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (status, json) = answer(
        router.clone(),
        "company-profile",
        "company-name",
        serde_json::json!("Acme"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["progress"]["answered"], 1);

    let (status, _) = answer(
        router.clone(),
        "company-profile",
        "industry",
        serde_json::json!("space"),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = answer(router, "nope", "industry", serde_json::json!("retail")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn assessment_draft_autosaves_after_debounce() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    answer(
        router,
        "governance",
        "ai-policy",
        serde_json::json!("draft"),
    )
    .await;

    let draft = dir.path().join(".readiness/storage/assessment-draft.json");
    let mut saved = false;
    for _ in 0..40 {
        tokio::time::sleep(std::time::Duration::from_millis(25)).await;
        if draft.exists() {
            saved = true;
            break;
        }
    }
    assert!(saved, "draft was not autosaved");

    // A fresh server restores the draft.
    let (_, json) = get(app(&dir), "/api/assessment").await;
    assert_eq!(json["answers"]["governance"]["ai-policy"], "draft");

    let (status, _) = delete(app(&dir), "/api/assessment/draft").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!draft.exists());
}

#[tokio::test]
async fn validate_section_reports_errors() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = post_json(
        app(&dir),
        "/api/assessment/sections/0/validate",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["valid"], false);
    assert!(json["errors"]["company-name"].is_string());

    let (status, _) = post_json(
        app(&dir),
        "/api/assessment/sections/99/validate",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn incomplete_submit_is_rejected_and_records_nothing() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    answer(
        router.clone(),
        "company-profile",
        "company-name",
        serde_json::json!("Acme"),
    )
    .await;
    let (status, json) = post_json(router, "/api/assessment/submit", serde_json::json!({})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("incomplete"));
    assert!(!dir.path().join(".readiness/submissions").exists());
}

#[tokio::test]
async fn complete_submit_records_submission_and_resets_form() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let answers = [
        ("company-profile", "company-name", "Acme"),
        ("company-profile", "industry", "retail"),
        ("company-profile", "company-size", "50-249"),
        ("data-foundation", "data-quality", "good"),
        ("data-foundation", "data-accessibility", "3"),
        ("ai-strategy", "ai-vision", "exploring"),
        ("ai-strategy", "executive-sponsorship", "4"),
        ("technology", "cloud-adoption", "hybrid"),
        ("technology", "integration-maturity", "2"),
        ("talent-culture", "ai-skills", "enthusiasts"),
        ("talent-culture", "change-readiness", "3"),
        ("governance", "gdpr-compliance", "documented"),
        ("governance", "ai-policy", "draft"),
    ];
    for (section, question, value) in answers {
        let (status, _) = answer(router.clone(), section, question, serde_json::json!(value)).await;
        assert_eq!(status, StatusCode::OK, "{section}/{question}");
    }

    let (status, json) = post_json(
        router.clone(),
        "/api/assessment/submit",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"]["success"], true);
    let id = json["result"]["submission_id"].as_str().unwrap();
    assert!(dir
        .path()
        .join(format!(".readiness/submissions/{id}.yaml"))
        .exists());
    assert!(json["report"]["overall"].as_f64().unwrap() > 0.0);

    let (_, state) = get(router, "/api/assessment").await;
    assert_eq!(state["progress"]["answered"], 0);
}

// ---------------------------------------------------------------------------
// Report, playground, pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn report_falls_back_to_sample() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let router = app(&dir);

    let (_, json) = get(router.clone(), "/api/report").await;
    assert_eq!(json["sample"], true);

    answer(
        router.clone(),
        "governance",
        "gdpr-compliance",
        serde_json::json!("audited"),
    )
    .await;
    let (_, json) = get(router, "/api/report").await;
    assert_eq!(json["sample"], false);
    assert_eq!(json["overall"], 5.0);
}

#[tokio::test]
async fn playground_replies_by_keyword() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, json) = post_json(
        app(&dir),
        "/api/playground/chat",
        serde_json::json!({ "message": "Do we need a DPIA for GDPR?" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reply"]["role"], "assistant");
    assert!(json["reply"]["content"].as_str().unwrap().contains("DPIA"));
}

#[tokio::test]
async fn pages_resolve_known_and_unknown() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (_, json) = get(app(&dir), "/api/pages/resolve?path=/dashboard/roadmap/").await;
    assert_eq!(json["page"], "dashboard");
    assert_eq!(json["section"], "roadmap");
    assert_eq!(json["path"], "/dashboard/roadmap");

    let (_, json) = get(app(&dir), "/api/pages/resolve?path=/pricing").await;
    assert_eq!(json["found"], false);
}

#[tokio::test]
async fn spa_shell_served_for_known_pages_only() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let req = axum::http::Request::builder()
        .uri("/dashboard/gdpr")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app(&dir).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("<div id=\"app\""));

    let (status, _) = get(app(&dir), "/no-such-page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(app(&dir), "/api/unknown").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
