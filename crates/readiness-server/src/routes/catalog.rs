use axum::extract::{Path, Query};
use axum::Json;
use readiness_core::catalog::{self, admin, ResourceKind};
use readiness_core::filter::{self, CatalogQuery, Filterable};
use readiness_core::types::CatalogSource;
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;

use crate::error::AppError;

fn filtered<T: Filterable + Serialize>(
    query: &CatalogQuery,
    items: &[T],
) -> serde_json::Result<Vec<serde_json::Value>> {
    query
        .apply(items)
        .into_iter()
        .map(serde_json::to_value)
        .collect()
}

/// GET /api/catalog/:source?q=&industry=&department=&complexity=&category=&sort=
pub async fn list_catalog(
    Path(source): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, AppError> {
    let source = CatalogSource::from_str(&source)?;
    let query = CatalogQuery::from_params(&params);
    let items = match source {
        CatalogSource::UseCases => filtered(&query, catalog::use_cases())?,
        CatalogSource::Agents => filtered(&query, catalog::agent_templates())?,
        CatalogSource::Workflows => filtered(&query, catalog::workflow_templates())?,
        CatalogSource::Training => filtered(&query, catalog::training_courses())?,
    };
    Ok(Json(serde_json::json!({
        "source": source.slug(),
        "count": items.len(),
        "items": items,
    })))
}

/// GET /api/catalog/:source/:id
pub async fn get_catalog_entry(
    Path((source, id)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let source = CatalogSource::from_str(&source)?;
    let entry = catalog::resolve(source, &id)?;
    Ok(Json(serde_json::to_value(entry)?))
}

/// GET /api/catalog/use-cases/categories: the dashboard tabs with counts.
pub async fn use_case_categories() -> Result<Json<serde_json::Value>, AppError> {
    let tabs: Vec<serde_json::Value> = filter::use_case_categories()
        .into_iter()
        .map(|tab| {
            let count = catalog::use_cases()
                .iter()
                .filter(|uc| {
                    tab.filter
                        .as_ref()
                        .is_none_or(|f| filter::matches(*uc, f))
                })
                .count();
            serde_json::json!({
                "id": tab.id,
                "label": tab.label,
                "filter": tab.filter,
                "count": count,
            })
        })
        .collect();
    Ok(Json(serde_json::json!(tabs)))
}

#[derive(serde::Deserialize)]
pub struct ResourceParams {
    pub q: Option<String>,
    pub kind: Option<String>,
}

/// GET /api/resources?q=&kind=
pub async fn list_resources(
    Query(params): Query<ResourceParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let kind = match params.kind.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(k) => Some(ResourceKind::from_str(k).map_err(AppError::bad_request)?),
    };
    let mut query = CatalogQuery::new();
    if let Some(q) = params.q.filter(|q| !q.trim().is_empty()) {
        query = query.with(filter::FilterKind::Search(q));
    }
    let items: Vec<&catalog::Resource> = query
        .apply(catalog::resources())
        .into_iter()
        .filter(|r| kind.is_none_or(|k| r.kind == k))
        .collect();
    Ok(Json(serde_json::json!({
        "count": items.len(),
        "items": items,
        "gdpr": catalog::resources::gdpr_resources()
            .iter()
            .map(|r| r.id.as_str())
            .collect::<Vec<_>>(),
    })))
}

/// GET /api/admin: sample client list and summary.
pub async fn get_admin() -> Result<Json<serde_json::Value>, AppError> {
    Ok(Json(serde_json::json!({
        "clients": admin::clients(),
        "summary": admin::summary(),
    })))
}
