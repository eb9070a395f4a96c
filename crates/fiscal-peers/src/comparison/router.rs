use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::metric::Metric;
use super::service::ComparisonService;
use crate::error::AppError;

const DEFAULT_SEARCH_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Router builder exposing lookup, report, and per-metric endpoints.
pub fn comparison_router(service: Arc<ComparisonService>) -> Router {
    Router::new()
        .route("/api/v1/metadata", get(metadata_handler))
        .route("/api/v1/municipalities", get(search_handler))
        .route("/api/v1/municipalities/:unit", get(report_handler))
        .route(
            "/api/v1/municipalities/:unit/metrics/:metric",
            get(panel_handler),
        )
        .with_state(service)
}

pub(crate) async fn metadata_handler(State(service): State<Arc<ComparisonService>>) -> Response {
    let payload = json!({
        "metadata": service.metadata(),
        "summary": service.summary(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn search_handler(
    State(service): State<Arc<ComparisonService>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    let hits = service.search(&query, limit);
    (StatusCode::OK, axum::Json(hits)).into_response()
}

pub(crate) async fn report_handler(
    State(service): State<Arc<ComparisonService>>,
    Path(unit): Path<String>,
) -> Response {
    match service.report(&unit) {
        Some(report) => (StatusCode::OK, axum::Json(report.as_ref())).into_response(),
        None => not_found(&unit),
    }
}

pub(crate) async fn panel_handler(
    State(service): State<Arc<ComparisonService>>,
    Path((unit, metric)): Path<(String, String)>,
) -> Response {
    let metric = match metric.parse::<Metric>() {
        Ok(metric) => metric,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.panel(&unit, metric) {
        Some(panel) => (StatusCode::OK, axum::Json(panel.as_ref())).into_response(),
        None => not_found(&unit),
    }
}

fn not_found(unit: &str) -> Response {
    info!(unit, "no municipality matched lookup");
    AppError::UnknownMunicipality(unit.to_string()).into_response()
}
