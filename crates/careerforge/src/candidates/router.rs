use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::loader::DataSourceError;
use super::service::{CandidateBrowser, SearchRequest};

/// Router builder exposing candidate search over HTTP.
pub fn candidate_router(browser: Arc<CandidateBrowser>) -> Router {
    Router::new()
        .route("/api/v1/candidates/search", post(search_handler))
        .route("/api/v1/candidates/options", get(options_handler))
        .with_state(browser)
}

pub(crate) async fn search_handler(
    State(browser): State<Arc<CandidateBrowser>>,
    Json(request): Json<SearchRequest>,
) -> Response {
    match browser.search(&request) {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(err) => dataset_unavailable(err),
    }
}

pub(crate) async fn options_handler(State(browser): State<Arc<CandidateBrowser>>) -> Response {
    match browser.options() {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(err) => dataset_unavailable(err),
    }
}

fn dataset_unavailable(err: DataSourceError) -> Response {
    error!(error = %err, "candidate dataset unavailable");
    let payload = json!({
        "error": err.to_string(),
    });
    (StatusCode::SERVICE_UNAVAILABLE, Json(payload)).into_response()
}
