use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::error_response;

#[derive(Debug, Deserialize)]
pub struct WebSearchRequest {
    pub query_text: String,
    #[serde(default)]
    pub sites: Option<Vec<String>>,
    #[serde(default)]
    pub top_k: Option<usize>,
}

#[tracing::instrument(skip(state, request))]
pub async fn web_search_handler(
    State(state): State<AppState>,
    Json(request): Json<WebSearchRequest>,
) -> Response {
    if request.query_text.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "query_text must not be empty");
    }
    if request.top_k == Some(0) {
        return error_response(StatusCode::BAD_REQUEST, "top_k must be at least 1");
    }

    tracing::debug!(query = %sanitize_prompt(&request.query_text), "Running web search");

    let response = state
        .retrieval_service
        .retrieve(&request.query_text, request.sites.as_deref(), request.top_k)
        .await;

    (StatusCode::OK, Json(response)).into_response()
}
