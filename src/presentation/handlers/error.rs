use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::WorkflowError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Client-visible status for a failed case. Storage failures hide their detail.
pub fn workflow_error_response(error: &WorkflowError) -> Response {
    match error {
        WorkflowError::NotFound(what) => {
            error_response(StatusCode::NOT_FOUND, format!("{what} not found"))
        }
        WorkflowError::Parse(e) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Failed to parse prescription: {e}"),
        ),
        WorkflowError::Generation(e) => error_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Failed to extract prescription data: {e}"),
        ),
        WorkflowError::Storage(_) => {
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Database error")
        }
    }
}
