use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use crate::domain::CaseRequest;
use crate::presentation::state::AppState;

use super::error::workflow_error_response;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessPrescriptionRequest {
    pub person_id: i64,
    pub visit_occurrence_id: i64,
    pub prescription_id: i64,
}

impl From<ProcessPrescriptionRequest> for CaseRequest {
    fn from(request: ProcessPrescriptionRequest) -> Self {
        Self {
            person_id: request.person_id,
            visit_occurrence_id: request.visit_occurrence_id,
            prescription_id: request.prescription_id,
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn process_prescription_handler(
    State(state): State<AppState>,
    Json(request): Json<ProcessPrescriptionRequest>,
) -> Response {
    match state.workflow.run(request.into()).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Prescription case failed");
            workflow_error_response(&e)
        }
    }
}
