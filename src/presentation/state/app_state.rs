use std::sync::Arc;

use crate::application::services::{PrescriptionWorkflow, WebRetrievalService};

#[derive(Clone)]
pub struct AppState {
    pub workflow: Arc<PrescriptionWorkflow>,
    pub retrieval_service: Arc<WebRetrievalService>,
}
