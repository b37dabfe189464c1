mod error;
mod health;
mod prescription;
mod web_search;

pub use error::{ErrorResponse, error_response, workflow_error_response};
pub use health::{HealthResponse, health_handler};
pub use prescription::{ProcessPrescriptionRequest, process_prescription_handler};
pub use web_search::{WebSearchRequest, web_search_handler};
