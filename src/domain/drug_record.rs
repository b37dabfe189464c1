use serde::Serialize;

use super::CaseRequest;

/// Structured prescription row extracted by the language model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DrugRecord {
    pub drug_id: Option<i64>,
    pub drug_name: String,
    pub drug_strength: String,
    pub frequency: String,
    pub drug_form: String,
    pub instructions: String,
    pub duration_in_days: i64,
    pub quantity: i64,
    pub refill_in_days: i64,
    pub person_id: Option<i64>,
    pub prescription_id: Option<i64>,
    pub visit_occurrence_id: Option<i64>,
    pub schedule_status: i32,
}

impl DrugRecord {
    pub const SCHEDULE_STATUS_PENDING: i32 = 0;

    /// Stamps the identifiers of the case that produced this record.
    pub fn with_case(mut self, case: &CaseRequest) -> Self {
        self.person_id = Some(case.person_id);
        self.prescription_id = Some(case.prescription_id);
        self.visit_occurrence_id = Some(case.visit_occurrence_id);
        self
    }
}
