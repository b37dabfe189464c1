use std::fmt;

use serde::Serialize;

use super::{DrugRecord, RecommendationRecord};

/// Identifiers of one prescription-processing case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaseRequest {
    pub person_id: i64,
    pub visit_occurrence_id: i64,
    pub prescription_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    pub drug_table: DrugRecord,
    pub recommendation_data: RecommendationRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStage {
    FetchFile,
    ParsePdf,
    ExtractStructuredRecord,
    PersistRecord,
    FanoutRecommendations,
    PersistRecommendations,
    Done,
}

impl WorkflowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FetchFile => "fetch_file",
            Self::ParsePdf => "parse_pdf",
            Self::ExtractStructuredRecord => "extract_structured_record",
            Self::PersistRecord => "persist_record",
            Self::FanoutRecommendations => "fanout_recommendations",
            Self::PersistRecommendations => "persist_recommendations",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
