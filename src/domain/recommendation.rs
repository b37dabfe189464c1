use std::fmt;

use serde::Serialize;

/// Patient-facing recommendations synthesized for one prescribed drug.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecommendationRecord {
    pub side_effects: String,
    pub drug_purpose: String,
    pub drug_consumption_pattern: String,
    pub dietary_recommendation: String,
    pub person_id: i64,
    pub prescription_id: i64,
    pub visit_occurrence_id: i64,
}

/// The four questions asked about every prescribed drug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecommendationFacet {
    SideEffects,
    Purpose,
    ConsumptionPattern,
    Diet,
}

impl RecommendationFacet {
    pub const ALL: [RecommendationFacet; 4] = [
        Self::SideEffects,
        Self::Purpose,
        Self::ConsumptionPattern,
        Self::Diet,
    ];

    pub fn question(&self, drug_name: &str) -> String {
        match self {
            Self::SideEffects => format!("What are the side effects of {drug_name}?"),
            Self::Purpose => format!("What is the purpose of {drug_name}?"),
            Self::ConsumptionPattern => {
                format!("What is the consumption recommendation for {drug_name}?")
            }
            Self::Diet => format!("What is the diet recommendation while taking {drug_name}?"),
        }
    }

    /// Storage column the synthesized answer lands in.
    pub fn column(&self) -> &'static str {
        match self {
            Self::SideEffects => "side_effects",
            Self::Purpose => "drug_purpose",
            Self::ConsumptionPattern => "drug_consumption_pattern",
            Self::Diet => "dietary_recommendation",
        }
    }
}

impl fmt::Display for RecommendationFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}
