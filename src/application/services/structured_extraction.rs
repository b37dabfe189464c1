use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::DrugRecord;

static JSON_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json[ \t]*\r?\n(.*?)\r?\n[ \t]*```").unwrap());

/// Returns the last fenced JSON object in `response` that parses.
///
/// Earlier blocks are treated as drafts the model revised. Blocks that fail
/// to parse are skipped with a warning.
pub fn extract_last_json_block(response: &str) -> Result<Map<String, Value>, ExtractionError> {
    let mut last = None;

    for (position, capture) in JSON_FENCE.captures_iter(response).enumerate() {
        let body = capture.get(1).map(|m| m.as_str()).unwrap_or_default();
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => last = Some(object),
            Ok(other) => {
                tracing::warn!(block = position, kind = %json_kind(&other), "Skipping non-object JSON block");
            }
            Err(e) => {
                tracing::warn!(block = position, error = %e, "Skipping malformed JSON block");
            }
        }
    }

    last.ok_or(ExtractionError::NoStructuredData)
}

/// Converts an extraction object into a drug record.
///
/// Count fields fall back to 0 and identifiers to `None` when absent, null
/// or empty. Refills follow the prescribed duration.
pub fn drug_record_from_json(object: &Map<String, Value>) -> Result<DrugRecord, ExtractionError> {
    let drug_name = text_field(object, "drug_name");
    if drug_name.trim().is_empty() {
        return Err(ExtractionError::MissingField("drug_name".to_string()));
    }

    let duration_in_days = int_field(object, "duration_in_days")?.unwrap_or(0);

    Ok(DrugRecord {
        drug_id: int_field(object, "drug_id")?,
        drug_name,
        drug_strength: text_field(object, "drug_strength"),
        frequency: text_field(object, "frequency"),
        drug_form: text_field(object, "drug_form"),
        instructions: text_field(object, "instructions"),
        duration_in_days,
        quantity: int_field(object, "quantity")?.unwrap_or(0),
        refill_in_days: duration_in_days,
        person_id: int_field(object, "person_id")?,
        prescription_id: int_field(object, "prescription_id")?,
        visit_occurrence_id: int_field(object, "visit_occurrence_id")?,
        schedule_status: DrugRecord::SCHEDULE_STATUS_PENDING,
    })
}

pub fn parse_drug_record(response: &str) -> Result<DrugRecord, ExtractionError> {
    let object = extract_last_json_block(response)?;
    drug_record_from_json(&object)
}

fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn int_field(object: &Map<String, Value>, key: &str) -> Result<Option<i64>, ExtractionError> {
    let invalid = |value: &dyn std::fmt::Display| ExtractionError::InvalidField {
        field: key.to_string(),
        value: value.to_string(),
    };

    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_i64() {
            Some(v) => Ok(Some(v)),
            // Models occasionally emit 30.0 for a whole count.
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| Some(f as i64))
                .ok_or_else(|| invalid(n)),
        },
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<i64>().map(Some).map_err(|_| invalid(&trimmed))
        }
        Some(other) => Err(invalid(other)),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no structured data in model response")]
    NoStructuredData,
    #[error("invalid value for {field}: {value}")]
    InvalidField { field: String, value: String },
    #[error("missing required field: {0}")]
    MissingField(String),
}
