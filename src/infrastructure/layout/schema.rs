use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::PageLayout;

/// A backend-version-specific `analyzeResult` payload.
pub trait LayoutSchema: DeserializeOwned {
    fn into_page_layout(self) -> PageLayout;
}

/// Long-running operation envelope returned by the polling endpoint.
#[derive(Debug, Deserialize)]
#[serde(bound = "R: DeserializeOwned")]
pub struct AnalyzeOperation<R> {
    pub status: String,
    #[serde(rename = "analyzeResult", alias = "analyze_result")]
    pub analyze_result: Option<R>,
    pub error: Option<OperationError>,
}

#[derive(Debug, Deserialize)]
pub struct OperationError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Resolves an element reference such as `/paragraphs/12` to `12`.
///
/// References to other element kinds resolve to `None`.
pub fn paragraph_index(reference: &str) -> Option<usize> {
    reference
        .strip_prefix("/paragraphs/")
        .and_then(|index| index.parse().ok())
}

pub(crate) fn paragraph_indices(references: &[String]) -> Vec<usize> {
    references
        .iter()
        .filter_map(|r| paragraph_index(r))
        .collect()
}
