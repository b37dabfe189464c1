use serde::Serialize;

/// One ranked web hit as returned by the search backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub url: String,
    pub published_date: String,
    pub snippet: String,
}

/// A search hit paired with the context window selected from its page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichedResult {
    #[serde(flatten)]
    pub result: SearchResult,
    pub chunk: String,
}

impl EnrichedResult {
    pub fn new(result: SearchResult, chunk: String) -> Self {
        Self { result, chunk }
    }
}

/// Folds a domain allow-list into the free-text query.
pub fn site_restricted_query(query: &str, sites: &[String]) -> String {
    match sites {
        [] => query.to_string(),
        [site] => format!("{query} site:{site}"),
        many => {
            let restriction = many
                .iter()
                .map(|site| format!("site:{site}"))
                .collect::<Vec<_>>()
                .join(" OR ");
            format!("({restriction}) {query}")
        }
    }
}
