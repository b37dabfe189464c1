use async_trait::async_trait;

use crate::domain::{FetchOutcome, SearchResult};

/// Web search restricted to an allow-list of domains.
///
/// Backend failures degrade to `FetchOutcome::Degraded`; they never surface
/// as errors.
#[async_trait]
pub trait WebSearchClient: Send + Sync {
    async fn search(&self, query: &str, sites: &[String]) -> FetchOutcome<Vec<SearchResult>>;
}
