use async_trait::async_trait;

use crate::domain::FetchOutcome;

/// Fetches a web page and returns its cleaned running text.
#[async_trait]
pub trait PageScraper: Send + Sync {
    async fn scrape(&self, url: &str) -> FetchOutcome<String>;
}
