use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::WebSearchClient;
use crate::domain::{FetchOutcome, SearchResult, site_restricted_query};
use crate::infrastructure::http::{RetryPolicy, send_with_retry};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
const MARKET: &str = "en-US";

/// Bing Custom Search over a fixed custom configuration.
pub struct BingSearchClient {
    client: Client,
    endpoint: String,
    subscription_key: String,
    custom_config_id: String,
    retry: RetryPolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingResponse {
    #[serde(default)]
    pub web_pages: Option<BingWebPages>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BingWebPages {
    #[serde(default)]
    pub value: Vec<BingWebPage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BingWebPage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub date_published_display_text: String,
    #[serde(default)]
    pub snippet: String,
}

impl From<BingWebPage> for SearchResult {
    fn from(page: BingWebPage) -> Self {
        Self {
            name: page.name,
            url: page.url,
            published_date: page.date_published_display_text,
            snippet: page.snippet,
        }
    }
}

impl BingResponse {
    pub fn into_results(self) -> Vec<SearchResult> {
        self.web_pages
            .map(|pages| pages.value.into_iter().map(SearchResult::from).collect())
            .unwrap_or_default()
    }
}

impl BingSearchClient {
    pub fn new(endpoint: &str, subscription_key: &str, custom_config_id: &str) -> Self {
        Self::with_timeout(endpoint, subscription_key, custom_config_id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: &str,
        subscription_key: &str,
        custom_config_id: &str,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            endpoint: endpoint.to_string(),
            subscription_key: subscription_key.to_string(),
            custom_config_id: custom_config_id.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, String> {
        let request = self
            .client
            .get(&self.endpoint)
            .header("Ocp-Apim-Subscription-Key", &self.subscription_key)
            .query(&[
                ("q", query),
                ("customconfig", self.custom_config_id.as_str()),
                ("mkt", MARKET),
            ]);

        let response = send_with_retry(request, &self.retry)
            .await
            .map_err(|e| format!("search request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(format!("search returned {}", response.status()));
        }

        let payload: BingResponse = response
            .json()
            .await
            .map_err(|e| format!("search payload malformed: {e}"))?;

        Ok(payload.into_results())
    }
}

#[async_trait]
impl WebSearchClient for BingSearchClient {
    #[tracing::instrument(skip(self, sites), fields(site_count = sites.len()))]
    async fn search(&self, query: &str, sites: &[String]) -> FetchOutcome<Vec<SearchResult>> {
        let restricted = site_restricted_query(query, sites);

        match self.fetch(&restricted).await {
            Ok(results) => {
                tracing::debug!(hits = results.len(), "Search completed");
                FetchOutcome::Fetched(results)
            }
            Err(reason) => {
                tracing::warn!(%reason, "Search degraded to empty result");
                FetchOutcome::degraded(reason)
            }
        }
    }
}
