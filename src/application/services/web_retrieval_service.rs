use std::sync::Arc;
use std::time::Instant;

use futures::future::join_all;
use serde::Serialize;

use crate::application::ports::{PageScraper, WebSearchClient};
use crate::domain::{EnrichedResult, SearchResult};

use super::context_selector::{
    DEFAULT_CONTEXT_SENTENCES, DEFAULT_SIMILARITY_THRESHOLD, select_context,
};

pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_SITES: [&str; 5] = [
    "pubmed.ncbi.nlm.nih.gov",
    "webmd.com",
    "drugs.com",
    "cdc.gov",
    "fda.gov",
];

/// Search, scrape and chunk pipeline feeding recommendation prompts.
pub struct WebRetrievalService {
    search_client: Arc<dyn WebSearchClient>,
    scraper: Arc<dyn PageScraper>,
    default_sites: Vec<String>,
    default_top_k: usize,
    context_sentences: usize,
    similarity_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrievalResponse {
    pub query: String,
    pub sites: Vec<String>,
    pub results: Vec<EnrichedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degraded_reason: Option<String>,
}

impl RetrievalResponse {
    /// Splits the evidence into the synthesis prompt body and the link footer.
    pub fn prompt_and_references(&self) -> (String, String) {
        let question = self.query.trim_end().trim_end_matches('?');
        let snippets = self
            .results
            .iter()
            .map(|r| r.chunk.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let links = self
            .results
            .iter()
            .map(|r| r.result.url.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        (
            format!("Question: {question}?\nSnippets:{snippets}"),
            format!("\nReference Links:\n{links}"),
        )
    }
}

impl WebRetrievalService {
    pub fn new(search_client: Arc<dyn WebSearchClient>, scraper: Arc<dyn PageScraper>) -> Self {
        Self {
            search_client,
            scraper,
            default_sites: DEFAULT_SITES.iter().map(|s| s.to_string()).collect(),
            default_top_k: DEFAULT_TOP_K,
            context_sentences: DEFAULT_CONTEXT_SENTENCES,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }

    pub fn with_default_sites(mut self, sites: Vec<String>) -> Self {
        if !sites.is_empty() {
            self.default_sites = sites;
        }
        self
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k.max(1);
        self
    }

    pub fn with_context(mut self, context_sentences: usize, similarity_threshold: f64) -> Self {
        self.context_sentences = context_sentences;
        self.similarity_threshold = similarity_threshold;
        self
    }

    #[tracing::instrument(skip(self, sites))]
    pub async fn retrieve(
        &self,
        query: &str,
        sites: Option<&[String]>,
        top_k: Option<usize>,
    ) -> RetrievalResponse {
        let started = Instant::now();
        let sites = sites
            .filter(|s| !s.is_empty())
            .map(<[String]>::to_vec)
            .unwrap_or_else(|| self.default_sites.clone());
        let top_k = top_k.unwrap_or(self.default_top_k);

        let outcome = self.search_client.search(query, &sites).await;
        let degraded_reason = outcome.degraded_reason().map(str::to_string);
        let mut hits = outcome.into_value_or_default();
        hits.truncate(top_k);

        let results = join_all(hits.into_iter().map(|hit| self.enrich(hit))).await;

        tracing::info!(
            results = results.len(),
            degraded = degraded_reason.is_some(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Web retrieval finished"
        );

        RetrievalResponse {
            query: query.to_string(),
            sites,
            results,
            degraded_reason,
        }
    }

    async fn enrich(&self, hit: SearchResult) -> EnrichedResult {
        let page = self.scraper.scrape(&hit.url).await;
        if let Some(reason) = page.degraded_reason() {
            tracing::debug!(url = %hit.url, reason, "Scrape degraded, using snippet context only");
        }
        let page_text = page.into_value_or_default();

        let chunk = select_context(
            &page_text,
            &hit.snippet,
            self.context_sentences,
            self.similarity_threshold,
        );
        EnrichedResult::new(hit, chunk)
    }
}
