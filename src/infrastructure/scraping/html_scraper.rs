use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};

use crate::application::ports::PageScraper;
use crate::domain::FetchOutcome;

use super::text_cleaner::clean_scraped_text;

pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
pub const MIN_PARAGRAPH_CHARS: usize = 100;
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Fetches pages and keeps only their substantial `<p>` text.
pub struct HtmlScraper {
    client: Client,
}

impl HtmlScraper {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_SCRAPE_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self { client }
    }

    async fn fetch_html(&self, url: &str) -> Result<String, String> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    "request timed out".to_string()
                } else {
                    format!("request error: {e}")
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        response
            .text()
            .await
            .map_err(|e| format!("failed to read body: {e}"))
    }
}

impl Default for HtmlScraper {
    fn default() -> Self {
        Self::new()
    }
}

/// Concatenates paragraphs of at least [`MIN_PARAGRAPH_CHARS`] characters,
/// terminating each with sentence punctuation and a space.
pub fn extract_paragraph_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    for paragraph in document.select(&PARAGRAPH) {
        let raw: String = paragraph.text().collect();
        // Length counts surrounding whitespace; the appended text does not.
        if raw.chars().count() < MIN_PARAGRAPH_CHARS {
            continue;
        }
        let content = raw.trim();

        text.push_str(content);
        if content.ends_with(['.', '!', '?']) {
            text.push(' ');
        } else {
            text.push_str(". ");
        }
    }

    text
}

#[async_trait]
impl PageScraper for HtmlScraper {
    #[tracing::instrument(skip(self))]
    async fn scrape(&self, url: &str) -> FetchOutcome<String> {
        match self.fetch_html(url).await {
            // Html is !Send; parse synchronously before any further await.
            Ok(html) => FetchOutcome::Fetched(clean_scraped_text(&extract_paragraph_text(&html))),
            Err(reason) => {
                tracing::warn!(%reason, "Scrape degraded to empty text");
                FetchOutcome::degraded(reason)
            }
        }
    }
}
