use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::{Client, StatusCode};

use crate::application::ports::{LayoutAnalyzer, LayoutAnalyzerError};
use crate::domain::PageLayout;

use super::schema::{AnalyzeOperation, LayoutSchema};
use super::v3_schema::V3AnalyzeResult;
use super::v4_schema::V4AnalyzeResult;

pub const POLL_TIMEOUT: Duration = Duration::from_secs(300);
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
pub const MAX_BACKOFF: Duration = Duration::from_secs(30);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Which layout API generation to call. Each speaks its own result schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AzureApiVersion {
    V3,
    V4,
}

impl AzureApiVersion {
    pub fn api_version(&self) -> &'static str {
        match self {
            Self::V3 => "2023-07-31",
            Self::V4 => "2024-11-30",
        }
    }

    fn analyze_path(&self) -> &'static str {
        match self {
            Self::V3 => "formrecognizer/documentModels/prebuilt-layout:analyze",
            Self::V4 => "documentintelligence/documentModels/prebuilt-layout:analyze",
        }
    }
}

impl TryFrom<String> for AzureApiVersion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "v3" | "2023-07-31" => Ok(Self::V3),
            "v4" | "2024-11-30" => Ok(Self::V4),
            other => Err(format!(
                "{other} is not a supported layout api version. Use either `v3` or `v4`."
            )),
        }
    }
}

pub struct AzureLayoutAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
    version: AzureApiVersion,
    poll_timeout: Duration,
    initial_backoff: Duration,
}

impl AzureLayoutAdapter {
    pub fn new(endpoint: &str, api_key: &str, version: AzureApiVersion) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            version,
            poll_timeout: POLL_TIMEOUT,
            initial_backoff: INITIAL_BACKOFF,
        }
    }

    pub fn with_polling(mut self, poll_timeout: Duration, initial_backoff: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self.initial_backoff = initial_backoff;
        self
    }

    pub fn version(&self) -> AzureApiVersion {
        self.version
    }

    async fn submit(&self, page_pdf: &[u8]) -> Result<String, LayoutAnalyzerError> {
        let body = serde_json::json!({ "base64Source": general_purpose::STANDARD.encode(page_pdf) });

        let url = format!(
            "{}/{}?api-version={}",
            self.endpoint,
            self.version.analyze_path(),
            self.version.api_version()
        );

        let response = self
            .client
            .post(&url)
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LayoutAnalyzerError::RequestFailed(format!("submit failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LayoutAnalyzerError::RequestFailed(format!(
                "submit returned {status}: {text}"
            )));
        }

        response
            .headers()
            .get("Operation-Location")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                LayoutAnalyzerError::InvalidResponse(
                    "response missing Operation-Location header".to_string(),
                )
            })
    }

    async fn poll_until_complete<R: LayoutSchema>(
        &self,
        operation_url: &str,
    ) -> Result<R, LayoutAnalyzerError> {
        let poll_future = async {
            let mut backoff = self.initial_backoff;

            loop {
                let response = self
                    .client
                    .get(operation_url)
                    .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
                    .send()
                    .await
                    .map_err(|e| {
                        LayoutAnalyzerError::RequestFailed(format!("poll request failed: {e}"))
                    })?;

                if response.status() == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .map(Duration::from_secs)
                        .unwrap_or(backoff);
                    tokio::time::sleep(retry_after).await;
                    continue;
                }

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    return Err(LayoutAnalyzerError::RequestFailed(format!(
                        "poll returned {status}: {text}"
                    )));
                }

                let operation: AnalyzeOperation<R> = response.json().await.map_err(|e| {
                    LayoutAnalyzerError::InvalidResponse(format!("result parse failed: {e}"))
                })?;

                match operation.status.as_str() {
                    "succeeded" => {
                        return operation.analyze_result.ok_or_else(|| {
                            LayoutAnalyzerError::InvalidResponse(
                                "succeeded operation has no analyzeResult".to_string(),
                            )
                        });
                    }
                    "failed" | "canceled" => {
                        let detail = operation
                            .error
                            .map(|e| format!("{}: {}", e.code, e.message))
                            .unwrap_or_else(|| operation.status.clone());
                        return Err(LayoutAnalyzerError::AnalysisFailed(detail));
                    }
                    _ => {
                        tokio::time::sleep(backoff).await;
                        backoff = (backoff * 2).min(MAX_BACKOFF);
                    }
                }
            }
        };

        tokio::time::timeout(self.poll_timeout, poll_future)
            .await
            .map_err(|_| LayoutAnalyzerError::TimedOut(self.poll_timeout.as_secs()))?
    }
}

#[async_trait]
impl LayoutAnalyzer for AzureLayoutAdapter {
    #[tracing::instrument(
        skip(self, page_pdf),
        fields(api_version = self.version.api_version(), page_bytes = page_pdf.len())
    )]
    async fn analyze_page(
        &self,
        page_pdf: &[u8],
        page_number: usize,
    ) -> Result<PageLayout, LayoutAnalyzerError> {
        let operation_url = self.submit(page_pdf).await?;

        let layout = match self.version {
            AzureApiVersion::V3 => self
                .poll_until_complete::<V3AnalyzeResult>(&operation_url)
                .await?
                .into_page_layout(),
            AzureApiVersion::V4 => self
                .poll_until_complete::<V4AnalyzeResult>(&operation_url)
                .await?
                .into_page_layout(),
        };

        tracing::debug!(
            paragraphs = layout.paragraphs.len(),
            tables = layout.tables.len(),
            figures = layout.figures.len(),
            "Page layout analyzed"
        );

        Ok(layout)
    }
}
