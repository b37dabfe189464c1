use async_trait::async_trait;

use crate::domain::PageLayout;

/// Layout-analysis backend: turns one single-page PDF into paragraphs,
/// tables and figures.
#[async_trait]
pub trait LayoutAnalyzer: Send + Sync {
    async fn analyze_page(
        &self,
        page_pdf: &[u8],
        page_number: usize,
    ) -> Result<PageLayout, LayoutAnalyzerError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LayoutAnalyzerError {
    #[error("analysis request failed: {0}")]
    RequestFailed(String),
    #[error("analysis failed: {0}")]
    AnalysisFailed(String),
    #[error("analysis timed out after {0}s")]
    TimedOut(u64),
    #[error("invalid analysis result: {0}")]
    InvalidResponse(String),
}
