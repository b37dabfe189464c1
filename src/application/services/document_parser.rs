use std::sync::Arc;
use std::time::Instant;

use futures::{StreamExt, TryStreamExt, stream};

use crate::application::ports::{LayoutAnalyzer, LayoutAnalyzerError, PdfSplitError, PdfSplitter};
use crate::domain::{PageLayout, ParsedDocument};

use super::page_assembler::assemble_document;
use super::staged_page::StagedPage;

pub const DEFAULT_MAX_CONCURRENT_PAGES: usize = 4;

/// Turns a prescription PDF into a page-indexed document.
pub struct DocumentParser {
    layout_analyzer: Arc<dyn LayoutAnalyzer>,
    pdf_splitter: Arc<dyn PdfSplitter>,
    max_concurrent_pages: usize,
}

impl DocumentParser {
    pub fn new(
        layout_analyzer: Arc<dyn LayoutAnalyzer>,
        pdf_splitter: Arc<dyn PdfSplitter>,
        max_concurrent_pages: usize,
    ) -> Self {
        Self {
            layout_analyzer,
            pdf_splitter,
            max_concurrent_pages: max_concurrent_pages.max(1),
        }
    }

    #[tracing::instrument(skip(self, pdf), fields(pdf_bytes = pdf.len()))]
    pub async fn parse(&self, pdf: &[u8]) -> Result<ParsedDocument, ParseError> {
        let started = Instant::now();
        let pages = self.split(pdf).await?;
        let page_count = pages.len();

        let layouts: Vec<PageLayout> = stream::iter(pages.into_iter().enumerate())
            .map(|(offset, page_pdf)| self.analyze_staged(offset + 1, page_pdf))
            .buffered(self.max_concurrent_pages)
            .try_collect()
            .await?;

        let document = assemble_document(&layouts);

        tracing::info!(
            total_pages = page_count,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Parsed prescription document"
        );

        Ok(document)
    }

    async fn split(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, ParseError> {
        let splitter = Arc::clone(&self.pdf_splitter);
        let pdf = pdf.to_vec();

        tokio::task::spawn_blocking(move || splitter.split(&pdf))
            .await
            .map_err(|e| ParseError::Staging(format!("split task failed: {e}")))?
            .map_err(ParseError::Split)
    }

    async fn analyze_staged(
        &self,
        page_number: usize,
        page_pdf: Vec<u8>,
    ) -> Result<PageLayout, ParseError> {
        let staged = StagedPage::stage(page_number, page_pdf).await.map_err(|e| {
            ParseError::Staging(format!("failed to stage page {page_number}: {e}"))
        })?;

        let bytes = staged.read().await.map_err(|e| {
            ParseError::Staging(format!("failed to read staged page {page_number}: {e}"))
        })?;

        let layout = self
            .layout_analyzer
            .analyze_page(&bytes, page_number)
            .await
            .map_err(|source| ParseError::Analysis {
                page: page_number,
                source,
            });

        staged.release();

        tracing::debug!(page_number, ok = layout.is_ok(), "Page analysis finished");
        layout
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("pdf split: {0}")]
    Split(#[from] PdfSplitError),
    #[error("page {page} analysis: {source}")]
    Analysis {
        page: usize,
        #[source]
        source: LayoutAnalyzerError,
    },
    #[error("page staging: {0}")]
    Staging(String),
}
