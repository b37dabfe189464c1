use lopdf::Document;

use crate::application::ports::{PdfSplitError, PdfSplitter};

/// Splits a PDF by cloning the document once per page and deleting every
/// other page from the clone.
#[derive(Debug, Default)]
pub struct LopdfSplitter;

impl LopdfSplitter {
    pub fn new() -> Self {
        Self
    }

    fn extract_page(
        source: &Document,
        keep: u32,
        all_pages: &[u32],
    ) -> Result<Vec<u8>, PdfSplitError> {
        let mut page_doc = source.clone();
        let others: Vec<u32> = all_pages.iter().copied().filter(|p| *p != keep).collect();
        page_doc.delete_pages(&others);
        page_doc.prune_objects();
        page_doc.compress();

        let mut buffer = Vec::new();
        page_doc
            .save_to(&mut buffer)
            .map_err(|e| PdfSplitError::WriteFailed {
                page: keep,
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

impl PdfSplitter for LopdfSplitter {
    #[tracing::instrument(skip(self, pdf), fields(pdf_bytes = pdf.len()))]
    fn split(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, PdfSplitError> {
        let document =
            Document::load_mem(pdf).map_err(|e| PdfSplitError::InvalidPdf(e.to_string()))?;

        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(PdfSplitError::NoPages);
        }

        let pages = page_numbers
            .iter()
            .map(|&page| Self::extract_page(&document, page, &page_numbers))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(page_count = pages.len(), "Split pdf into single pages");
        Ok(pages)
    }
}
