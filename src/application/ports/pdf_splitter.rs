/// Splits a PDF into standalone single-page PDFs, in page order.
///
/// Implementations are synchronous and CPU-bound; callers run them on the
/// blocking pool.
pub trait PdfSplitter: Send + Sync {
    fn split(&self, pdf: &[u8]) -> Result<Vec<Vec<u8>>, PdfSplitError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfSplitError {
    #[error("invalid pdf: {0}")]
    InvalidPdf(String),
    #[error("pdf has no pages")]
    NoPages,
    #[error("failed to write page {page}: {reason}")]
    WriteFailed { page: u32, reason: String },
}
