use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

/// A single-page PDF parked on disk for the duration of one layout submission.
///
/// The file is removed when the guard is released or dropped, including when
/// the owning future is cancelled mid-flight.
pub struct StagedPage {
    page_number: usize,
    file: Option<NamedTempFile>,
}

impl StagedPage {
    /// Writes the page on the blocking pool so the runtime never waits on disk.
    pub async fn stage(page_number: usize, page_pdf: Vec<u8>) -> std::io::Result<Self> {
        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix(&format!("page-{page_number}-"))
                .suffix(".pdf")
                .tempfile()?;
            file.write_all(&page_pdf)?;
            file.flush()?;
            Ok(file)
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(Self {
            page_number,
            file: Some(file),
        })
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(NamedTempFile::path)
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        let path = self.path().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "staged page already released")
        })?;
        tokio::fs::read(path).await
    }

    /// Deletes the file now, logging instead of failing when removal errors.
    pub fn release(mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        if let Err(e) = file.close() {
            tracing::warn!(
                page_number = self.page_number,
                error = %e,
                "Failed to delete staged page file"
            );
        }
    }
}
