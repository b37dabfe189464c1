use dosesense::application::ports::{PdfSplitError, PdfSplitter};
use dosesense::infrastructure::pdf::LopdfSplitter;
use lopdf::Document;

use crate::helpers::build_pdf;

#[test]
fn given_three_page_pdf_when_splitting_then_three_single_page_pdfs_in_order() {
    let pdf = build_pdf(&["first", "second", "third"]);

    let pages = LopdfSplitter::new().split(&pdf).unwrap();

    assert_eq!(pages.len(), 3);
    for (index, page) in pages.iter().enumerate() {
        let document = Document::load_mem(page).unwrap();
        assert_eq!(document.get_pages().len(), 1, "page {}", index + 1);
    }
    assert_ne!(pages[0], pages[1]);
}

#[test]
fn given_garbage_bytes_when_splitting_then_invalid_pdf() {
    let result = LopdfSplitter::new().split(b"definitely not a pdf");

    assert!(matches!(result, Err(PdfSplitError::InvalidPdf(_))));
}
