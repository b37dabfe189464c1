use std::collections::BTreeMap;

use serde::Serialize;

/// Page-indexed result of parsing one PDF.
///
/// `pages` is keyed `1..=total_pages` with no gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParsedDocument {
    pub title: Option<String>,
    pub total_pages: usize,
    pub pages: BTreeMap<usize, PageContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageContent {
    pub text: String,
    pub tables: Vec<String>,
    pub images: Vec<String>,
}

impl ParsedDocument {
    pub fn has_contiguous_pages(&self) -> bool {
        self.pages.len() == self.total_pages
            && self
                .pages
                .keys()
                .copied()
                .eq(1..=self.total_pages)
    }

    /// Flattens the document into the text block fed to structured extraction.
    pub fn to_prompt_text(&self) -> String {
        self.pages
            .iter()
            .map(|(page_number, page)| {
                let mut block = format!("Page {page_number}:\nText: {}\n", page.text.trim());
                for table in &page.tables {
                    block.push_str("Table:\n");
                    block.push_str(table);
                    block.push('\n');
                }
                block
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
