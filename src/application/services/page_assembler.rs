use std::collections::BTreeMap;

use crate::domain::{ElementIndex, PageContent, PageLayout, ParsedDocument};

use super::table_renderer::render_markdown_table;

const TITLE_ROLE: &str = "title";
const DEMOTED_TITLE_LABEL: &str = "heading";

/// Builds the page-indexed document from per-page layouts given in page order.
pub fn assemble_document(layouts: &[PageLayout]) -> ParsedDocument {
    let mut titles = TitleTracker::default();
    let mut pages = BTreeMap::new();

    for (offset, layout) in layouts.iter().enumerate() {
        let mut content = PageContent::default();
        let mut index = ElementIndex::default();

        collect_figures(layout, &mut content, &mut index);
        collect_tables(layout, &mut content, &mut index);
        content.text = render_paragraphs(layout, &index, &mut titles);

        pages.insert(offset + 1, content);
    }

    ParsedDocument {
        title: titles.title,
        total_pages: layouts.len(),
        pages,
    }
}

fn collect_figures(layout: &PageLayout, content: &mut PageContent, index: &mut ElementIndex) {
    for figure in &layout.figures {
        index.record_figure(&figure.elements);
        if let Some(caption) = &figure.caption {
            index.record_caption(&caption.elements);
            content.images.push(caption.content.clone());
        }
    }
}

fn collect_tables(layout: &PageLayout, content: &mut PageContent, index: &mut ElementIndex) {
    for table in &layout.tables {
        if table.cells.is_empty() {
            continue;
        }
        for cell in &table.cells {
            index.record_table(&cell.elements);
        }
        content.tables.push(render_markdown_table(table));
    }
}

#[derive(Default)]
struct TitleTracker {
    title: Option<String>,
    assigned: bool,
}

impl TitleTracker {
    /// Returns the label to print for a paragraph with `role`, claiming the
    /// document title on the first `title` paragraph.
    fn label_for<'a>(&mut self, role: &'a str, content: &str) -> &'a str {
        if role != TITLE_ROLE {
            return role;
        }
        if self.assigned {
            return DEMOTED_TITLE_LABEL;
        }
        self.assigned = true;
        self.title = Some(content.to_string());
        role
    }
}

fn render_paragraphs(layout: &PageLayout, index: &ElementIndex, titles: &mut TitleTracker) -> String {
    let mut text = String::new();

    for (paragraph_id, paragraph) in layout.paragraphs.iter().enumerate() {
        if index.is_consumed(paragraph_id) {
            continue;
        }

        match paragraph.role.as_deref().filter(|role| !role.is_empty()) {
            Some(role) => {
                let label = titles.label_for(role, &paragraph.content);
                if !text.is_empty() {
                    text.push_str("\n\n");
                }
                text.push_str(&title_case(label));
                text.push_str(": ");
                text.push_str(&paragraph.content);
                text.push('\n');
            }
            None => {
                text.push(' ');
                text.push_str(&paragraph.content);
            }
        }
    }

    text.trim().to_string()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest:
/// `sectionHeading` becomes `Sectionheading`, `page_footer` becomes `Page_Footer`.
pub fn title_case(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut inside_word = false;

    for ch in label.chars() {
        if ch.is_alphabetic() {
            if inside_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            inside_word = true;
        } else {
            out.push(ch);
            inside_word = false;
        }
    }

    out
}
