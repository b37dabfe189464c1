use std::collections::BTreeSet;

/// Normalized layout-analysis result for a single page.
///
/// Every backend adapter converts its own wire schema into this shape, with
/// element references already resolved to paragraph indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub paragraphs: Vec<LayoutParagraph>,
    pub tables: Vec<LayoutTable>,
    pub figures: Vec<LayoutFigure>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutParagraph {
    pub content: String,
    pub role: Option<String>,
}

impl LayoutParagraph {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: None,
        }
    }

    pub fn with_role(content: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            role: Some(role.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutTable {
    pub row_count: usize,
    pub column_count: usize,
    pub cells: Vec<LayoutCell>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutCell {
    pub row_index: usize,
    pub column_index: usize,
    pub content: String,
    pub elements: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutFigure {
    pub elements: Vec<usize>,
    pub caption: Option<LayoutCaption>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutCaption {
    pub content: String,
    pub elements: Vec<usize>,
}

/// Paragraph ids consumed by figures, captions and tables on one page.
#[derive(Debug, Clone, Default)]
pub struct ElementIndex {
    consumed: BTreeSet<usize>,
}

impl ElementIndex {
    pub fn record_figure(&mut self, ids: &[usize]) {
        self.consumed.extend(ids);
    }

    pub fn record_caption(&mut self, ids: &[usize]) {
        self.consumed.extend(ids);
    }

    pub fn record_table(&mut self, ids: &[usize]) {
        self.consumed.extend(ids);
    }

    pub fn is_consumed(&self, paragraph_id: usize) -> bool {
        self.consumed.contains(&paragraph_id)
    }
}
