use serde::Deserialize;

use crate::domain::{LayoutCell, LayoutParagraph, LayoutTable, PageLayout};

use super::schema::{LayoutSchema, paragraph_indices};

/// Form Recognizer `2023-07-31` layout result. Field names follow the
/// snake_case shape of the legacy SDK, with the REST camelCase names accepted
/// as aliases. This version reports no figures.
#[derive(Debug, Default, Deserialize)]
pub struct V3AnalyzeResult {
    #[serde(default)]
    pub paragraphs: Vec<V3Paragraph>,
    #[serde(default)]
    pub tables: Vec<V3Table>,
}

#[derive(Debug, Deserialize)]
pub struct V3Paragraph {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct V3Table {
    #[serde(alias = "rowCount")]
    pub row_count: usize,
    #[serde(alias = "columnCount")]
    pub column_count: usize,
    #[serde(default)]
    pub cells: Vec<V3Cell>,
}

#[derive(Debug, Deserialize)]
pub struct V3Cell {
    #[serde(alias = "rowIndex")]
    pub row_index: usize,
    #[serde(alias = "columnIndex")]
    pub column_index: usize,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

impl LayoutSchema for V3AnalyzeResult {
    fn into_page_layout(self) -> PageLayout {
        PageLayout {
            paragraphs: self
                .paragraphs
                .into_iter()
                .map(|p| LayoutParagraph {
                    content: p.content,
                    role: p.role,
                })
                .collect(),
            tables: self
                .tables
                .into_iter()
                .map(|t| LayoutTable {
                    row_count: t.row_count,
                    column_count: t.column_count,
                    cells: t
                        .cells
                        .into_iter()
                        .map(|c| LayoutCell {
                            row_index: c.row_index,
                            column_index: c.column_index,
                            elements: paragraph_indices(&c.elements),
                            content: c.content,
                        })
                        .collect(),
                })
                .collect(),
            figures: Vec::new(),
        }
    }
}
