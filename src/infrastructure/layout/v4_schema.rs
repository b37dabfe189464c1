use serde::Deserialize;

use crate::domain::{
    LayoutCaption, LayoutCell, LayoutFigure, LayoutParagraph, LayoutTable, PageLayout,
};

use super::schema::{LayoutSchema, paragraph_indices};

/// Document Intelligence `2024-11-30` layout result.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4AnalyzeResult {
    #[serde(default)]
    pub paragraphs: Vec<V4Paragraph>,
    #[serde(default)]
    pub tables: Vec<V4Table>,
    #[serde(default)]
    pub figures: Vec<V4Figure>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Paragraph {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Table {
    pub row_count: usize,
    pub column_count: usize,
    #[serde(default)]
    pub cells: Vec<V4Cell>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Cell {
    pub row_index: usize,
    pub column_index: usize,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Figure {
    #[serde(default)]
    pub elements: Vec<String>,
    #[serde(default)]
    pub caption: Option<V4Caption>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct V4Caption {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub elements: Vec<String>,
}

impl LayoutSchema for V4AnalyzeResult {
    fn into_page_layout(self) -> PageLayout {
        let paragraphs = self
            .paragraphs
            .into_iter()
            .map(|p| LayoutParagraph {
                content: p.content,
                role: p.role,
            })
            .collect();

        let tables = self
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
            .collect();

        let figures = self
            .figures
            .into_iter()
            .map(|f| LayoutFigure {
                elements: paragraph_indices(&f.elements),
                caption: f.caption.map(|c| LayoutCaption {
                    elements: paragraph_indices(&c.elements),
                    content: c.content,
                }),
            })
            .collect();

        PageLayout {
            paragraphs,
            tables,
            figures,
        }
    }
}
