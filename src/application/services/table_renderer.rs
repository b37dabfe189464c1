use crate::domain::LayoutTable;

/// Renders a table as a markdown grid.
///
/// The separator row always follows the first row: header detection is
/// positional, not semantic. Cells outside the declared dimensions are ignored.
pub fn render_markdown_table(table: &LayoutTable) -> String {
    let mut grid = vec![vec![""; table.column_count]; table.row_count];

    for cell in &table.cells {
        if let Some(slot) = grid
            .get_mut(cell.row_index)
            .and_then(|row| row.get_mut(cell.column_index))
        {
            *slot = cell.content.as_str();
        }
    }

    let mut lines: Vec<String> = grid
        .iter()
        .map(|row| format!("| {} |", row.join(" | ")))
        .collect();

    if !lines.is_empty() {
        let separator = format!("| {} |", vec!["---"; table.column_count].join(" | "));
        lines.insert(1, separator);
    }

    lines.join("\n")
}
