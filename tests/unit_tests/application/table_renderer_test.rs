use dosesense::application::services::render_markdown_table;
use dosesense::domain::{LayoutCell, LayoutTable};

fn cell(row_index: usize, column_index: usize, content: &str) -> LayoutCell {
    LayoutCell {
        row_index,
        column_index,
        content: content.to_string(),
        elements: Vec::new(),
    }
}

#[test]
fn given_two_by_two_table_when_rendering_then_separator_is_second_line() {
    let table = LayoutTable {
        row_count: 2,
        column_count: 2,
        cells: vec![
            cell(0, 0, "Drug"),
            cell(0, 1, "Dose"),
            cell(1, 0, "Ibuprofen"),
            cell(1, 1, "200mg"),
        ],
    };

    let rendered = render_markdown_table(&table);
    let lines: Vec<&str> = rendered.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "| Drug | Dose |");
    assert_eq!(lines[1], "| --- | --- |");
    assert_eq!(lines[2], "| Ibuprofen | 200mg |");
}

#[test]
fn given_missing_and_out_of_range_cells_when_rendering_then_gaps_are_blank_and_extras_ignored() {
    let table = LayoutTable {
        row_count: 2,
        column_count: 2,
        cells: vec![cell(0, 0, "a"), cell(1, 1, "d"), cell(5, 0, "stray")],
    };

    let rendered = render_markdown_table(&table);

    assert_eq!(rendered, "| a |  |\n| --- | --- |\n|  | d |");
}

#[test]
fn given_table_without_rows_when_rendering_then_output_is_empty() {
    let table = LayoutTable {
        row_count: 0,
        column_count: 3,
        cells: Vec::new(),
    };

    assert_eq!(render_markdown_table(&table), "");
}
