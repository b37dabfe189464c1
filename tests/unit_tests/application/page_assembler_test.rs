use dosesense::application::services::{assemble_document, title_case};
use dosesense::domain::{
    LayoutCaption, LayoutCell, LayoutFigure, LayoutParagraph, LayoutTable, PageLayout,
};

fn cell(row_index: usize, column_index: usize, content: &str, elements: Vec<usize>) -> LayoutCell {
    LayoutCell {
        row_index,
        column_index,
        content: content.to_string(),
        elements,
    }
}

fn clinic_page() -> PageLayout {
    PageLayout {
        paragraphs: vec![
            LayoutParagraph::with_role("City Clinic", "title"),
            LayoutParagraph::plain("Patient: John Doe"),
            LayoutParagraph::plain("Figure 1: Clinic logo"),
            LayoutParagraph::plain("LOGO"),
            LayoutParagraph::plain("Drug"),
            LayoutParagraph::plain("Dose"),
            LayoutParagraph::plain("Take with food."),
        ],
        tables: vec![LayoutTable {
            row_count: 1,
            column_count: 2,
            cells: vec![cell(0, 0, "Drug", vec![4]), cell(0, 1, "Dose", vec![5])],
        }],
        figures: vec![LayoutFigure {
            elements: vec![2, 3],
            caption: Some(LayoutCaption {
                content: "Figure 1: Clinic logo".to_string(),
                elements: vec![2],
            }),
        }],
    }
}

#[test]
fn given_figure_caption_and_table_when_assembling_then_consumed_paragraphs_are_excluded() {
    let document = assemble_document(&[clinic_page()]);
    let page = &document.pages[&1];

    assert_eq!(page.text, "Title: City Clinic\n Patient: John Doe Take with food.");
    assert_eq!(page.images, vec!["Figure 1: Clinic logo"]);
    assert_eq!(page.tables, vec!["| Drug | Dose |\n| --- | --- |"]);
    assert!(!page.text.contains("LOGO"));
    assert!(!page.text.contains("Drug"));
}

#[test]
fn given_first_title_paragraph_when_assembling_then_it_becomes_document_title() {
    let document = assemble_document(&[clinic_page()]);

    assert_eq!(document.title.as_deref(), Some("City Clinic"));
}

#[test]
fn given_title_on_later_page_when_assembling_then_it_is_relabelled_heading() {
    let first = PageLayout {
        paragraphs: vec![LayoutParagraph::with_role("Main Title", "title")],
        ..PageLayout::default()
    };
    let second = PageLayout {
        paragraphs: vec![
            LayoutParagraph::with_role("Second Title", "title"),
            LayoutParagraph::with_role("Dosage", "sectionHeading"),
            LayoutParagraph::plain("Twice daily."),
        ],
        ..PageLayout::default()
    };

    let document = assemble_document(&[first, second]);

    assert_eq!(document.title.as_deref(), Some("Main Title"));
    assert_eq!(
        document.pages[&2].text,
        "Heading: Second Title\n\n\nSectionheading: Dosage\n Twice daily."
    );
}

#[test]
fn given_layouts_when_assembling_then_pages_are_keyed_one_to_n() {
    let document = assemble_document(&[
        PageLayout::default(),
        PageLayout::default(),
        PageLayout::default(),
    ]);

    assert_eq!(document.total_pages, 3);
    assert_eq!(document.pages.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(document.has_contiguous_pages());
    assert!(document.title.is_none());
}

#[test]
fn given_figure_without_caption_when_assembling_then_figure_text_is_dropped_and_no_image_recorded() {
    let layout = PageLayout {
        paragraphs: vec![
            LayoutParagraph::plain("Chart label"),
            LayoutParagraph::plain("Body text."),
        ],
        figures: vec![LayoutFigure {
            elements: vec![0],
            caption: None,
        }],
        ..PageLayout::default()
    };

    let document = assemble_document(&[layout]);
    let page = &document.pages[&1];

    assert_eq!(page.text, "Body text.");
    assert!(page.images.is_empty());
}

#[test]
fn given_role_labels_when_title_casing_then_each_alphabetic_run_is_capitalized() {
    assert_eq!(title_case("title"), "Title");
    assert_eq!(title_case("pageHeader"), "Pageheader");
    assert_eq!(title_case("page_footer"), "Page_Footer");
    assert_eq!(title_case("footnote2b"), "Footnote2B");
}
