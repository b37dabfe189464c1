mod context_selector;
mod document_parser;
mod generation_service;
mod page_assembler;
mod prescription_workflow;
mod sequence_matcher;
mod staged_page;
mod structured_extraction;
mod table_renderer;
mod web_retrieval_service;

pub use context_selector::{
    DEFAULT_CONTEXT_SENTENCES, DEFAULT_SIMILARITY_THRESHOLD, MAX_CONTEXT_CHARS,
    clip_to_sentence_boundary, select_context, split_sentences,
};
pub use document_parser::{DEFAULT_MAX_CONCURRENT_PAGES, DocumentParser, ParseError};
pub use generation_service::{
    CLEAN_SCRAPED_TEMPLATE, EXTRACT_INFO_TEMPLATE, GenerationError, GenerationService,
    render_template,
};
pub use page_assembler::{assemble_document, title_case};
pub use prescription_workflow::{PrescriptionWorkflow, WorkflowError};
pub use sequence_matcher::similarity_ratio;
pub use staged_page::StagedPage;
pub use structured_extraction::{
    ExtractionError, drug_record_from_json, extract_last_json_block, parse_drug_record,
};
pub use table_renderer::render_markdown_table;
pub use web_retrieval_service::{
    DEFAULT_SITES, DEFAULT_TOP_K, RetrievalResponse, WebRetrievalService,
};
