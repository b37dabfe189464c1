mod layout_analyzer;
mod llm_client;
mod page_scraper;
mod pdf_splitter;
mod prescription_repository;
mod prompt_template_store;
mod repository_error;
mod web_search_client;

pub use layout_analyzer::{LayoutAnalyzer, LayoutAnalyzerError};
pub use llm_client::{LlmClient, LlmClientError};
pub use page_scraper::PageScraper;
pub use pdf_splitter::{PdfSplitError, PdfSplitter};
pub use prescription_repository::PrescriptionRepository;
pub use prompt_template_store::{PromptTemplateStore, TemplateError};
pub use repository_error::RepositoryError;
pub use web_search_client::WebSearchClient;
