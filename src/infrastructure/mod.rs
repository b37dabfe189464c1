pub mod http;
pub mod layout;
pub mod llm;
pub mod observability;
pub mod pdf;
pub mod persistence;
pub mod scraping;
pub mod search;
pub mod templates;
