mod html_scraper;
mod text_cleaner;

pub use html_scraper::{
    DEFAULT_SCRAPE_TIMEOUT, HtmlScraper, MIN_PARAGRAPH_CHARS, extract_paragraph_text,
};
pub use text_cleaner::{clean_scraped_text, repair_mojibake};
