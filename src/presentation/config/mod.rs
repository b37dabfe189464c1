mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DatabaseSettings, HttpSettings, LayoutSettings, LlmSettings, LoggingSettings, ParserSettings,
    ScrapeSettings, SearchSettings, ServerSettings, Settings,
};
