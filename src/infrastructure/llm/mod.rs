mod openai_client;

pub use openai_client::{
    DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE, LlmApiMode, OpenAiCompatibleClient,
};
