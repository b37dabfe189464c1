use async_trait::async_trait;

/// Source of named prompt templates.
#[async_trait]
pub trait PromptTemplateStore: Send + Sync {
    async fn load(&self, name: &str) -> Result<String, TemplateError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template not found: {0}")]
    NotFound(String),
    #[error("invalid template name: {0}")]
    InvalidName(String),
    #[error("failed to read template {name}: {reason}")]
    ReadFailed { name: String, reason: String },
}
