use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::ports::{PromptTemplateStore, TemplateError};

const TEMPLATE_EXTENSION: &str = "txt";

/// Reads `<dir>/<name>.txt` on every call so edited prompts apply without a restart.
pub struct FsTemplateStore {
    dir: PathBuf,
}

impl FsTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn template_path(&self, name: &str) -> Result<PathBuf, TemplateError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(TemplateError::InvalidName(name.to_string()));
        }
        Ok(self.dir.join(name).with_extension(TEMPLATE_EXTENSION))
    }
}

#[async_trait]
impl PromptTemplateStore for FsTemplateStore {
    #[tracing::instrument(skip(self))]
    async fn load(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.template_path(name)?;

        tokio::fs::read_to_string(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TemplateError::NotFound(name.to_string())
            } else {
                TemplateError::ReadFailed {
                    name: name.to_string(),
                    reason: e.to_string(),
                }
            }
        })
    }
}
