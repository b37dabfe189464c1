use std::sync::{Arc, LazyLock};
use std::time::Instant;

use regex::{NoExpand, Regex};

use crate::application::ports::{LlmClient, PromptTemplateStore, TemplateError};
use crate::domain::{DrugRecord, FetchOutcome};

use super::structured_extraction::{ExtractionError, parse_drug_record};

pub const EXTRACT_INFO_TEMPLATE: &str = "extract_info";
pub const CLEAN_SCRAPED_TEMPLATE: &str = "clean_scraped";

static INPUT_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*input_text\s*\}\}").unwrap());

/// Renders prompt templates and runs them through the language model.
pub struct GenerationService {
    llm_client: Arc<dyn LlmClient>,
    templates: Arc<dyn PromptTemplateStore>,
}

impl GenerationService {
    pub fn new(llm_client: Arc<dyn LlmClient>, templates: Arc<dyn PromptTemplateStore>) -> Self {
        Self {
            llm_client,
            templates,
        }
    }

    pub async fn render_prompt(
        &self,
        template_name: &str,
        input_text: &str,
    ) -> Result<String, GenerationError> {
        let template = self.templates.load(template_name).await?;
        Ok(render_template(&template, input_text))
    }

    /// Runs `input_text` through the named template.
    ///
    /// Model failures degrade to an empty answer; a missing template is fatal.
    #[tracing::instrument(skip(self, input_text), fields(input_chars = input_text.len()))]
    pub async fn generate(
        &self,
        input_text: &str,
        template_name: &str,
    ) -> Result<FetchOutcome<String>, GenerationError> {
        let prompt = self.render_prompt(template_name, input_text).await?;
        let started = Instant::now();

        let outcome = match self.llm_client.complete(&prompt).await {
            Ok(answer) => FetchOutcome::Fetched(answer),
            Err(e) => {
                tracing::warn!(template = template_name, error = %e, "Generation degraded to empty answer");
                FetchOutcome::degraded(e.to_string())
            }
        };

        tracing::debug!(
            template = template_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            degraded = outcome.is_degraded(),
            "Generation finished"
        );

        Ok(outcome)
    }

    /// Asks the model for the prescription fields and converts its answer.
    ///
    /// A degraded model call yields no JSON and therefore `NoStructuredData`.
    pub async fn extract_drug_record(&self, document_text: &str) -> Result<DrugRecord, GenerationError> {
        let answer = self
            .generate(document_text, EXTRACT_INFO_TEMPLATE)
            .await?
            .into_value_or_default();

        Ok(parse_drug_record(&answer)?)
    }
}

/// Substitutes every `{{ input_text }}` placeholder verbatim.
pub fn render_template(template: &str, input_text: &str) -> String {
    INPUT_PLACEHOLDER
        .replace_all(template, NoExpand(input_text))
        .into_owned()
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("template: {0}")]
    Template(#[from] TemplateError),
    #[error("extraction: {0}")]
    Extraction(#[from] ExtractionError),
}
