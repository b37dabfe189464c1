use std::sync::Arc;

use dosesense::application::ports::TemplateError;
use dosesense::application::services::{
    CLEAN_SCRAPED_TEMPLATE, ExtractionError, GenerationError,
    GenerationService, render_template,
};
use dosesense::domain::FetchOutcome;

use crate::helpers::{MemoryTemplates, ScriptedLlm};

fn service(llm: ScriptedLlm, templates: MemoryTemplates) -> (Arc<ScriptedLlm>, GenerationService) {
    let llm = Arc::new(llm);
    let service = GenerationService::new(llm.clone(), Arc::new(templates));
    (llm, service)
}

#[test]
fn given_placeholder_spacing_variants_when_rendering_then_all_are_replaced() {
    let rendered = render_template("A {{input_text}} B {{  input_text }}", "x");

    assert_eq!(rendered, "A x B x");
}

#[test]
fn given_input_with_dollar_signs_when_rendering_then_it_is_inserted_verbatim() {
    let rendered = render_template("Cost: {{ input_text }}", "$1 and $name");

    assert_eq!(rendered, "Cost: $1 and $name");
}

#[tokio::test]
async fn given_working_model_when_generating_then_prompt_is_rendered_from_template() {
    let (llm, service) = service(ScriptedLlm::answering("answer"), MemoryTemplates::standard());

    let outcome = service
        .generate("Question: why?", CLEAN_SCRAPED_TEMPLATE)
        .await
        .unwrap();

    assert_eq!(outcome, FetchOutcome::Fetched("answer".to_string()));
    assert_eq!(llm.recorded_prompts(), vec!["SYNTHESIZE:\nQuestion: why?"]);
}

#[tokio::test]
async fn given_failing_model_when_generating_then_outcome_degrades_to_empty() {
    let (_, service) = service(ScriptedLlm::failing(), MemoryTemplates::standard());

    let outcome = service.generate("text", CLEAN_SCRAPED_TEMPLATE).await.unwrap();

    assert!(outcome.is_degraded());
    assert_eq!(outcome.into_value_or_default(), "");
}

#[tokio::test]
async fn given_unknown_template_when_generating_then_template_error_is_returned() {
    let (llm, service) = service(ScriptedLlm::answering("unused"), MemoryTemplates::default());

    let result = service.generate("text", "does_not_exist").await;

    assert!(matches!(
        result,
        Err(GenerationError::Template(TemplateError::NotFound(name))) if name == "does_not_exist"
    ));
    assert!(llm.recorded_prompts().is_empty());
}

#[tokio::test]
async fn given_model_answer_with_json_when_extracting_then_drug_record_is_built() {
    let answer = "Here you go:\n```json\n{\"drug_name\": \"Lisinopril\", \"duration_in_days\": 30}\n```";
    let (llm, service) = service(ScriptedLlm::answering(answer), MemoryTemplates::standard());

    let record = service.extract_drug_record("Page 1:\nText: Lisinopril").await.unwrap();

    assert_eq!(record.drug_name, "Lisinopril");
    assert_eq!(record.refill_in_days, 30);
    assert!(llm.recorded_prompts()[0].starts_with("EXTRACT:\nPage 1:"));
}

#[tokio::test]
async fn given_failing_model_when_extracting_then_no_structured_data() {
    let (_, service) = service(ScriptedLlm::failing(), MemoryTemplates::standard());

    let result = service.extract_drug_record("text").await;

    assert!(matches!(
        result,
        Err(GenerationError::Extraction(ExtractionError::NoStructuredData))
    ));
}
