use std::sync::Arc;

use dosesense::application::services::{
    DocumentParser, GenerationError, GenerationService, PrescriptionWorkflow, WebRetrievalService,
    WorkflowError,
};
use dosesense::application::ports::TemplateError;
use dosesense::domain::{CaseRequest, LayoutParagraph, PageLayout, RecommendationFacet};
use dosesense::infrastructure::pdf::LopdfSplitter;
use dosesense::infrastructure::persistence::InMemoryPrescriptionRepository;

use crate::helpers::{
    FakeLayoutAnalyzer, MemoryTemplates, ScriptedLlm, StaticScraper, StaticSearch, build_pdf, hit,
};

const CASE: CaseRequest = CaseRequest {
    person_id: 11,
    visit_occurrence_id: 22,
    prescription_id: 33,
};

const EXTRACTION_ANSWER: &str =
    "```json\n{\"drug_name\": \"Amoxicillin\", \"drug_strength\": \"500mg\", \"duration_in_days\": \"7\", \"quantity\": 21}\n```";

struct Fixture {
    repository: Arc<InMemoryPrescriptionRepository>,
    llm: Arc<ScriptedLlm>,
    workflow: PrescriptionWorkflow,
}

async fn fixture(llm: ScriptedLlm, templates: MemoryTemplates, search: StaticSearch) -> Fixture {
    let repository = Arc::new(InMemoryPrescriptionRepository::new());
    repository
        .insert_file(CASE.prescription_id, build_pdf(&["Amoxicillin 500mg"]))
        .await;

    let analyzer = FakeLayoutAnalyzer::with_layouts(vec![(
        1,
        PageLayout {
            paragraphs: vec![LayoutParagraph::plain("Amoxicillin 500mg three times daily")],
            ..PageLayout::default()
        },
    )]);
    let parser = DocumentParser::new(Arc::new(analyzer), Arc::new(LopdfSplitter::new()), 2);

    let llm = Arc::new(llm);
    let generation = GenerationService::new(llm.clone(), Arc::new(templates));

    let scraper = StaticScraper::default();
    let retrieval = WebRetrievalService::new(Arc::new(search), Arc::new(scraper));

    let workflow = PrescriptionWorkflow::new(
        repository.clone(),
        Arc::new(parser),
        Arc::new(generation),
        Arc::new(retrieval),
    );

    Fixture {
        repository,
        llm,
        workflow,
    }
}

fn facet_llm() -> ScriptedLlm {
    ScriptedLlm::answering("unexpected prompt")
        .when("EXTRACT:", EXTRACTION_ANSWER)
        .when("side effects of", "Nausea and rash.")
        .when("purpose of", "Treats bacterial infections.")
        .when("consumption recommendation", "Every eight hours.")
        .when("diet recommendation", "Avoid alcohol.")
}

fn drug_hits() -> StaticSearch {
    StaticSearch::returning(vec![hit(
        "Amoxicillin",
        "https://drugs.com/amoxicillin",
        "Amoxicillin is a penicillin antibiotic.",
    )])
}

#[tokio::test]
async fn given_stored_prescription_when_running_then_record_and_recommendations_are_persisted() {
    let fx = fixture(facet_llm(), MemoryTemplates::standard(), drug_hits()).await;

    let outcome = fx.workflow.run(CASE).await.unwrap();

    let footer = "\nReference Links:\nhttps://drugs.com/amoxicillin";
    assert_eq!(outcome.drug_table.drug_name, "Amoxicillin");
    assert_eq!(outcome.drug_table.refill_in_days, 7);
    assert_eq!(outcome.drug_table.person_id, Some(11));
    assert_eq!(outcome.drug_table.visit_occurrence_id, Some(22));
    assert_eq!(outcome.drug_table.prescription_id, Some(33));
    assert_eq!(
        outcome.recommendation_data.side_effects,
        format!("Nausea and rash.{footer}")
    );
    assert_eq!(
        outcome.recommendation_data.drug_purpose,
        format!("Treats bacterial infections.{footer}")
    );
    assert_eq!(
        outcome.recommendation_data.drug_consumption_pattern,
        format!("Every eight hours.{footer}")
    );
    assert_eq!(
        outcome.recommendation_data.dietary_recommendation,
        format!("Avoid alcohol.{footer}")
    );
    assert_eq!(outcome.recommendation_data.person_id, 11);

    assert_eq!(fx.repository.drug_records().await, vec![outcome.drug_table.clone()]);
    assert_eq!(
        fx.repository.recommendations().await,
        vec![outcome.recommendation_data.clone()]
    );
}

#[tokio::test]
async fn given_parsed_document_when_extracting_then_prompt_carries_page_text() {
    let fx = fixture(facet_llm(), MemoryTemplates::standard(), drug_hits()).await;

    fx.workflow.run(CASE).await.unwrap();

    let prompts = fx.llm.recorded_prompts();
    assert_eq!(prompts.len(), 5);
    assert_eq!(
        prompts[0],
        "EXTRACT:\nPage 1:\nText: Amoxicillin 500mg three times daily\n"
    );
}

#[tokio::test]
async fn given_unknown_prescription_when_running_then_not_found_and_nothing_written() {
    let fx = fixture(facet_llm(), MemoryTemplates::standard(), drug_hits()).await;

    let result = fx
        .workflow
        .run(CaseRequest {
            prescription_id: 999,
            ..CASE
        })
        .await;

    assert!(matches!(result, Err(WorkflowError::NotFound(_))));
    assert!(fx.repository.drug_records().await.is_empty());
    assert!(fx.repository.recommendations().await.is_empty());
}

#[tokio::test]
async fn given_model_without_json_when_running_then_extraction_fails_before_any_write() {
    let fx = fixture(
        ScriptedLlm::answering("I could not read this prescription."),
        MemoryTemplates::standard(),
        drug_hits(),
    )
    .await;

    let result = fx.workflow.run(CASE).await;

    assert!(matches!(result, Err(WorkflowError::Generation(GenerationError::Extraction(_)))));
    assert!(fx.repository.drug_records().await.is_empty());
}

#[tokio::test]
async fn given_missing_synthesis_template_when_running_then_no_recommendation_is_written() {
    let templates = MemoryTemplates::default().with("extract_info", "EXTRACT:\n{{ input_text }}");
    let fx = fixture(facet_llm(), templates, drug_hits()).await;

    let result = fx.workflow.run(CASE).await;

    assert!(matches!(
        result,
        Err(WorkflowError::Generation(GenerationError::Template(TemplateError::NotFound(_))))
    ));
    assert_eq!(fx.repository.drug_records().await.len(), 1);
    assert!(fx.repository.recommendations().await.is_empty());
}

#[tokio::test]
async fn given_one_facet_model_failure_when_running_then_that_facet_keeps_only_references() {
    let llm = ScriptedLlm::answering("unexpected prompt")
        .when("EXTRACT:", EXTRACTION_ANSWER)
        .fail_when("diet recommendation")
        .when("SYNTHESIZE:", "General answer.");
    let fx = fixture(llm, MemoryTemplates::standard(), drug_hits()).await;

    let outcome = fx.workflow.run(CASE).await.unwrap();

    assert_eq!(
        outcome.recommendation_data.dietary_recommendation,
        "\nReference Links:\nhttps://drugs.com/amoxicillin"
    );
    assert!(outcome.recommendation_data.side_effects.starts_with("General answer."));
    assert_eq!(fx.repository.recommendations().await.len(), 1);
}

#[tokio::test]
async fn given_search_backend_down_when_synthesizing_then_answer_has_empty_reference_list() {
    let fx = fixture(facet_llm(), MemoryTemplates::standard(), StaticSearch::unavailable()).await;

    let answer = fx
        .workflow
        .synthesize(RecommendationFacet::Purpose, "Amoxicillin")
        .await
        .unwrap();

    assert_eq!(answer, "Treats bacterial infections.\nReference Links:\n");
    let prompt = fx.llm.recorded_prompts().pop().unwrap();
    assert_eq!(
        prompt,
        "SYNTHESIZE:\nQuestion: What is the purpose of Amoxicillin?\nSnippets:"
    );
}
