use std::sync::Arc;
use std::time::Instant;

use crate::application::ports::{PrescriptionRepository, RepositoryError};
use crate::domain::{
    CaseOutcome, CaseRequest, DrugRecord, RecommendationFacet, RecommendationRecord, WorkflowStage,
};

use super::document_parser::{DocumentParser, ParseError};
use super::generation_service::{CLEAN_SCRAPED_TEMPLATE, GenerationError, GenerationService};
use super::web_retrieval_service::WebRetrievalService;

/// Runs one prescription case from stored file to persisted recommendations.
pub struct PrescriptionWorkflow {
    repository: Arc<dyn PrescriptionRepository>,
    parser: Arc<DocumentParser>,
    generation: Arc<GenerationService>,
    retrieval: Arc<WebRetrievalService>,
}

impl PrescriptionWorkflow {
    pub fn new(
        repository: Arc<dyn PrescriptionRepository>,
        parser: Arc<DocumentParser>,
        generation: Arc<GenerationService>,
        retrieval: Arc<WebRetrievalService>,
    ) -> Self {
        Self {
            repository,
            parser,
            generation,
            retrieval,
        }
    }

    #[tracing::instrument(
        skip(self),
        fields(
            person_id = case.person_id,
            visit_occurrence_id = case.visit_occurrence_id,
            prescription_id = case.prescription_id,
        )
    )]
    pub async fn run(&self, case: CaseRequest) -> Result<CaseOutcome, WorkflowError> {
        let started = Instant::now();

        let mut stage = StageClock::enter(WorkflowStage::FetchFile);
        let pdf = self
            .repository
            .read_file_content(case.prescription_id)
            .await?;

        stage.advance(WorkflowStage::ParsePdf);
        let document = self.parser.parse(&pdf).await?;

        stage.advance(WorkflowStage::ExtractStructuredRecord);
        let drug_record = self
            .generation
            .extract_drug_record(&document.to_prompt_text())
            .await?
            .with_case(&case);

        stage.advance(WorkflowStage::PersistRecord);
        self.repository.write_drug_record(&drug_record).await?;

        stage.advance(WorkflowStage::FanoutRecommendations);
        let recommendation = self.recommend(&drug_record, &case).await?;

        stage.advance(WorkflowStage::PersistRecommendations);
        self.repository.write_recommendation(&recommendation).await?;

        stage.advance(WorkflowStage::Done);
        tracing::info!(
            drug_name = %drug_record.drug_name,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Prescription case completed"
        );

        Ok(CaseOutcome {
            drug_table: drug_record,
            recommendation_data: recommendation,
        })
    }

    async fn recommend(
        &self,
        drug_record: &DrugRecord,
        case: &CaseRequest,
    ) -> Result<RecommendationRecord, WorkflowError> {
        let drug_name = drug_record.drug_name.as_str();
        let (side_effects, drug_purpose, drug_consumption_pattern, dietary_recommendation) =
            tokio::try_join!(
                self.synthesize(RecommendationFacet::SideEffects, drug_name),
                self.synthesize(RecommendationFacet::Purpose, drug_name),
                self.synthesize(RecommendationFacet::ConsumptionPattern, drug_name),
                self.synthesize(RecommendationFacet::Diet, drug_name),
            )?;

        Ok(RecommendationRecord {
            side_effects,
            drug_purpose,
            drug_consumption_pattern,
            dietary_recommendation,
            person_id: case.person_id,
            prescription_id: case.prescription_id,
            visit_occurrence_id: case.visit_occurrence_id,
        })
    }

    /// Answers one facet question from web evidence, footed with its sources.
    pub async fn synthesize(
        &self,
        facet: RecommendationFacet,
        drug_name: &str,
    ) -> Result<String, WorkflowError> {
        let question = facet.question(drug_name);
        let evidence = self.retrieval.retrieve(&question, None, None).await;
        let (prompt_body, references) = evidence.prompt_and_references();

        let answer = self
            .generation
            .generate(&prompt_body, CLEAN_SCRAPED_TEMPLATE)
            .await?;
        if let Some(reason) = answer.degraded_reason() {
            tracing::warn!(%facet, reason, "Facet synthesized without model answer");
        }

        Ok(format!("{}{references}", answer.into_value_or_default()))
    }
}

struct StageClock {
    stage: WorkflowStage,
    entered: Instant,
}

impl StageClock {
    fn enter(stage: WorkflowStage) -> Self {
        tracing::info!(stage = %stage, "Entering stage");
        Self {
            stage,
            entered: Instant::now(),
        }
    }

    fn advance(&mut self, next: WorkflowStage) {
        tracing::info!(
            stage = %self.stage,
            elapsed_ms = self.entered.elapsed().as_millis() as u64,
            "Stage finished"
        );
        *self = Self::enter(next);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("parse: {0}")]
    Parse(#[from] ParseError),
    #[error("generation: {0}")]
    Generation(#[from] GenerationError),
    #[error("storage: {0}")]
    Storage(RepositoryError),
}

impl From<RepositoryError> for WorkflowError {
    fn from(e: RepositoryError) -> Self {
        match e {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::Storage(other),
        }
    }
}
