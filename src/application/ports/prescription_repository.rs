use async_trait::async_trait;

use crate::domain::{DrugRecord, RecommendationRecord};

use super::RepositoryError;

/// Storage collaborator for prescription files and the records derived from them.
///
/// Both writes are atomic: they either commit fully or roll back.
#[async_trait]
pub trait PrescriptionRepository: Send + Sync {
    async fn read_file_content(&self, prescription_id: i64) -> Result<Vec<u8>, RepositoryError>;

    async fn write_drug_record(&self, record: &DrugRecord) -> Result<(), RepositoryError>;

    async fn write_recommendation(
        &self,
        record: &RecommendationRecord,
    ) -> Result<(), RepositoryError>;
}
