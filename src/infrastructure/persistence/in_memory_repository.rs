use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{PrescriptionRepository, RepositoryError};
use crate::domain::{DrugRecord, RecommendationRecord};

/// Process-local storage for demos and tests.
#[derive(Default)]
pub struct InMemoryPrescriptionRepository {
    files: RwLock<HashMap<i64, Vec<u8>>>,
    drug_records: RwLock<Vec<DrugRecord>>,
    recommendations: RwLock<Vec<RecommendationRecord>>,
}

impl InMemoryPrescriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_file(&self, prescription_id: i64, content: Vec<u8>) {
        self.files.write().await.insert(prescription_id, content);
    }

    pub async fn drug_records(&self) -> Vec<DrugRecord> {
        self.drug_records.read().await.clone()
    }

    pub async fn recommendations(&self) -> Vec<RecommendationRecord> {
        self.recommendations.read().await.clone()
    }
}

#[async_trait]
impl PrescriptionRepository for InMemoryPrescriptionRepository {
    async fn read_file_content(&self, prescription_id: i64) -> Result<Vec<u8>, RepositoryError> {
        self.files
            .read()
            .await
            .get(&prescription_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("prescription {prescription_id}")))
    }

    async fn write_drug_record(&self, record: &DrugRecord) -> Result<(), RepositoryError> {
        self.drug_records.write().await.push(record.clone());
        Ok(())
    }

    async fn write_recommendation(
        &self,
        record: &RecommendationRecord,
    ) -> Result<(), RepositoryError> {
        self.recommendations.write().await.push(record.clone());
        Ok(())
    }
}
