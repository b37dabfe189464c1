use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;

use crate::application::ports::{PrescriptionRepository, RepositoryError};
use crate::domain::{DrugRecord, RecommendationRecord};

pub struct PgPrescriptionRepository {
    pool: PgPool,
}

impl PgPrescriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, RepositoryError> {
        self.pool
            .begin()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }

    async fn commit_or_rollback(
        tx: Transaction<'static, Postgres>,
        outcome: Result<(), sqlx::Error>,
    ) -> Result<(), RepositoryError> {
        match outcome {
            Ok(()) => tx
                .commit()
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string())),
            Err(e) => {
                if let Err(rollback_error) = tx.rollback().await {
                    tracing::warn!(error = %rollback_error, "Rollback failed");
                }
                Err(RepositoryError::RolledBack(e.to_string()))
            }
        }
    }
}

#[async_trait]
impl PrescriptionRepository for PgPrescriptionRepository {
    #[instrument(skip(self))]
    async fn read_file_content(&self, prescription_id: i64) -> Result<Vec<u8>, RepositoryError> {
        let row: Option<(Vec<u8>,)> =
            sqlx::query_as("SELECT file_content FROM prescription WHERE id = $1")
                .bind(prescription_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::QueryFailed(e.to_string()))?;

        row.map(|(content,)| content)
            .ok_or_else(|| RepositoryError::NotFound(format!("prescription {prescription_id}")))
    }

    #[instrument(skip(self, record), fields(drug_name = %record.drug_name))]
    async fn write_drug_record(&self, record: &DrugRecord) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        let outcome = sqlx::query(
            r#"
            INSERT INTO drugs (
                drug_name, visit_occurrence_id, drug_strength, frequency,
                duration_in_days, drug_form, quantity, instructions, person_id,
                refill_in_days, prescription_id, schedule_status
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&record.drug_name)
        .bind(record.visit_occurrence_id)
        .bind(&record.drug_strength)
        .bind(&record.frequency)
        .bind(record.duration_in_days)
        .bind(&record.drug_form)
        .bind(record.quantity)
        .bind(&record.instructions)
        .bind(record.person_id)
        .bind(record.refill_in_days)
        .bind(record.prescription_id)
        .bind(record.schedule_status)
        .execute(&mut *tx)
        .await
        .map(|_| ());

        Self::commit_or_rollback(tx, outcome).await
    }

    #[instrument(skip(self, record), fields(prescription_id = record.prescription_id))]
    async fn write_recommendation(
        &self,
        record: &RecommendationRecord,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.begin().await?;

        let outcome = sqlx::query(
            r#"
            INSERT INTO patient_drug_recommendation (
                visit_occurrence_id, dietary_recommendation, side_effects,
                drug_purpose, drug_consumption_pattern, person_id, prescription_id
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(record.visit_occurrence_id)
        .bind(&record.dietary_recommendation)
        .bind(&record.side_effects)
        .bind(&record.drug_purpose)
        .bind(&record.drug_consumption_pattern)
        .bind(record.person_id)
        .bind(record.prescription_id)
        .execute(&mut *tx)
        .await
        .map(|_| ());

        Self::commit_or_rollback(tx, outcome).await
    }
}
