use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use crate::domain::entities::BatchJob;
use crate::domain::repositories::batch_job_repository::{
    BatchJobRepository, BatchJobRepositoryError,
};
use crate::domain::value_objects::{BatchJobStatus, RecordMetadata};
use crate::infrastructure::database::models::{BatchJobModel, NewBatchJobModel};
use crate::infrastructure::database::schema::ingestion_batch_jobs;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresBatchJobRepository {
    pool: DbPool,
}

impl PostgresBatchJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BatchJobRepository for PostgresBatchJobRepository {
    async fn insert(&self, job: &BatchJob) -> Result<(), BatchJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        let new_job = NewBatchJobModel::from(job);
        diesel::insert_into(ingestion_batch_jobs::table)
            .values(&new_job)
            .execute(&mut conn)
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_job_id(
        &self,
        job_id: &str,
    ) -> Result<Option<BatchJob>, BatchJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        let result = ingestion_batch_jobs::table
            .filter(ingestion_batch_jobs::job_id.eq(job_id))
            .first::<BatchJobModel>(&mut conn)
            .optional()
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let job =
                    BatchJob::try_from(model).map_err(BatchJobRepositoryError::ValidationError)?;
                Ok(Some(job))
            }
            None => Ok(None),
        }
    }

    async fn update_status(
        &self,
        job_id: &str,
        status: BatchJobStatus,
        metadata: Option<&RecordMetadata>,
    ) -> Result<(), BatchJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        let updated = match metadata {
            Some(metadata) => diesel::update(
                ingestion_batch_jobs::table.filter(ingestion_batch_jobs::job_id.eq(job_id)),
            )
            .set((
                ingestion_batch_jobs::status.eq(status.as_str()),
                ingestion_batch_jobs::metadata.eq(serde_json::Value::from(metadata.clone())),
                ingestion_batch_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn),
            None => diesel::update(
                ingestion_batch_jobs::table.filter(ingestion_batch_jobs::job_id.eq(job_id)),
            )
            .set((
                ingestion_batch_jobs::status.eq(status.as_str()),
                ingestion_batch_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn),
        }
        .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(BatchJobRepositoryError::NotFound(job_id.to_string()));
        }
        Ok(())
    }

    async fn record_page_outcome(
        &self,
        job_id: &str,
        success: bool,
    ) -> Result<(), BatchJobRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        // `counter = counter + 1` at the storage layer: concurrent page
        // events for one job serialize on the row, never on a stale read.
        let updated = if success {
            diesel::update(
                ingestion_batch_jobs::table.filter(ingestion_batch_jobs::job_id.eq(job_id)),
            )
            .set((
                ingestion_batch_jobs::processed_urls.eq(ingestion_batch_jobs::processed_urls + 1),
                ingestion_batch_jobs::successful_urls
                    .eq(ingestion_batch_jobs::successful_urls + 1),
                ingestion_batch_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
        } else {
            diesel::update(
                ingestion_batch_jobs::table.filter(ingestion_batch_jobs::job_id.eq(job_id)),
            )
            .set((
                ingestion_batch_jobs::processed_urls.eq(ingestion_batch_jobs::processed_urls + 1),
                ingestion_batch_jobs::failed_urls.eq(ingestion_batch_jobs::failed_urls + 1),
                ingestion_batch_jobs::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)
        }
        .map_err(|e| BatchJobRepositoryError::DatabaseError(e.to_string()))?;

        if updated == 0 {
            return Err(BatchJobRepositoryError::NotFound(job_id.to_string()));
        }
        Ok(())
    }
}
