use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::BatchJob;
use crate::domain::value_objects::{BatchJobStatus, RecordMetadata, ScrapeJobType};
use crate::infrastructure::database::schema::ingestion_batch_jobs;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = ingestion_batch_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BatchJobModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub job_id: String,
    pub job_type: String,
    pub status: String,
    pub total_urls: i32,
    pub processed_urls: i32,
    pub successful_urls: i32,
    pub failed_urls: i32,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ingestion_batch_jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewBatchJobModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub job_id: String,
    pub job_type: String,
    pub status: String,
    pub total_urls: i32,
    pub processed_urls: i32,
    pub successful_urls: i32,
    pub failed_urls: i32,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&BatchJob> for NewBatchJobModel {
    fn from(job: &BatchJob) -> Self {
        Self {
            id: job.id(),
            tenant_id: job.tenant_id(),
            user_id: job.user_id(),
            job_id: job.job_id().to_string(),
            job_type: job.job_type().as_str().to_string(),
            status: job.status().as_str().to_string(),
            total_urls: job.total_urls(),
            processed_urls: job.processed_urls(),
            successful_urls: job.successful_urls(),
            failed_urls: job.failed_urls(),
            metadata: job.metadata().clone().into(),
            created_at: job.created_at(),
            updated_at: job.updated_at(),
        }
    }
}

impl TryFrom<BatchJobModel> for BatchJob {
    type Error = String;

    fn try_from(model: BatchJobModel) -> Result<Self, Self::Error> {
        Ok(BatchJob::from_database(
            model.id,
            model.tenant_id,
            model.user_id,
            model.job_id,
            ScrapeJobType::parse(&model.job_type)?,
            BatchJobStatus::parse(&model.status)?,
            model.total_urls,
            model.processed_urls,
            model.successful_urls,
            model.failed_urls,
            RecordMetadata::try_from(model.metadata)?,
            model.created_at,
            model.updated_at,
        ))
    }
}
