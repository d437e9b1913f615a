use async_trait::async_trait;

use crate::domain::entities::BatchJob;
use crate::domain::value_objects::{BatchJobStatus, RecordMetadata};

#[derive(Debug)]
pub enum BatchJobRepositoryError {
    NotFound(String),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for BatchJobRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchJobRepositoryError::NotFound(job_id) => {
                write!(f, "Batch job not found: {}", job_id)
            }
            BatchJobRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            BatchJobRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for BatchJobRepositoryError {}

#[async_trait]
pub trait BatchJobRepository: Send + Sync {
    async fn insert(&self, job: &BatchJob) -> Result<(), BatchJobRepositoryError>;

    /// Looks a job up by the identifier assigned by the external crawler.
    async fn find_by_job_id(&self, job_id: &str)
    -> Result<Option<BatchJob>, BatchJobRepositoryError>;

    async fn update_status(
        &self,
        job_id: &str,
        status: BatchJobStatus,
        metadata: Option<&RecordMetadata>,
    ) -> Result<(), BatchJobRepositoryError>;

    /// Records one page outcome as a storage-layer `counter = counter + 1`
    /// update so concurrent page events for the same job never lose
    /// increments. `processed_urls` always moves with the outcome counter.
    async fn record_page_outcome(
        &self,
        job_id: &str,
        success: bool,
    ) -> Result<(), BatchJobRepositoryError>;
}
