use std::sync::Arc;

use crate::domain::entities::{BatchJob, IngestionFile};
use crate::domain::repositories::batch_job_repository::BatchJobRepositoryError;
use crate::domain::repositories::file_repository::FileRepositoryError;
use crate::domain::repositories::{BatchJobRepository, FileRepository};

#[derive(Debug)]
pub enum GetBatchJobStatusError {
    NotFound(String),
    RepositoryError(String),
}

impl std::fmt::Display for GetBatchJobStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetBatchJobStatusError::NotFound(job_id) => write!(f, "Job not found: {}", job_id),
            GetBatchJobStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetBatchJobStatusError {}

impl From<BatchJobRepositoryError> for GetBatchJobStatusError {
    fn from(error: BatchJobRepositoryError) -> Self {
        GetBatchJobStatusError::RepositoryError(error.to_string())
    }
}

impl From<FileRepositoryError> for GetBatchJobStatusError {
    fn from(error: FileRepositoryError) -> Self {
        GetBatchJobStatusError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetBatchJobStatusResponse {
    pub job: BatchJob,
    pub files: Vec<IngestionFile>,
}

pub struct GetBatchJobStatusUseCase {
    batch_job_repository: Arc<dyn BatchJobRepository>,
    file_repository: Arc<dyn FileRepository>,
}

impl GetBatchJobStatusUseCase {
    pub fn new(
        batch_job_repository: Arc<dyn BatchJobRepository>,
        file_repository: Arc<dyn FileRepository>,
    ) -> Self {
        Self {
            batch_job_repository,
            file_repository,
        }
    }

    pub async fn execute(
        &self,
        job_id: &str,
    ) -> Result<GetBatchJobStatusResponse, GetBatchJobStatusError> {
        let job = self
            .batch_job_repository
            .find_by_job_id(job_id)
            .await?
            .ok_or_else(|| GetBatchJobStatusError::NotFound(job_id.to_string()))?;

        let mut files = self.file_repository.find_by_batch_job(job.id()).await?;
        files.sort_by(|a, b| a.created_at().cmp(&b.created_at()));

        Ok(GetBatchJobStatusResponse { job, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::InMemoryStore;
    use crate::domain::value_objects::{
        ContentType, RecordMetadata, ScrapeJobType, SourceChannel,
    };
    use uuid::Uuid;

    #[tokio::test]
    async fn test_returns_job_with_its_files() {
        let store = Arc::new(InMemoryStore::new());
        let job = BatchJob::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "fc-job-1".to_string(),
            ScrapeJobType::Bulk,
            2,
            RecordMetadata::new(),
        );
        store.seed_job(job.clone());

        let file = IngestionFile::new(
            Uuid::new_v4(),
            job.tenant_id(),
            job.user_id(),
            "BULK_example.com_1.md".to_string(),
            ContentType::Markdown,
            64,
            SourceChannel::FirecrawlBulk,
            Some(job.id()),
            "uri".to_string(),
            "key".to_string(),
            None,
        );
        store.seed_file(file.clone());

        let use_case = GetBatchJobStatusUseCase::new(
            store.clone() as Arc<dyn BatchJobRepository>,
            store.clone() as Arc<dyn FileRepository>,
        );
        let response = use_case.execute("fc-job-1").await.unwrap();

        assert_eq!(response.job.job_id(), "fc-job-1");
        assert_eq!(response.files.len(), 1);
        assert_eq!(response.files[0].id(), file.id());
    }

    #[tokio::test]
    async fn test_unknown_job_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let use_case = GetBatchJobStatusUseCase::new(
            store.clone() as Arc<dyn BatchJobRepository>,
            store.clone() as Arc<dyn FileRepository>,
        );

        assert!(matches!(
            use_case.execute("nope").await,
            Err(GetBatchJobStatusError::NotFound(_))
        ));
    }
}
