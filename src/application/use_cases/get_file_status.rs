use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{IngestionFile, StatusLogEntry};
use crate::domain::repositories::file_repository::FileRepositoryError;
use crate::domain::repositories::status_log_repository::StatusLogRepositoryError;
use crate::domain::repositories::{FileRepository, StatusLogRepository};

#[derive(Debug)]
pub enum GetFileStatusError {
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for GetFileStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetFileStatusError::NotFound(id) => write!(f, "File not found: {}", id),
            GetFileStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for GetFileStatusError {}

impl From<FileRepositoryError> for GetFileStatusError {
    fn from(error: FileRepositoryError) -> Self {
        GetFileStatusError::RepositoryError(error.to_string())
    }
}

impl From<StatusLogRepositoryError> for GetFileStatusError {
    fn from(error: StatusLogRepositoryError) -> Self {
        GetFileStatusError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct GetFileStatusResponse {
    pub file: IngestionFile,
    pub status_logs: Vec<StatusLogEntry>,
}

pub struct GetFileStatusUseCase {
    file_repository: Arc<dyn FileRepository>,
    status_log_repository: Arc<dyn StatusLogRepository>,
}

impl GetFileStatusUseCase {
    pub fn new(
        file_repository: Arc<dyn FileRepository>,
        status_log_repository: Arc<dyn StatusLogRepository>,
    ) -> Self {
        Self {
            file_repository,
            status_log_repository,
        }
    }

    pub async fn execute(&self, file_id: Uuid) -> Result<GetFileStatusResponse, GetFileStatusError> {
        let file = self
            .file_repository
            .find_by_id(file_id)
            .await?
            .ok_or(GetFileStatusError::NotFound(file_id))?;

        let status_logs = self.status_log_repository.list_for_file(file_id).await?;

        Ok(GetFileStatusResponse { file, status_logs })
    }
}
