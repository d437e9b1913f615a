use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::IngestionFile;
use crate::domain::repositories::FileRepository;
use crate::domain::repositories::file_repository::FileRepositoryError;
use crate::domain::value_objects::FileStatus;

#[derive(Debug)]
pub enum ListFilesError {
    InvalidStatus(String),
    RepositoryError(String),
}

impl std::fmt::Display for ListFilesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFilesError::InvalidStatus(status) => write!(f, "Invalid status filter: {}", status),
            ListFilesError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ListFilesError {}

impl From<FileRepositoryError> for ListFilesError {
    fn from(error: FileRepositoryError) -> Self {
        ListFilesError::RepositoryError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ListFilesRequest {
    pub tenant_id: Uuid,
    pub status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListFilesResponse {
    pub files: Vec<IngestionFile>,
}

pub struct ListFilesUseCase {
    file_repository: Arc<dyn FileRepository>,
}

impl ListFilesUseCase {
    pub fn new(file_repository: Arc<dyn FileRepository>) -> Self {
        Self { file_repository }
    }

    pub async fn execute(
        &self,
        request: ListFilesRequest,
    ) -> Result<ListFilesResponse, ListFilesError> {
        let status = match request.status.as_deref() {
            Some(raw) => Some(
                FileStatus::parse(raw).map_err(|_| ListFilesError::InvalidStatus(raw.to_string()))?,
            ),
            None => None,
        };

        let mut files = self
            .file_repository
            .find_by_tenant(request.tenant_id, status)
            .await?;
        files.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(ListFilesResponse { files })
    }
}
