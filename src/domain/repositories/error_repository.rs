use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::ErrorRecord;

#[derive(Debug)]
pub enum ErrorRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for ErrorRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ErrorRepositoryError {}

#[async_trait]
pub trait ErrorRepository: Send + Sync {
    async fn insert(&self, record: &ErrorRecord) -> Result<(), ErrorRepositoryError>;

    async fn list_for_file(&self, file_id: Uuid)
    -> Result<Vec<ErrorRecord>, ErrorRepositoryError>;
}
