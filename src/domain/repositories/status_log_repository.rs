use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::StatusLogEntry;

#[derive(Debug)]
pub enum StatusLogRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for StatusLogRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusLogRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            StatusLogRepositoryError::ValidationError(msg) => {
                write!(f, "Validation error: {}", msg)
            }
        }
    }
}

impl std::error::Error for StatusLogRepositoryError {}

/// Append-only journal. Entries are never updated or deleted here; the one
/// sanctioned mutation (overwriting to DELETING/DELETED markers) happens
/// inside the purge transactions owned by the file repository.
#[async_trait]
pub trait StatusLogRepository: Send + Sync {
    async fn append(&self, entry: &StatusLogEntry) -> Result<(), StatusLogRepositoryError>;

    async fn list_for_file(
        &self,
        file_id: Uuid,
    ) -> Result<Vec<StatusLogEntry>, StatusLogRepositoryError>;
}
