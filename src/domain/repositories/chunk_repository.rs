use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::Chunk;

#[derive(Debug)]
pub enum ChunkRepositoryError {
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for ChunkRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChunkRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ChunkRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for ChunkRepositoryError {}

/// Read side of chunk storage. Chunk writes only ever happen inside the
/// file repository's COMPLETED transaction; deletion rides the file-row
/// cascade.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    async fn find_by_file_id(&self, file_id: Uuid) -> Result<Vec<Chunk>, ChunkRepositoryError>;

    async fn count_by_file_id(&self, file_id: Uuid) -> Result<i64, ChunkRepositoryError>;
}
