use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub enum VectorIndexError {
    NetworkError(String),
    DeleteFailed(String),
}

impl std::fmt::Display for VectorIndexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorIndexError::NetworkError(msg) => write!(f, "Vector index unreachable: {}", msg),
            VectorIndexError::DeleteFailed(msg) => write!(f, "Vector delete failed: {}", msg),
        }
    }
}

impl std::error::Error for VectorIndexError {}

/// External vector index. Writes happen on the embedding side; this service
/// only ever deletes, by tenant namespace and owning-file tag.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    async fn delete_file_vectors(
        &self,
        namespace: &str,
        file_id: Uuid,
    ) -> Result<(), VectorIndexError>;
}
