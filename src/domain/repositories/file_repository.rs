use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::{Chunk, ErrorRecord, IngestionFile, StatusLogEntry};
use crate::domain::value_objects::FileStatus;

#[derive(Debug)]
pub enum FileRepositoryError {
    NotFound(Uuid),
    DatabaseError(String),
    ValidationError(String),
}

impl std::fmt::Display for FileRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileRepositoryError::NotFound(id) => write!(f, "File not found: {}", id),
            FileRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            FileRepositoryError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
        }
    }
}

impl std::error::Error for FileRepositoryError {}

/// Final counts reported with a COMPLETED transition.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionCounts {
    pub total_chunks: i32,
    pub total_tokens: Option<i32>,
    pub total_pages: Option<i32>,
}

/// Persistence seam for files. The multi-row operations are transactional at
/// the storage layer: each either applies every listed write or none.
#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn insert(&self, file: &IngestionFile) -> Result<(), FileRepositoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IngestionFile>, FileRepositoryError>;

    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<FileStatus>,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError>;

    async fn find_by_batch_job(
        &self,
        batch_job_id: Uuid,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError>;

    /// Intermediate pipeline transition plus its journal entry, atomically.
    async fn transition_status(
        &self,
        file_id: Uuid,
        status: FileStatus,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError>;

    /// COMPLETED transition in one transaction: final counts on the file row,
    /// bulk chunk insert with duplicate `(file_id, chunk_index)` treated as a
    /// no-op, and one summary journal entry.
    async fn complete_with_chunks(
        &self,
        file_id: Uuid,
        counts: CompletionCounts,
        chunks: &[Chunk],
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError>;

    /// FAILED transition in one transaction: status update, error record,
    /// journal entry.
    async fn mark_failed(
        &self,
        file_id: Uuid,
        error: &ErrorRecord,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError>;

    /// Purge step one: the file row goes to DELETING and its existing journal
    /// entries are overwritten to the DELETING marker, atomically.
    async fn mark_deleting(&self, file_id: Uuid) -> Result<(), FileRepositoryError>;

    /// Purge final step in one transaction: detach any source pointing at the
    /// file (clear the link, extraction FAILED), overwrite remaining journal
    /// entries to DELETED, append the final DELETED entry, delete the file
    /// row (chunks cascade).
    async fn purge(
        &self,
        file: &IngestionFile,
        final_log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError>;
}
