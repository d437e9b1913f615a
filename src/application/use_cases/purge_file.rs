use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::object_storage::ObjectStorageError;
use crate::application::ports::vector_index::VectorIndexError;
use crate::application::ports::{ObjectStorage, VectorIndex};
use crate::domain::entities::StatusLogEntry;
use crate::domain::repositories::FileRepository;
use crate::domain::repositories::file_repository::FileRepositoryError;
use crate::domain::value_objects::{FileStatus, ObjectKey, RecordMetadata, vector_namespace};

#[derive(Debug)]
pub enum PurgeFileError {
    NotFound(Uuid),
    VectorIndexError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for PurgeFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PurgeFileError::NotFound(id) => write!(f, "File not found: {}", id),
            PurgeFileError::VectorIndexError(msg) => write!(f, "Vector delete failed: {}", msg),
            PurgeFileError::StorageError(msg) => write!(f, "Object delete failed: {}", msg),
            PurgeFileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for PurgeFileError {}

impl From<FileRepositoryError> for PurgeFileError {
    fn from(error: FileRepositoryError) -> Self {
        PurgeFileError::RepositoryError(error.to_string())
    }
}

impl From<VectorIndexError> for PurgeFileError {
    fn from(error: VectorIndexError) -> Self {
        PurgeFileError::VectorIndexError(error.to_string())
    }
}

impl From<ObjectStorageError> for PurgeFileError {
    fn from(error: ObjectStorageError) -> Self {
        PurgeFileError::StorageError(error.to_string())
    }
}

/// Coordinated removal of a file across the vector index, the object store,
/// and the relational store. External, harder-to-undo deletions run before
/// the authoritative row disappears: a crash mid-purge leaves a file visibly
/// stuck in DELETING for operators to retry, never orphaned vectors with no
/// record of their existence.
pub struct PurgeFileUseCase {
    file_repository: Arc<dyn FileRepository>,
    vector_index: Arc<dyn VectorIndex>,
    object_storage: Arc<dyn ObjectStorage>,
}

impl PurgeFileUseCase {
    pub fn new(
        file_repository: Arc<dyn FileRepository>,
        vector_index: Arc<dyn VectorIndex>,
        object_storage: Arc<dyn ObjectStorage>,
    ) -> Self {
        Self {
            file_repository,
            vector_index,
            object_storage,
        }
    }

    pub async fn execute(&self, file_id: Uuid) -> Result<(), PurgeFileError> {
        let file = self
            .file_repository
            .find_by_id(file_id)
            .await?
            .ok_or(PurgeFileError::NotFound(file_id))?;

        // Step 1: make the teardown visible before anything is destroyed.
        self.file_repository.mark_deleting(file_id).await?;

        // Step 2: vectors. Failure aborts here, leaving the DELETING marker.
        let namespace = vector_namespace(file.tenant_id());
        self.vector_index
            .delete_file_vectors(&namespace, file_id)
            .await?;

        // Step 3: every object under the file's prefix, raw bytes and chunk
        // texts alike.
        let prefix = ObjectKey::file_prefix(file.tenant_id(), file.file_source(), file_id);
        let keys = self.object_storage.list_keys(&prefix).await?;
        if !keys.is_empty() {
            self.object_storage.delete_objects(&keys).await?;
        }

        // Step 4: one transaction drops the authoritative state and leaves
        // the final audit marker behind.
        let final_log = StatusLogEntry::for_file(
            file.tenant_id(),
            file_id,
            FileStatus::Deleted.as_str(),
            Some(
                RecordMetadata::new()
                    .with_property("objectsDeleted", serde_json::json!(keys.len()))
                    .with_property("vectorNamespace", serde_json::json!(namespace)),
            ),
        );
        self.file_repository.purge(&file, &final_log).await?;

        tracing::info!(
            file_id = %file_id,
            tenant_id = %file.tenant_id(),
            objects = keys.len(),
            "File purged"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeObjectStorage, FakeVectorIndex, InMemoryStore};
    use crate::domain::entities::{Chunk, IngestionFile};
    use crate::domain::value_objects::{ContentType, SourceChannel};

    struct Fixture {
        store: Arc<InMemoryStore>,
        storage: Arc<FakeObjectStorage>,
        vectors: Arc<FakeVectorIndex>,
        use_case: PurgeFileUseCase,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let storage = Arc::new(FakeObjectStorage::new());
        let vectors = Arc::new(FakeVectorIndex::new());
        let use_case = PurgeFileUseCase::new(
            store.clone() as Arc<dyn FileRepository>,
            vectors.clone() as Arc<dyn VectorIndex>,
            storage.clone() as Arc<dyn ObjectStorage>,
        );
        Fixture {
            store,
            storage,
            vectors,
            use_case,
        }
    }

    async fn seed_completed_file(f: &Fixture) -> IngestionFile {
        let tenant_id = Uuid::new_v4();
        let file_id = Uuid::new_v4();
        let prefix = ObjectKey::file_prefix(tenant_id, SourceChannel::LocalUpload, file_id);

        let file = IngestionFile::from_database(
            file_id,
            tenant_id,
            Uuid::new_v4(),
            "doc.pdf".to_string(),
            ContentType::Pdf,
            10_240,
            Some(1200),
            Some(4),
            SourceChannel::LocalUpload,
            None,
            None,
            format!("https://bucket.s3.amazonaws.com/{}raw.pdf", prefix),
            format!("{}raw.pdf", prefix),
            3,
            FileStatus::Completed,
            None,
            chrono::Utc::now(),
            chrono::Utc::now(),
        );
        f.store.seed_file(file.clone());

        {
            let mut state = f.store.state.lock().unwrap();
            for index in 0..3 {
                state.chunks.push(Chunk::new(
                    file_id,
                    index,
                    ObjectKey::chunk(tenant_id, SourceChannel::LocalUpload, file_id, index)
                        .into_string(),
                    None,
                    100,
                    "COMPLETED".to_string(),
                    None,
                    None,
                    None,
                    None,
                ));
            }
            state.logs.push(StatusLogEntry::for_file(
                tenant_id,
                file_id,
                "COMPLETED",
                None,
            ));
        }

        let mut objects = vec![format!("{}raw.pdf", prefix)];
        for index in 0..3 {
            objects.push(
                ObjectKey::chunk(tenant_id, SourceChannel::LocalUpload, file_id, index)
                    .into_string(),
            );
        }
        for key in &objects {
            f.storage
                .objects
                .lock()
                .unwrap()
                .insert(key.clone(), vec![0u8; 8]);
        }

        file
    }

    #[tokio::test]
    async fn test_purge_tears_everything_down() {
        let f = fixture();
        let file = seed_completed_file(&f).await;
        let source_id = Uuid::new_v4();
        f.store.seed_source(source_id, file.id());

        f.use_case.execute(file.id()).await.unwrap();

        // Vector delete used the tenant namespace with the file tag.
        assert_eq!(
            f.vectors.deleted(),
            vec![(vector_namespace(file.tenant_id()), file.id())]
        );
        // Every object under the prefix is gone.
        assert_eq!(f.storage.object_count(), 0);
        // File row and chunks are gone from the relational store.
        assert!(f.store.file(file.id()).is_none());
        assert!(f.store.chunks_for(file.id()).is_empty());
        // The source was detached, not deleted.
        let source = f.store.source(source_id).unwrap();
        assert_eq!(source.file_id, None);
        assert_eq!(source.extraction_status, "FAILED");
        // A final DELETED journal entry survives, referencing the gone file.
        let logs = f.store.logs_for(file.id());
        assert!(!logs.is_empty());
        assert!(logs.iter().all(|l| l.status() == "DELETED"));
    }

    #[tokio::test]
    async fn test_vector_failure_leaves_file_in_deleting() {
        let f = fixture();
        let file = seed_completed_file(&f).await;
        f.vectors
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let result = f.use_case.execute(file.id()).await;

        assert!(matches!(result, Err(PurgeFileError::VectorIndexError(_))));
        // The file is visibly mid-teardown rather than silently gone, and
        // its blobs are untouched.
        let stored = f.store.file(file.id()).unwrap();
        assert_eq!(stored.status(), FileStatus::Deleting);
        assert_eq!(f.storage.object_count(), 4);
        assert_eq!(f.store.chunks_for(file.id()).len(), 3);
    }

    #[tokio::test]
    async fn test_deleting_marker_overwrites_journal() {
        let f = fixture();
        let file = seed_completed_file(&f).await;
        f.vectors
            .fail
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let _ = f.use_case.execute(file.id()).await;

        let logs = f.store.logs_for(file.id());
        assert!(logs.iter().all(|l| l.status() == "DELETING"));
    }

    #[tokio::test]
    async fn test_unknown_file_rejected() {
        let f = fixture();
        let result = f.use_case.execute(Uuid::new_v4()).await;
        assert!(matches!(result, Err(PurgeFileError::NotFound(_))));
    }
}
