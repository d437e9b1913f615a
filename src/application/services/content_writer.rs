use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::ObjectStorage;
use crate::application::ports::object_storage::ObjectStorageError;
use crate::domain::entities::{IngestionFile, StatusLogEntry};
use crate::domain::repositories::{
    FileRepository, StatusLogRepository, file_repository::FileRepositoryError,
    status_log_repository::StatusLogRepositoryError,
};
use crate::domain::value_objects::{ContentType, FileStatus, ObjectKey, RecordMetadata, SourceChannel};

#[derive(Debug)]
pub enum ContentWriterError {
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ContentWriterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentWriterError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            ContentWriterError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ContentWriterError {}

impl From<ObjectStorageError> for ContentWriterError {
    fn from(error: ObjectStorageError) -> Self {
        ContentWriterError::StorageError(error.to_string())
    }
}

impl From<FileRepositoryError> for ContentWriterError {
    fn from(error: FileRepositoryError) -> Self {
        ContentWriterError::RepositoryError(error.to_string())
    }
}

impl From<StatusLogRepositoryError> for ContentWriterError {
    fn from(error: StatusLogRepositoryError) -> Self {
        ContentWriterError::RepositoryError(error.to_string())
    }
}

/// One unit of content about to enter the pipeline, whatever its channel.
#[derive(Debug, Clone)]
pub struct NewContent {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub content_type: ContentType,
    pub channel: SourceChannel,
    pub bytes: Vec<u8>,
    pub batch_job_id: Option<Uuid>,
    pub metadata: Option<RecordMetadata>,
    pub log_metadata: Option<RecordMetadata>,
}

/// Shared tail of every acquisition path (upload, transcript, scraped page):
/// put the raw bytes, then insert the file row in UPLOADED, then append the
/// matching journal entry — in that order, so a row never exists without its
/// bytes.
pub struct ContentWriterService {
    object_storage: Arc<dyn ObjectStorage>,
    file_repository: Arc<dyn FileRepository>,
    status_log_repository: Arc<dyn StatusLogRepository>,
}

impl ContentWriterService {
    pub fn new(
        object_storage: Arc<dyn ObjectStorage>,
        file_repository: Arc<dyn FileRepository>,
        status_log_repository: Arc<dyn StatusLogRepository>,
    ) -> Self {
        Self {
            object_storage,
            file_repository,
            status_log_repository,
        }
    }

    pub async fn persist_new_file(
        &self,
        content: NewContent,
    ) -> Result<IngestionFile, ContentWriterError> {
        let file_id = Uuid::new_v4();
        let key = ObjectKey::raw_content(
            content.tenant_id,
            content.channel,
            file_id,
            content.content_type,
        );

        let stored = self
            .object_storage
            .put_object(key.as_str(), &content.bytes, content.content_type.mime())
            .await?;

        let file = IngestionFile::new(
            file_id,
            content.tenant_id,
            content.user_id,
            content.file_name,
            content.content_type,
            content.bytes.len() as i64,
            content.channel,
            content.batch_job_id,
            stored.storage_uri,
            stored.object_key,
            content.metadata,
        );
        self.file_repository.insert(&file).await?;

        let entry = StatusLogEntry::for_file(
            content.tenant_id,
            file_id,
            FileStatus::Uploaded.as_str(),
            content.log_metadata,
        );
        self.status_log_repository.append(&entry).await?;

        tracing::info!(
            file_id = %file_id,
            tenant_id = %content.tenant_id,
            channel = %content.channel,
            size = file.file_size(),
            "File acquired"
        );

        Ok(file)
    }
}
