use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{ContentType, FileStatus, RecordMetadata, SourceChannel};

/// One ingestible unit of content and its pipeline state. Created by the
/// content acquirer; status and count fields are mutated only by the webhook
/// reconciliation engine and the purge orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestionFile {
    id: Uuid,
    tenant_id: Uuid,
    user_id: Uuid,
    file_name: String,
    file_type: ContentType,
    file_size: i64,
    file_tokens: Option<i32>,
    file_pages: Option<i32>,
    file_source: SourceChannel,
    source_id: Option<Uuid>,
    batch_job_id: Option<Uuid>,
    storage_uri: String,
    object_key: String,
    total_chunks: i32,
    status: FileStatus,
    metadata: Option<RecordMetadata>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl IngestionFile {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        tenant_id: Uuid,
        user_id: Uuid,
        file_name: String,
        file_type: ContentType,
        file_size: i64,
        file_source: SourceChannel,
        batch_job_id: Option<Uuid>,
        storage_uri: String,
        object_key: String,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            tenant_id,
            user_id,
            file_name,
            file_type,
            file_size,
            file_tokens: None,
            file_pages: None,
            file_source,
            source_id: None,
            batch_job_id,
            storage_uri,
            object_key,
            total_chunks: 0,
            status: FileStatus::Uploaded,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstructs a file from persisted values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        tenant_id: Uuid,
        user_id: Uuid,
        file_name: String,
        file_type: ContentType,
        file_size: i64,
        file_tokens: Option<i32>,
        file_pages: Option<i32>,
        file_source: SourceChannel,
        source_id: Option<Uuid>,
        batch_job_id: Option<Uuid>,
        storage_uri: String,
        object_key: String,
        total_chunks: i32,
        status: FileStatus,
        metadata: Option<RecordMetadata>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            user_id,
            file_name,
            file_type,
            file_size,
            file_tokens,
            file_pages,
            file_source,
            source_id,
            batch_job_id,
            storage_uri,
            object_key,
            total_chunks,
            status,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> ContentType {
        self.file_type
    }

    pub fn file_size(&self) -> i64 {
        self.file_size
    }

    pub fn file_tokens(&self) -> Option<i32> {
        self.file_tokens
    }

    pub fn file_pages(&self) -> Option<i32> {
        self.file_pages
    }

    pub fn file_source(&self) -> SourceChannel {
        self.file_source
    }

    pub fn source_id(&self) -> Option<Uuid> {
        self.source_id
    }

    pub fn batch_job_id(&self) -> Option<Uuid> {
        self.batch_job_id
    }

    pub fn storage_uri(&self) -> &str {
        &self.storage_uri
    }

    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    pub fn total_chunks(&self) -> i32 {
        self.total_chunks
    }

    pub fn status(&self) -> FileStatus {
        self.status
    }

    pub fn metadata(&self) -> Option<&RecordMetadata> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn can_transition_to(&self, next: FileStatus) -> bool {
        self.status.can_transition_to(next)
    }
}
