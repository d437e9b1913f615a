use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::IngestionFile;
use crate::domain::value_objects::{ContentType, FileStatus, RecordMetadata, SourceChannel};
use crate::infrastructure::database::schema::ingestion_files;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = ingestion_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FileModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub file_tokens: Option<i32>,
    pub file_pages: Option<i32>,
    pub file_source: String,
    pub source_id: Option<Uuid>,
    pub batch_job_id: Option<Uuid>,
    pub storage_uri: String,
    pub object_key: String,
    pub total_chunks: i32,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ingestion_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewFileModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub file_tokens: Option<i32>,
    pub file_pages: Option<i32>,
    pub file_source: String,
    pub source_id: Option<Uuid>,
    pub batch_job_id: Option<Uuid>,
    pub storage_uri: String,
    pub object_key: String,
    pub total_chunks: i32,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&IngestionFile> for NewFileModel {
    fn from(file: &IngestionFile) -> Self {
        Self {
            id: file.id(),
            tenant_id: file.tenant_id(),
            user_id: file.user_id(),
            file_name: file.file_name().to_string(),
            file_type: file.file_type().as_str().to_string(),
            file_size: file.file_size(),
            file_tokens: file.file_tokens(),
            file_pages: file.file_pages(),
            file_source: file.file_source().as_str().to_string(),
            source_id: file.source_id(),
            batch_job_id: file.batch_job_id(),
            storage_uri: file.storage_uri().to_string(),
            object_key: file.object_key().to_string(),
            total_chunks: file.total_chunks(),
            status: file.status().as_str().to_string(),
            metadata: file.metadata().map(|m| m.clone().into()),
            created_at: file.created_at(),
            updated_at: file.updated_at(),
        }
    }
}

impl TryFrom<FileModel> for IngestionFile {
    type Error = String;

    fn try_from(model: FileModel) -> Result<Self, Self::Error> {
        let metadata = match model.metadata {
            Some(value) => Some(RecordMetadata::try_from(value)?),
            None => None,
        };

        Ok(IngestionFile::from_database(
            model.id,
            model.tenant_id,
            model.user_id,
            model.file_name,
            ContentType::parse(&model.file_type)?,
            model.file_size,
            model.file_tokens,
            model.file_pages,
            SourceChannel::parse(&model.file_source)?,
            model.source_id,
            model.batch_job_id,
            model.storage_uri,
            model.object_key,
            model.total_chunks,
            FileStatus::parse(&model.status)?,
            metadata,
            model.created_at,
            model.updated_at,
        ))
    }
}
