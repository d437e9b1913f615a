use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Chunk;
use crate::domain::value_objects::RecordMetadata;
use crate::infrastructure::database::schema::ingestion_chunks;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = ingestion_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ChunkModel {
    pub id: Uuid,
    pub file_id: Uuid,
    pub chunk_index: i32,
    pub object_key: String,
    pub chunk_text_preview_link: Option<String>,
    pub token_count: i32,
    pub embedding_status: String,
    pub vector_id: Option<String>,
    pub vector_namespace: Option<String>,
    pub vector_metadata: Option<serde_json::Value>,
    pub page_number: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ingestion_chunks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewChunkModel {
    pub id: Uuid,
    pub file_id: Uuid,
    pub chunk_index: i32,
    pub object_key: String,
    pub chunk_text_preview_link: Option<String>,
    pub token_count: i32,
    pub embedding_status: String,
    pub vector_id: Option<String>,
    pub vector_namespace: Option<String>,
    pub vector_metadata: Option<serde_json::Value>,
    pub page_number: Option<i32>,
}

impl From<&Chunk> for NewChunkModel {
    fn from(chunk: &Chunk) -> Self {
        Self {
            id: chunk.id(),
            file_id: chunk.file_id(),
            chunk_index: chunk.chunk_index(),
            object_key: chunk.object_key().to_string(),
            chunk_text_preview_link: chunk.chunk_text_preview_link().map(|s| s.to_string()),
            token_count: chunk.token_count(),
            embedding_status: chunk.embedding_status().to_string(),
            vector_id: chunk.vector_id().map(|s| s.to_string()),
            vector_namespace: chunk.vector_namespace().map(|s| s.to_string()),
            vector_metadata: chunk.vector_metadata().map(|m| m.clone().into()),
            page_number: chunk.page_number(),
        }
    }
}

impl TryFrom<ChunkModel> for Chunk {
    type Error = String;

    fn try_from(model: ChunkModel) -> Result<Self, Self::Error> {
        let vector_metadata = match model.vector_metadata {
            Some(value) => Some(RecordMetadata::try_from(value)?),
            None => None,
        };

        Ok(Chunk::from_database(
            model.id,
            model.file_id,
            model.chunk_index,
            model.object_key,
            model.chunk_text_preview_link,
            model.token_count,
            model.embedding_status,
            model.vector_id,
            model.vector_namespace,
            vector_metadata,
            model.page_number,
            model.created_at,
        ))
    }
}
