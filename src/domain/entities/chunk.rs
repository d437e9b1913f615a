use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::RecordMetadata;

/// One segment of a file's extracted text, as reported by the external
/// processor. Chunks are inserted in bulk with the owning file's COMPLETED
/// transition and are immutable afterwards; `(file_id, chunk_index)` is
/// unique and a duplicate insert is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    id: Uuid,
    file_id: Uuid,
    chunk_index: i32,
    object_key: String,
    chunk_text_preview_link: Option<String>,
    token_count: i32,
    embedding_status: String,
    vector_id: Option<String>,
    vector_namespace: Option<String>,
    vector_metadata: Option<RecordMetadata>,
    page_number: Option<i32>,
    created_at: DateTime<Utc>,
}

impl Chunk {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_id: Uuid,
        chunk_index: i32,
        object_key: String,
        chunk_text_preview_link: Option<String>,
        token_count: i32,
        embedding_status: String,
        vector_id: Option<String>,
        vector_namespace: Option<String>,
        vector_metadata: Option<RecordMetadata>,
        page_number: Option<i32>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            file_id,
            chunk_index,
            object_key,
            chunk_text_preview_link,
            token_count,
            embedding_status,
            vector_id,
            vector_namespace,
            vector_metadata,
            page_number,
            created_at: Utc::now(),
        }
    }

    /// Reconstructs a chunk from persisted values.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        file_id: Uuid,
        chunk_index: i32,
        object_key: String,
        chunk_text_preview_link: Option<String>,
        token_count: i32,
        embedding_status: String,
        vector_id: Option<String>,
        vector_namespace: Option<String>,
        vector_metadata: Option<RecordMetadata>,
        page_number: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            file_id,
            chunk_index,
            object_key,
            chunk_text_preview_link,
            token_count,
            embedding_status,
            vector_id,
            vector_namespace,
            vector_metadata,
            page_number,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn file_id(&self) -> Uuid {
        self.file_id
    }

    pub fn chunk_index(&self) -> i32 {
        self.chunk_index
    }

    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    pub fn chunk_text_preview_link(&self) -> Option<&str> {
        self.chunk_text_preview_link.as_deref()
    }

    pub fn token_count(&self) -> i32 {
        self.token_count
    }

    pub fn embedding_status(&self) -> &str {
        &self.embedding_status
    }

    pub fn vector_id(&self) -> Option<&str> {
        self.vector_id.as_deref()
    }

    pub fn vector_namespace(&self) -> Option<&str> {
        self.vector_namespace.as_deref()
    }

    pub fn vector_metadata(&self) -> Option<&RecordMetadata> {
        self.vector_metadata.as_ref()
    }

    pub fn page_number(&self) -> Option<i32> {
        self.page_number
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_creation() {
        let file_id = Uuid::new_v4();
        let chunk = Chunk::new(
            file_id,
            0,
            "uploads/tenants/t/files/LOCAL_UPLOAD/f/chunks/chunk_0.txt".to_string(),
            None,
            128,
            "COMPLETED".to_string(),
            Some("chunk_0".to_string()),
            Some("tenants/t".to_string()),
            None,
            Some(1),
        );

        assert_eq!(chunk.file_id(), file_id);
        assert_eq!(chunk.chunk_index(), 0);
        assert_eq!(chunk.token_count(), 128);
        assert_eq!(chunk.vector_id(), Some("chunk_0"));
    }
}
