use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::RecordMetadata;

/// A recorded processing failure: reported by an external service or caught
/// while applying an event. Resolution is an operator concern and happens
/// outside this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    id: Uuid,
    tenant_id: Uuid,
    file_id: Option<Uuid>,
    chunk_id: Option<Uuid>,
    step: String,
    error_message: String,
    retry_count: i32,
    resolved_at: Option<DateTime<Utc>>,
    metadata: RecordMetadata,
    created_at: DateTime<Utc>,
}

impl ErrorRecord {
    pub fn new(
        tenant_id: Uuid,
        file_id: Option<Uuid>,
        chunk_id: Option<Uuid>,
        step: impl Into<String>,
        error_message: impl Into<String>,
        metadata: RecordMetadata,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            file_id,
            chunk_id,
            step: step.into(),
            error_message: error_message.into(),
            retry_count: 0,
            resolved_at: None,
            metadata,
            created_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        tenant_id: Uuid,
        file_id: Option<Uuid>,
        chunk_id: Option<Uuid>,
        step: String,
        error_message: String,
        retry_count: i32,
        resolved_at: Option<DateTime<Utc>>,
        metadata: RecordMetadata,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            file_id,
            chunk_id,
            step,
            error_message,
            retry_count,
            resolved_at,
            metadata,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn file_id(&self) -> Option<Uuid> {
        self.file_id
    }

    pub fn chunk_id(&self) -> Option<Uuid> {
        self.chunk_id
    }

    pub fn step(&self) -> &str {
        &self.step
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn retry_count(&self) -> i32 {
        self.retry_count
    }

    pub fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
