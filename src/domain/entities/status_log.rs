use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::RecordMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    File,
    Chunk,
    Source,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::File => "FILE",
            EntityKind::Chunk => "CHUNK",
            EntityKind::Source => "SOURCE",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "FILE" => Ok(EntityKind::File),
            "CHUNK" => Ok(EntityKind::Chunk),
            "SOURCE" => Ok(EntityKind::Source),
            _ => Err(format!("Invalid entity type: {}", s)),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append-only audit record of a state transition. Exactly one of the three
/// entity references is set, matching `entity_type`; the fallible constructor
/// enforces this for ids coming from untrusted input, the `for_*`
/// constructors make it unrepresentable internally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLogEntry {
    id: Uuid,
    tenant_id: Uuid,
    entity_type: EntityKind,
    file_id: Option<Uuid>,
    chunk_id: Option<Uuid>,
    source_id: Option<Uuid>,
    status: String,
    metadata: Option<RecordMetadata>,
    created_at: DateTime<Utc>,
}

impl StatusLogEntry {
    pub fn for_file(
        tenant_id: Uuid,
        file_id: Uuid,
        status: impl Into<String>,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            entity_type: EntityKind::File,
            file_id: Some(file_id),
            chunk_id: None,
            source_id: None,
            status: status.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn for_chunk(
        tenant_id: Uuid,
        chunk_id: Uuid,
        status: impl Into<String>,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            entity_type: EntityKind::Chunk,
            file_id: None,
            chunk_id: Some(chunk_id),
            source_id: None,
            status: status.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    pub fn for_source(
        tenant_id: Uuid,
        source_id: Uuid,
        status: impl Into<String>,
        metadata: Option<RecordMetadata>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            entity_type: EntityKind::Source,
            file_id: None,
            chunk_id: None,
            source_id: Some(source_id),
            status: status.into(),
            metadata,
            created_at: Utc::now(),
        }
    }

    /// Boundary constructor for untrusted references: rejects zero or more
    /// than one entity id, or an id that does not match the declared type.
    pub fn try_new(
        tenant_id: Uuid,
        entity_type: EntityKind,
        file_id: Option<Uuid>,
        chunk_id: Option<Uuid>,
        source_id: Option<Uuid>,
        status: impl Into<String>,
        metadata: Option<RecordMetadata>,
    ) -> Result<Self, String> {
        let populated =
            file_id.is_some() as u8 + chunk_id.is_some() as u8 + source_id.is_some() as u8;
        if populated != 1 {
            return Err(format!(
                "Status log entry must reference exactly one entity, got {}",
                populated
            ));
        }

        let matches_type = match entity_type {
            EntityKind::File => file_id.is_some(),
            EntityKind::Chunk => chunk_id.is_some(),
            EntityKind::Source => source_id.is_some(),
        };
        if !matches_type {
            return Err(format!(
                "Entity reference does not match declared type {}",
                entity_type
            ));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            tenant_id,
            entity_type,
            file_id,
            chunk_id,
            source_id,
            status: status.into(),
            metadata,
            created_at: Utc::now(),
        })
    }

    /// Reconstructs an entry from persisted values without re-validation.
    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        tenant_id: Uuid,
        entity_type: EntityKind,
        file_id: Option<Uuid>,
        chunk_id: Option<Uuid>,
        source_id: Option<Uuid>,
        status: String,
        metadata: Option<RecordMetadata>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            entity_type,
            file_id,
            chunk_id,
            source_id,
            status,
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

    pub fn entity_type(&self) -> EntityKind {
        self.entity_type
    }

    pub fn file_id(&self) -> Option<Uuid> {
        self.file_id
    }

    pub fn chunk_id(&self) -> Option<Uuid> {
        self.chunk_id
    }

    pub fn source_id(&self) -> Option<Uuid> {
        self.source_id
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn metadata(&self) -> Option<&RecordMetadata> {
        self.metadata.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
