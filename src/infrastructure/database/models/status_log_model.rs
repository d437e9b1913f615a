use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{StatusLogEntry, status_log::EntityKind};
use crate::domain::value_objects::RecordMetadata;
use crate::infrastructure::database::schema::ingestion_status_logs;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = ingestion_status_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct StatusLogModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub entity_type: String,
    pub file_id: Option<Uuid>,
    pub chunk_id: Option<Uuid>,
    pub source_id: Option<Uuid>,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ingestion_status_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewStatusLogModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub entity_type: String,
    pub file_id: Option<Uuid>,
    pub chunk_id: Option<Uuid>,
    pub source_id: Option<Uuid>,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&StatusLogEntry> for NewStatusLogModel {
    fn from(entry: &StatusLogEntry) -> Self {
        Self {
            id: entry.id(),
            tenant_id: entry.tenant_id(),
            entity_type: entry.entity_type().as_str().to_string(),
            file_id: entry.file_id(),
            chunk_id: entry.chunk_id(),
            source_id: entry.source_id(),
            status: entry.status().to_string(),
            metadata: entry.metadata().map(|m| m.clone().into()),
            created_at: entry.created_at(),
        }
    }
}

impl TryFrom<StatusLogModel> for StatusLogEntry {
    type Error = String;

    fn try_from(model: StatusLogModel) -> Result<Self, Self::Error> {
        let metadata = match model.metadata {
            Some(value) => Some(RecordMetadata::try_from(value)?),
            None => None,
        };

        Ok(StatusLogEntry::from_database(
            model.id,
            model.tenant_id,
            EntityKind::parse(&model.entity_type)?,
            model.file_id,
            model.chunk_id,
            model.source_id,
            model.status,
            metadata,
            model.created_at,
        ))
    }
}
