use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ErrorRecord;
use crate::domain::value_objects::RecordMetadata;
use crate::infrastructure::database::schema::ingestion_errors;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = ingestion_errors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ErrorModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub file_id: Option<Uuid>,
    pub chunk_id: Option<Uuid>,
    pub step: String,
    pub error_message: String,
    pub retry_count: i32,
    pub resolved_at: Option<DateTime<Utc>>,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = ingestion_errors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewErrorModel {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub file_id: Option<Uuid>,
    pub chunk_id: Option<Uuid>,
    pub step: String,
    pub error_message: String,
    pub retry_count: i32,
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<ErrorModel> for ErrorRecord {
    type Error = String;

    fn try_from(model: ErrorModel) -> Result<Self, Self::Error> {
        Ok(ErrorRecord::from_database(
            model.id,
            model.tenant_id,
            model.file_id,
            model.chunk_id,
            model.step,
            model.error_message,
            model.retry_count,
            model.resolved_at,
            RecordMetadata::try_from(model.metadata)?,
            model.created_at,
        ))
    }
}

impl From<&ErrorRecord> for NewErrorModel {
    fn from(record: &ErrorRecord) -> Self {
        Self {
            id: record.id(),
            tenant_id: record.tenant_id(),
            file_id: record.file_id(),
            chunk_id: record.chunk_id(),
            step: record.step().to_string(),
            error_message: record.error_message().to_string(),
            retry_count: record.retry_count(),
            metadata: record.metadata().clone().into(),
            created_at: record.created_at(),
        }
    }
}
