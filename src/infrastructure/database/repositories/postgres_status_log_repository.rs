use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::StatusLogEntry;
use crate::domain::repositories::status_log_repository::{
    StatusLogRepository, StatusLogRepositoryError,
};
use crate::infrastructure::database::models::{NewStatusLogModel, StatusLogModel};
use crate::infrastructure::database::schema::ingestion_status_logs;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresStatusLogRepository {
    pool: DbPool,
}

impl PostgresStatusLogRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatusLogRepository for PostgresStatusLogRepository {
    async fn append(&self, entry: &StatusLogEntry) -> Result<(), StatusLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StatusLogRepositoryError::DatabaseError(e.to_string()))?;

        let row = NewStatusLogModel::from(entry);
        diesel::insert_into(ingestion_status_logs::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| StatusLogRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_for_file(
        &self,
        file_id: Uuid,
    ) -> Result<Vec<StatusLogEntry>, StatusLogRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| StatusLogRepositoryError::DatabaseError(e.to_string()))?;

        let models = ingestion_status_logs::table
            .filter(ingestion_status_logs::file_id.eq(file_id))
            .order(ingestion_status_logs::created_at.asc())
            .load::<StatusLogModel>(&mut conn)
            .map_err(|e| StatusLogRepositoryError::DatabaseError(e.to_string()))?;

        let mut entries = Vec::with_capacity(models.len());
        for model in models {
            entries.push(
                StatusLogEntry::try_from(model).map_err(StatusLogRepositoryError::ValidationError)?,
            );
        }
        Ok(entries)
    }
}
