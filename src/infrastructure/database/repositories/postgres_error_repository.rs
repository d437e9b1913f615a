use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::ErrorRecord;
use crate::domain::repositories::error_repository::{ErrorRepository, ErrorRepositoryError};
use crate::infrastructure::database::models::{ErrorModel, NewErrorModel};
use crate::infrastructure::database::schema::ingestion_errors;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresErrorRepository {
    pool: DbPool,
}

impl PostgresErrorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ErrorRepository for PostgresErrorRepository {
    async fn insert(&self, record: &ErrorRecord) -> Result<(), ErrorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ErrorRepositoryError::DatabaseError(e.to_string()))?;

        let row = NewErrorModel::from(record);
        diesel::insert_into(ingestion_errors::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| ErrorRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn list_for_file(
        &self,
        file_id: Uuid,
    ) -> Result<Vec<ErrorRecord>, ErrorRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ErrorRepositoryError::DatabaseError(e.to_string()))?;

        let models = ingestion_errors::table
            .filter(ingestion_errors::file_id.eq(file_id))
            .order(ingestion_errors::created_at.desc())
            .load::<ErrorModel>(&mut conn)
            .map_err(|e| ErrorRepositoryError::DatabaseError(e.to_string()))?;

        let mut records = Vec::with_capacity(models.len());
        for model in models {
            records.push(
                ErrorRecord::try_from(model)
                    .map_err(ErrorRepositoryError::DatabaseError)?,
            );
        }
        Ok(records)
    }
}
