use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::{Chunk, ErrorRecord, IngestionFile, StatusLogEntry};
use crate::domain::repositories::file_repository::{
    CompletionCounts, FileRepository, FileRepositoryError,
};
use crate::domain::value_objects::FileStatus;
use crate::infrastructure::database::models::{
    FileModel, NewChunkModel, NewErrorModel, NewFileModel, NewStatusLogModel,
};
use crate::infrastructure::database::schema::{
    ingestion_chunks, ingestion_errors, ingestion_files, ingestion_sources, ingestion_status_logs,
};
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresFileRepository {
    pool: DbPool,
}

impl PostgresFileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileRepository for PostgresFileRepository {
    async fn insert(&self, file: &IngestionFile) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let new_file = NewFileModel::from(file);
        diesel::insert_into(ingestion_files::table)
            .values(&new_file)
            .execute(&mut conn)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IngestionFile>, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let result = ingestion_files::table
            .find(id)
            .first::<FileModel>(&mut conn)
            .optional()
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        match result {
            Some(model) => {
                let file = IngestionFile::try_from(model)
                    .map_err(FileRepositoryError::ValidationError)?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<FileStatus>,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let mut query = ingestion_files::table
            .filter(ingestion_files::tenant_id.eq(tenant_id))
            .order(ingestion_files::created_at.desc())
            .into_boxed();
        if let Some(status) = status {
            query = query.filter(ingestion_files::status.eq(status.as_str()));
        }

        let models = query
            .load::<FileModel>(&mut conn)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let mut files = Vec::with_capacity(models.len());
        for model in models {
            files.push(
                IngestionFile::try_from(model).map_err(FileRepositoryError::ValidationError)?,
            );
        }
        Ok(files)
    }

    async fn find_by_batch_job(
        &self,
        batch_job_id: Uuid,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let models = ingestion_files::table
            .filter(ingestion_files::batch_job_id.eq(batch_job_id))
            .order(ingestion_files::created_at.asc())
            .load::<FileModel>(&mut conn)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let mut files = Vec::with_capacity(models.len());
        for model in models {
            files.push(
                IngestionFile::try_from(model).map_err(FileRepositoryError::ValidationError)?,
            );
        }
        Ok(files)
    }

    async fn transition_status(
        &self,
        file_id: Uuid,
        status: FileStatus,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let log_row = NewStatusLogModel::from(log);
        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(ingestion_files::table.find(file_id))
                .set((
                    ingestion_files::status.eq(status.as_str()),
                    ingestion_files::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            diesel::insert_into(ingestion_status_logs::table)
                .values(&log_row)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))
    }

    async fn complete_with_chunks(
        &self,
        file_id: Uuid,
        counts: CompletionCounts,
        chunks: &[Chunk],
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let chunk_rows: Vec<NewChunkModel> = chunks.iter().map(NewChunkModel::from).collect();
        let log_row = NewStatusLogModel::from(log);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(ingestion_files::table.find(file_id))
                .set((
                    ingestion_files::status.eq(FileStatus::Completed.as_str()),
                    ingestion_files::total_chunks.eq(counts.total_chunks),
                    ingestion_files::file_tokens.eq(counts.total_tokens),
                    ingestion_files::file_pages.eq(counts.total_pages),
                    ingestion_files::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            // Redelivered chunks hit the (file_id, chunk_index) unique
            // constraint and are dropped silently.
            if !chunk_rows.is_empty() {
                diesel::insert_into(ingestion_chunks::table)
                    .values(&chunk_rows)
                    .on_conflict_do_nothing()
                    .execute(conn)?;
            }

            diesel::insert_into(ingestion_status_logs::table)
                .values(&log_row)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))
    }

    async fn mark_failed(
        &self,
        file_id: Uuid,
        error: &ErrorRecord,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let error_row = NewErrorModel::from(error);
        let log_row = NewStatusLogModel::from(log);

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(ingestion_files::table.find(file_id))
                .set((
                    ingestion_files::status.eq(FileStatus::Failed.as_str()),
                    ingestion_files::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            diesel::insert_into(ingestion_errors::table)
                .values(&error_row)
                .execute(conn)?;
            diesel::insert_into(ingestion_status_logs::table)
                .values(&log_row)
                .execute(conn)?;
            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))
    }

    async fn mark_deleting(&self, file_id: Uuid) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(ingestion_files::table.find(file_id))
                .set((
                    ingestion_files::status.eq(FileStatus::Deleting.as_str()),
                    ingestion_files::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;
            diesel::update(
                ingestion_status_logs::table.filter(ingestion_status_logs::file_id.eq(file_id)),
            )
            .set((
                ingestion_status_logs::status.eq(FileStatus::Deleting.as_str()),
                ingestion_status_logs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;
            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))
    }

    async fn purge(
        &self,
        file: &IngestionFile,
        final_log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))?;

        let log_row = NewStatusLogModel::from(final_log);
        let file_id = file.id();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            diesel::update(
                ingestion_sources::table.filter(ingestion_sources::file_id.eq(file_id)),
            )
            .set((
                ingestion_sources::file_id.eq(None::<Uuid>),
                ingestion_sources::extraction_status.eq(FileStatus::Failed.as_str()),
                ingestion_sources::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            diesel::update(
                ingestion_status_logs::table.filter(ingestion_status_logs::file_id.eq(file_id)),
            )
            .set((
                ingestion_status_logs::status.eq(FileStatus::Deleted.as_str()),
                ingestion_status_logs::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            diesel::insert_into(ingestion_status_logs::table)
                .values(&log_row)
                .execute(conn)?;

            // Chunk rows ride the ON DELETE CASCADE.
            diesel::delete(ingestion_files::table.find(file_id)).execute(conn)?;
            Ok(())
        })
        .map_err(|e| FileRepositoryError::DatabaseError(e.to_string()))
    }
}
