use async_trait::async_trait;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::entities::Chunk;
use crate::domain::repositories::chunk_repository::{ChunkRepository, ChunkRepositoryError};
use crate::infrastructure::database::models::ChunkModel;
use crate::infrastructure::database::schema::ingestion_chunks;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresChunkRepository {
    pool: DbPool,
}

impl PostgresChunkRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChunkRepository for PostgresChunkRepository {
    async fn find_by_file_id(&self, file_id: Uuid) -> Result<Vec<Chunk>, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let models = ingestion_chunks::table
            .filter(ingestion_chunks::file_id.eq(file_id))
            .order(ingestion_chunks::chunk_index.asc())
            .load::<ChunkModel>(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        let mut chunks = Vec::with_capacity(models.len());
        for model in models {
            chunks.push(Chunk::try_from(model).map_err(ChunkRepositoryError::ValidationError)?);
        }
        Ok(chunks)
    }

    async fn count_by_file_id(&self, file_id: Uuid) -> Result<i64, ChunkRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))?;

        ingestion_chunks::table
            .filter(ingestion_chunks::file_id.eq(file_id))
            .count()
            .get_result(&mut conn)
            .map_err(|e| ChunkRepositoryError::DatabaseError(e.to_string()))
    }
}
