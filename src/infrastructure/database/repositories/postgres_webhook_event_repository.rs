use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::repositories::webhook_event_repository::{
    LedgerOutcome, WebhookEventRepository, WebhookEventRepositoryError, WebhookSource,
};
use crate::infrastructure::database::models::{NewWebhookEventModel, WebhookEventModel};
use crate::infrastructure::database::schema::webhook_events;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

pub struct PostgresWebhookEventRepository {
    pool: DbPool,
}

impl PostgresWebhookEventRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WebhookEventRepository for PostgresWebhookEventRepository {
    async fn record(
        &self,
        source: WebhookSource,
        digest: &str,
        payload: &serde_json::Value,
    ) -> Result<LedgerOutcome, WebhookEventRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| WebhookEventRepositoryError::DatabaseError(e.to_string()))?;

        let row = NewWebhookEventModel {
            id: Uuid::new_v4(),
            source: source.as_str().to_string(),
            event_digest: digest.to_string(),
            payload: payload.clone(),
            received_at: Utc::now(),
        };

        // The unique digest column arbitrates concurrent deliveries of the
        // same event: exactly one insert wins, every other delivery reads
        // back as a duplicate.
        let inserted = diesel::insert_into(webhook_events::table)
            .values(&row)
            .on_conflict(webhook_events::event_digest)
            .do_nothing()
            .returning(WebhookEventModel::as_returning())
            .get_result::<WebhookEventModel>(&mut conn)
            .optional()
            .map_err(|e| WebhookEventRepositoryError::DatabaseError(e.to_string()))?;

        match inserted {
            Some(model) => Ok(LedgerOutcome::Recorded(model.id)),
            None => Ok(LedgerOutcome::Duplicate),
        }
    }

    async fn mark_processed(&self, event_id: Uuid) -> Result<(), WebhookEventRepositoryError> {
        let mut conn = get_connection_from_pool(&self.pool)
            .map_err(|e| WebhookEventRepositoryError::DatabaseError(e.to_string()))?;

        diesel::update(webhook_events::table.find(event_id))
            .set(webhook_events::processed_at.eq(Some(Utc::now())))
            .execute(&mut conn)
            .map_err(|e| WebhookEventRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
