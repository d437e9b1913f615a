use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infrastructure::database::schema::webhook_events;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = webhook_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct WebhookEventModel {
    pub id: Uuid,
    pub source: String,
    pub event_digest: String,
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
    pub processed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = webhook_events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct NewWebhookEventModel {
    pub id: Uuid,
    pub source: String,
    pub event_digest: String,
    pub payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}
