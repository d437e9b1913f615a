use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookSource {
    Processing,
    Crawler,
}

impl WebhookSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            WebhookSource::Processing => "PROCESSING",
            WebhookSource::Crawler => "CRAWLER",
        }
    }
}

impl std::fmt::Display for WebhookSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of offering an event to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// First sighting; effects may be applied.
    Recorded(Uuid),
    /// Digest already on record: at-least-once delivery collapsed to
    /// at-most-once application.
    Duplicate,
}

#[derive(Debug)]
pub enum WebhookEventRepositoryError {
    DatabaseError(String),
}

impl std::fmt::Display for WebhookEventRepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookEventRepositoryError::DatabaseError(msg) => {
                write!(f, "Database error: {}", msg)
            }
        }
    }
}

impl std::error::Error for WebhookEventRepositoryError {}

/// The idempotency ledger. An event's identity is the hex SHA-256 digest of
/// its raw body; the row is written before any business effect so a crash
/// mid-processing still leaves an inspectable record, and redelivery of the
/// same digest is a no-op regardless of how far the first attempt got.
#[async_trait]
pub trait WebhookEventRepository: Send + Sync {
    async fn record(
        &self,
        source: WebhookSource,
        digest: &str,
        payload: &serde_json::Value,
    ) -> Result<LedgerOutcome, WebhookEventRepositoryError>;

    async fn mark_processed(&self, event_id: Uuid) -> Result<(), WebhookEventRepositoryError>;
}
