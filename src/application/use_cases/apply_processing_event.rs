use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::services::webhook_signature::{
    SignatureError, WebhookSignatureVerifier, event_digest,
};
use crate::domain::entities::{Chunk, ErrorRecord, IngestionFile, StatusLogEntry};
use crate::domain::repositories::ErrorRepository;
use crate::domain::repositories::file_repository::{
    CompletionCounts, FileRepository, FileRepositoryError,
};
use crate::domain::repositories::webhook_event_repository::{
    LedgerOutcome, WebhookEventRepository, WebhookEventRepositoryError, WebhookSource,
};
use crate::domain::value_objects::{FileStatus, RecordMetadata};

#[derive(Debug)]
pub enum ApplyProcessingEventError {
    InvalidSignature,
    MalformedPayload(String),
    InvalidStatus(String),
    NotFound(Uuid),
    RepositoryError(String),
}

impl std::fmt::Display for ApplyProcessingEventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyProcessingEventError::InvalidSignature => write!(f, "Invalid signature"),
            ApplyProcessingEventError::MalformedPayload(msg) => {
                write!(f, "Malformed payload: {}", msg)
            }
            ApplyProcessingEventError::InvalidStatus(status) => {
                write!(f, "Invalid status: {}", status)
            }
            ApplyProcessingEventError::NotFound(id) => write!(f, "File not found: {}", id),
            ApplyProcessingEventError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApplyProcessingEventError {}

impl From<SignatureError> for ApplyProcessingEventError {
    fn from(_: SignatureError) -> Self {
        ApplyProcessingEventError::InvalidSignature
    }
}

impl From<WebhookEventRepositoryError> for ApplyProcessingEventError {
    fn from(error: WebhookEventRepositoryError) -> Self {
        ApplyProcessingEventError::RepositoryError(error.to_string())
    }
}

/// Wire shape reported by the processing service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingEventPayload {
    pub file_id: Uuid,
    pub status: String,
    pub total_chunks: Option<i32>,
    pub total_tokens: Option<i32>,
    pub total_pages: Option<i32>,
    #[serde(default)]
    pub chunks: Vec<ReportedChunk>,
    pub error: Option<ReportedFailure>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportedChunk {
    pub chunk_index: i32,
    pub object_key: String,
    pub chunk_text_preview_link: Option<String>,
    pub token_count: Option<i32>,
    pub embedding_status: Option<String>,
    pub vector_id: Option<String>,
    pub vector_namespace: Option<String>,
    pub vector_metadata: Option<serde_json::Value>,
    pub page_number: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReportedFailure {
    pub step: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApplyProcessingEventRequest {
    /// Exact bytes received; the signature and the event identity are both
    /// computed over these, never over a re-serialization.
    pub raw_body: Vec<u8>,
    pub signature: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingAck {
    Applied(FileStatus),
    /// Same event digest seen before; no effects reapplied.
    AlreadyProcessed,
    /// Valid event whose transition the forward-only state machine refused
    /// (stale or out-of-order delivery). Acknowledged without mutation.
    OutOfOrder,
}

/// Applies one file-level event from the processing service: verify, dedupe,
/// then transition the file atomically. The external system delivers
/// at-least-once and in no particular order; this end makes application
/// at-most-once and forward-only.
pub struct ApplyProcessingEventUseCase {
    verifier: WebhookSignatureVerifier,
    file_repository: Arc<dyn FileRepository>,
    error_repository: Arc<dyn ErrorRepository>,
    webhook_events: Arc<dyn WebhookEventRepository>,
}

impl ApplyProcessingEventUseCase {
    pub fn new(
        verifier: WebhookSignatureVerifier,
        file_repository: Arc<dyn FileRepository>,
        error_repository: Arc<dyn ErrorRepository>,
        webhook_events: Arc<dyn WebhookEventRepository>,
    ) -> Self {
        Self {
            verifier,
            file_repository,
            error_repository,
            webhook_events,
        }
    }

    pub async fn execute(
        &self,
        request: ApplyProcessingEventRequest,
    ) -> Result<ProcessingAck, ApplyProcessingEventError> {
        // Gate one: authenticity, on the raw bytes, before anything touches
        // the database.
        self.verifier
            .verify_hex(&request.raw_body, request.signature.as_deref())?;

        let payload_json: serde_json::Value = serde_json::from_slice(&request.raw_body)
            .map_err(|e| ApplyProcessingEventError::MalformedPayload(e.to_string()))?;

        // Gate two: the idempotency ledger. The row is durable before any
        // effect, so redelivery after a crash is still a no-op.
        let digest = event_digest(&request.raw_body);
        let event_id = match self
            .webhook_events
            .record(WebhookSource::Processing, &digest, &payload_json)
            .await?
        {
            LedgerOutcome::Duplicate => {
                tracing::debug!(digest = %digest, "Duplicate processing event acknowledged");
                return Ok(ProcessingAck::AlreadyProcessed);
            }
            LedgerOutcome::Recorded(id) => id,
        };

        let payload: ProcessingEventPayload = serde_json::from_value(payload_json)
            .map_err(|e| ApplyProcessingEventError::MalformedPayload(e.to_string()))?;

        let file = self
            .file_repository
            .find_by_id(payload.file_id)
            .await
            .map_err(|e| ApplyProcessingEventError::RepositoryError(e.to_string()))?
            .ok_or_else(|| {
                // Ledger entry stays on record so the external service is not
                // induced into a retry storm for a file this deployment does
                // not know.
                tracing::warn!(file_id = %payload.file_id, "Processing event for unknown file");
                ApplyProcessingEventError::NotFound(payload.file_id)
            })?;

        let status = FileStatus::parse_reported(&payload.status)
            .map_err(|_| ApplyProcessingEventError::InvalidStatus(payload.status.clone()))?;

        if !file.can_transition_to(status) {
            tracing::warn!(
                file_id = %file.id(),
                current = %file.status(),
                reported = %status,
                "Ignoring out-of-order processing event"
            );
            self.mark_processed(event_id).await;
            return Ok(ProcessingAck::OutOfOrder);
        }

        let applied = match status {
            FileStatus::Failed => self.apply_failed(&file, &payload).await,
            FileStatus::Completed => self.apply_completed(&file, &payload).await,
            other => self.apply_transition(&file, other).await,
        };

        if let Err(error) = applied {
            // Application failures are recorded and surfaced, but the caller
            // acknowledges them: a retry would hit the ledger and no-op, so
            // failing the webhook would only provoke redelivery noise.
            let record = ErrorRecord::new(
                file.tenant_id(),
                Some(file.id()),
                None,
                "WEBHOOK_PROCESSING",
                error.to_string(),
                RecordMetadata::new().with_property("digest", serde_json::json!(digest)),
            );
            if let Err(insert_error) = self.error_repository.insert(&record).await {
                tracing::error!(error = %insert_error, "Failed to record webhook application error");
            }
            return Err(ApplyProcessingEventError::RepositoryError(error.to_string()));
        }

        self.mark_processed(event_id).await;
        Ok(ProcessingAck::Applied(status))
    }

    async fn apply_failed(
        &self,
        file: &IngestionFile,
        payload: &ProcessingEventPayload,
    ) -> Result<(), FileRepositoryError> {
        let (step, message) = match &payload.error {
            Some(failure) => (
                failure.step.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
                failure
                    .message
                    .clone()
                    .unwrap_or_else(|| "Processing failed".to_string()),
            ),
            None => ("UNKNOWN".to_string(), "Processing failed".to_string()),
        };

        let record = ErrorRecord::new(
            file.tenant_id(),
            Some(file.id()),
            None,
            step,
            message,
            RecordMetadata::new(),
        );
        let log = StatusLogEntry::for_file(
            file.tenant_id(),
            file.id(),
            FileStatus::Failed.as_str(),
            Some(RecordMetadata::new().with_property("source", serde_json::json!("processing-webhook"))),
        );

        self.file_repository
            .mark_failed(file.id(), &record, &log)
            .await
    }

    async fn apply_completed(
        &self,
        file: &IngestionFile,
        payload: &ProcessingEventPayload,
    ) -> Result<(), FileRepositoryError> {
        let chunks: Vec<Chunk> = payload
            .chunks
            .iter()
            .map(|reported| {
                Chunk::new(
                    file.id(),
                    reported.chunk_index,
                    reported.object_key.clone(),
                    reported.chunk_text_preview_link.clone(),
                    reported.token_count.unwrap_or(0),
                    reported
                        .embedding_status
                        .clone()
                        .unwrap_or_else(|| "COMPLETED".to_string()),
                    reported.vector_id.clone(),
                    reported.vector_namespace.clone(),
                    reported
                        .vector_metadata
                        .clone()
                        .and_then(|v| RecordMetadata::from_untrusted(v).ok()),
                    reported.page_number,
                )
            })
            .collect();

        let counts = CompletionCounts {
            total_chunks: payload.total_chunks.unwrap_or(chunks.len() as i32),
            total_tokens: payload.total_tokens,
            total_pages: payload.total_pages,
        };

        let log = StatusLogEntry::for_file(
            file.tenant_id(),
            file.id(),
            FileStatus::Completed.as_str(),
            Some(
                RecordMetadata::new()
                    .with_property("source", serde_json::json!("processing-webhook"))
                    .with_property("totalChunks", serde_json::json!(counts.total_chunks))
                    .with_property("totalTokens", serde_json::json!(payload.total_tokens))
                    .with_property("totalPages", serde_json::json!(payload.total_pages)),
            ),
        );

        self.file_repository
            .complete_with_chunks(file.id(), counts, &chunks, &log)
            .await
    }

    async fn apply_transition(
        &self,
        file: &IngestionFile,
        status: FileStatus,
    ) -> Result<(), FileRepositoryError> {
        let log = StatusLogEntry::for_file(
            file.tenant_id(),
            file.id(),
            status.as_str(),
            Some(RecordMetadata::new().with_property("source", serde_json::json!("processing-webhook"))),
        );
        self.file_repository
            .transition_status(file.id(), status, &log)
            .await
    }

    async fn mark_processed(&self, event_id: Uuid) {
        if let Err(error) = self.webhook_events.mark_processed(event_id).await {
            tracing::warn!(error = %error, "Failed to mark webhook event processed");
        }
    }
}
