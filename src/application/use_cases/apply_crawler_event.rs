use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use url::Url;
use uuid::Uuid;

use crate::application::services::content_writer::{ContentWriterService, NewContent};
use crate::application::services::webhook_signature::{
    SignatureError, WebhookSignatureVerifier, event_digest,
};
use crate::domain::entities::{BatchJob, ErrorRecord};
use crate::domain::repositories::ErrorRepository;
use crate::domain::repositories::batch_job_repository::{
    BatchJobRepository, BatchJobRepositoryError,
};
use crate::domain::repositories::webhook_event_repository::{
    LedgerOutcome, WebhookEventRepository, WebhookEventRepositoryError, WebhookSource,
};
use crate::domain::value_objects::{BatchJobStatus, ContentType, RecordMetadata, SourceChannel};

#[derive(Debug)]
pub enum ApplyCrawlerEventError {
    InvalidSignature,
    MalformedPayload(String),
    RepositoryError(String),
}

impl std::fmt::Display for ApplyCrawlerEventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplyCrawlerEventError::InvalidSignature => write!(f, "Invalid signature"),
            ApplyCrawlerEventError::MalformedPayload(msg) => {
                write!(f, "Malformed payload: {}", msg)
            }
            ApplyCrawlerEventError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ApplyCrawlerEventError {}

impl From<SignatureError> for ApplyCrawlerEventError {
    fn from(_: SignatureError) -> Self {
        ApplyCrawlerEventError::InvalidSignature
    }
}

impl From<WebhookEventRepositoryError> for ApplyCrawlerEventError {
    fn from(error: WebhookEventRepositoryError) -> Self {
        ApplyCrawlerEventError::RepositoryError(error.to_string())
    }
}

impl From<BatchJobRepositoryError> for ApplyCrawlerEventError {
    fn from(error: BatchJobRepositoryError) -> Self {
        ApplyCrawlerEventError::RepositoryError(error.to_string())
    }
}

/// Wire shape of a crawler callback: `type` is `<job>.<event>` where the
/// event suffix is one of started/page/completed/failed.
#[derive(Debug, Deserialize)]
pub struct CrawlerEventPayload {
    #[serde(rename = "type")]
    pub event_type: String,
    pub id: String,
    #[serde(default)]
    pub data: Vec<CrawledDocument>,
    pub metadata: Option<serde_json::Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CrawledDocument {
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub url: Option<String>,
}

impl CrawledDocument {
    fn source_url(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("sourceURL"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }

    fn body(&self) -> Option<&str> {
        let content = self.markdown.as_deref().or(self.html.as_deref())?;
        if content.trim().is_empty() {
            None
        } else {
            Some(content)
        }
    }
}

/// Stand-in document for a page whose body could not be extracted: the page
/// still becomes a file (it must never be silently dropped), carrying
/// whatever the crawler knew about it.
pub fn placeholder_document(url: &str, metadata: Option<&serde_json::Value>) -> String {
    let empty = serde_json::json!({});
    let metadata = metadata.unwrap_or(&empty);
    let title = metadata
        .get("title")
        .and_then(|v| v.as_str())
        .unwrap_or("Untitled Page");

    let mut content = format!("# {}\n\n**URL:** {}\n\n", title, url);
    if let Some(description) = metadata.get("description").and_then(|v| v.as_str()) {
        content.push_str(&format!("**Description:** {}\n\n", description));
    }
    if let Some(summary) = metadata.get("ogDescription").and_then(|v| v.as_str()) {
        content.push_str(&format!("**Summary:** {}\n\n", summary));
    }
    content.push_str("---\n\n");
    content.push_str("*Note: Full content extraction failed. This file contains metadata only.*\n\n");
    content.push_str(&format!(
        "**Metadata:**\n```json\n{}\n```\n",
        serde_json::to_string_pretty(metadata).unwrap_or_else(|_| "{}".to_string())
    ));
    content
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerEvent {
    Started,
    Page,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlerAck {
    Applied(CrawlerEvent),
    AlreadyProcessed,
    /// Job id this deployment does not track; acknowledged so the crawler
    /// does not retry, surfaced through the log for operators.
    UnknownJob,
    /// Event type outside the known set, acknowledged without effect.
    Ignored,
}

#[derive(Debug, Clone)]
pub struct ApplyCrawlerEventRequest {
    pub raw_body: Vec<u8>,
    pub signature: Option<String>,
}

/// Applies one crawler callback: job status flips, and for page events the
/// scraped content is acquired as a file through the same path an upload
/// takes, with the job counters advanced atomically.
pub struct ApplyCrawlerEventUseCase {
    verifier: WebhookSignatureVerifier,
    content_writer: Arc<ContentWriterService>,
    batch_job_repository: Arc<dyn BatchJobRepository>,
    error_repository: Arc<dyn ErrorRepository>,
    webhook_events: Arc<dyn WebhookEventRepository>,
}

impl ApplyCrawlerEventUseCase {
    pub fn new(
        verifier: WebhookSignatureVerifier,
        content_writer: Arc<ContentWriterService>,
        batch_job_repository: Arc<dyn BatchJobRepository>,
        error_repository: Arc<dyn ErrorRepository>,
        webhook_events: Arc<dyn WebhookEventRepository>,
    ) -> Self {
        Self {
            verifier,
            content_writer,
            batch_job_repository,
            error_repository,
            webhook_events,
        }
    }

    pub async fn execute(
        &self,
        request: ApplyCrawlerEventRequest,
    ) -> Result<CrawlerAck, ApplyCrawlerEventError> {
        self.verifier
            .verify_prefixed(&request.raw_body, request.signature.as_deref())?;

        let payload_json: serde_json::Value = serde_json::from_slice(&request.raw_body)
            .map_err(|e| ApplyCrawlerEventError::MalformedPayload(e.to_string()))?;

        let digest = event_digest(&request.raw_body);
        let event_id = match self
            .webhook_events
            .record(WebhookSource::Crawler, &digest, &payload_json)
            .await?
        {
            LedgerOutcome::Duplicate => {
                tracing::debug!(digest = %digest, "Duplicate crawler event acknowledged");
                return Ok(CrawlerAck::AlreadyProcessed);
            }
            LedgerOutcome::Recorded(id) => id,
        };

        let payload: CrawlerEventPayload = serde_json::from_value(payload_json)
            .map_err(|e| ApplyCrawlerEventError::MalformedPayload(e.to_string()))?;

        let Some(job) = self.batch_job_repository.find_by_job_id(&payload.id).await? else {
            // Possibly a job from another deployment sharing the webhook
            // endpoint, possibly a lost record; either way the crawler must
            // not be made to retry. Kept observable instead of guessed at.
            tracing::warn!(job_id = %payload.id, event = %payload.event_type, "Crawler event for unknown job");
            self.mark_processed(event_id).await;
            return Ok(CrawlerAck::UnknownJob);
        };

        let Some(event) = parse_event_suffix(&payload.event_type) else {
            tracing::warn!(event = %payload.event_type, "Unknown crawler event type");
            self.mark_processed(event_id).await;
            return Ok(CrawlerAck::Ignored);
        };

        let applied = match event {
            CrawlerEvent::Started => {
                self.batch_job_repository
                    .update_status(&payload.id, BatchJobStatus::Processing, None)
                    .await
            }
            CrawlerEvent::Page => self.apply_page(&job, &payload).await,
            CrawlerEvent::Completed => {
                tracing::info!(
                    job_id = %payload.id,
                    successful = job.successful_urls(),
                    failed = job.failed_urls(),
                    "Crawler job completed"
                );
                self.batch_job_repository
                    .update_status(&payload.id, BatchJobStatus::Completed, None)
                    .await
            }
            CrawlerEvent::Failed => self.apply_job_failed(&job, &payload).await,
        };

        if let Err(error) = applied {
            let record = ErrorRecord::new(
                job.tenant_id(),
                None,
                None,
                "WEBHOOK_PROCESSING",
                error.to_string(),
                RecordMetadata::new()
                    .with_property("jobId", serde_json::json!(payload.id))
                    .with_property("event", serde_json::json!(payload.event_type)),
            );
            if let Err(insert_error) = self.error_repository.insert(&record).await {
                tracing::error!(error = %insert_error, "Failed to record webhook application error");
            }
            return Err(ApplyCrawlerEventError::RepositoryError(error.to_string()));
        }

        self.mark_processed(event_id).await;
        Ok(CrawlerAck::Applied(event))
    }

    async fn apply_page(
        &self,
        job: &BatchJob,
        payload: &CrawlerEventPayload,
    ) -> Result<(), BatchJobRepositoryError> {
        let Some(document) = payload.data.first() else {
            return Ok(());
        };

        let url = document.source_url();
        let content = match document.body() {
            Some(body) => body.to_string(),
            None => placeholder_document(&url, document.metadata.as_ref()),
        };

        let channel = SourceChannel::from(job.job_type());
        let scraped_at = Utc::now().to_rfc3339();
        let new_content = NewContent {
            tenant_id: job.tenant_id(),
            user_id: job.user_id(),
            file_name: page_file_name(job, &url),
            content_type: ContentType::Markdown,
            channel,
            bytes: content.into_bytes(),
            batch_job_id: Some(job.id()),
            metadata: Some(
                RecordMetadata::new()
                    .with_property("sourceUrl", serde_json::json!(url))
                    .with_property("scrapedAt", serde_json::json!(scraped_at)),
            ),
            log_metadata: Some(
                RecordMetadata::new()
                    .with_property("source", serde_json::json!("firecrawl"))
                    .with_property("sourceUrl", serde_json::json!(url)),
            ),
        };

        match self.content_writer.persist_new_file(new_content).await {
            Ok(_) => {
                self.batch_job_repository
                    .record_page_outcome(job.job_id(), true)
                    .await
            }
            Err(page_error) => {
                // One bad page must never abort the job: record, count it as
                // failed, move on.
                tracing::error!(job_id = %job.job_id(), url = %url, error = %page_error, "Page processing failed");
                let record = ErrorRecord::new(
                    job.tenant_id(),
                    None,
                    None,
                    format!("{}_PAGE_PROCESS", job.job_type()),
                    page_error.to_string(),
                    RecordMetadata::new().with_property("url", serde_json::json!(url)),
                );
                if let Err(insert_error) = self.error_repository.insert(&record).await {
                    tracing::error!(error = %insert_error, "Failed to record page error");
                }
                self.batch_job_repository
                    .record_page_outcome(job.job_id(), false)
                    .await
            }
        }
    }

    async fn apply_job_failed(
        &self,
        job: &BatchJob,
        payload: &CrawlerEventPayload,
    ) -> Result<(), BatchJobRepositoryError> {
        let reason = payload
            .error
            .clone()
            .unwrap_or_else(|| "Batch scrape failed".to_string());

        let metadata = job
            .metadata()
            .clone()
            .with_property("error", serde_json::json!(reason));
        self.batch_job_repository
            .update_status(&payload.id, BatchJobStatus::Failed, Some(&metadata))
            .await?;

        let record = ErrorRecord::new(
            job.tenant_id(),
            None,
            None,
            format!("{}_BATCH_FAILED", job.job_type()),
            reason,
            RecordMetadata::new().with_property(
                "sourceUrl",
                serde_json::json!(job.metadata().get_str("sourceUrl").unwrap_or("unknown")),
            ),
        );
        if let Err(insert_error) = self.error_repository.insert(&record).await {
            tracing::error!(error = %insert_error, "Failed to record batch failure");
        }
        Ok(())
    }

    async fn mark_processed(&self, event_id: Uuid) {
        if let Err(error) = self.webhook_events.mark_processed(event_id).await {
            tracing::warn!(error = %error, "Failed to mark webhook event processed");
        }
    }
}

fn parse_event_suffix(event_type: &str) -> Option<CrawlerEvent> {
    match event_type.rsplit('.').next() {
        Some("started") => Some(CrawlerEvent::Started),
        Some("page") => Some(CrawlerEvent::Page),
        Some("completed") => Some(CrawlerEvent::Completed),
        Some("failed") => Some(CrawlerEvent::Failed),
        _ => None,
    }
}

fn page_file_name(job: &BatchJob, url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "{}_{}_{}.md",
        job.job_type(),
        host,
        Utc::now().timestamp_millis()
    )
}
