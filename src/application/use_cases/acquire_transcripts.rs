use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::tenant_gateway::{IngestionAction, TenantGatewayError};
use crate::application::ports::{TenantGateway, TranscriptProvider};
use crate::application::services::content_writer::{ContentWriterService, NewContent};
use crate::domain::value_objects::{ContentType, RecordMetadata, SourceChannel};

#[derive(Debug)]
pub enum AcquireTranscriptsError {
    PermissionDenied,
    QuotaExceeded { remaining: i64 },
    ValidationError(String),
    GatewayError(String),
}

impl std::fmt::Display for AcquireTranscriptsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquireTranscriptsError::PermissionDenied => write!(f, "Not permitted to ingest"),
            AcquireTranscriptsError::QuotaExceeded { remaining } => {
                write!(f, "Ingestion quota exceeded ({} remaining)", remaining)
            }
            AcquireTranscriptsError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AcquireTranscriptsError::GatewayError(msg) => {
                write!(f, "Tenant gateway error: {}", msg)
            }
        }
    }
}

impl std::error::Error for AcquireTranscriptsError {}

impl From<TenantGatewayError> for AcquireTranscriptsError {
    fn from(error: TenantGatewayError) -> Self {
        AcquireTranscriptsError::GatewayError(error.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AcquireTranscriptsRequest {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub video_ids: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranscriptSuccess {
    pub video_id: String,
    pub file_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct TranscriptFailure {
    pub video_id: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct AcquireTranscriptsResponse {
    pub succeeded: Vec<TranscriptSuccess>,
    pub failed: Vec<TranscriptFailure>,
}

/// Fetches YouTube transcripts and files each one as a TXT upload. Videos
/// are independent: a transcript that cannot be fetched lands in the failed
/// list and never aborts its siblings.
pub struct AcquireTranscriptsUseCase {
    tenant_gateway: Arc<dyn TenantGateway>,
    transcript_provider: Arc<dyn TranscriptProvider>,
    content_writer: Arc<ContentWriterService>,
}

impl AcquireTranscriptsUseCase {
    pub fn new(
        tenant_gateway: Arc<dyn TenantGateway>,
        transcript_provider: Arc<dyn TranscriptProvider>,
        content_writer: Arc<ContentWriterService>,
    ) -> Self {
        Self {
            tenant_gateway,
            transcript_provider,
            content_writer,
        }
    }

    pub async fn execute(
        &self,
        request: AcquireTranscriptsRequest,
    ) -> Result<AcquireTranscriptsResponse, AcquireTranscriptsError> {
        if request.video_ids.is_empty() {
            return Err(AcquireTranscriptsError::ValidationError(
                "Video IDs array is required and must not be empty".to_string(),
            ));
        }

        let permitted = self
            .tenant_gateway
            .check_ingestion_permission(request.tenant_id, request.user_id, IngestionAction::Ingest)
            .await?;
        if !permitted {
            return Err(AcquireTranscriptsError::PermissionDenied);
        }

        let quota = self
            .tenant_gateway
            .check_ingestion_quota(request.tenant_id)
            .await?;
        if !quota.allowed {
            return Err(AcquireTranscriptsError::QuotaExceeded {
                remaining: quota.remaining,
            });
        }

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for video_id in &request.video_ids {
            match self.acquire_one(&request, video_id).await {
                Ok(file_id) => succeeded.push(TranscriptSuccess {
                    video_id: video_id.clone(),
                    file_id,
                }),
                Err(error) => {
                    tracing::warn!(video_id = %video_id, error = %error, "Transcript acquisition failed");
                    failed.push(TranscriptFailure {
                        video_id: video_id.clone(),
                        error,
                    });
                }
            }
        }

        Ok(AcquireTranscriptsResponse { succeeded, failed })
    }

    async fn acquire_one(
        &self,
        request: &AcquireTranscriptsRequest,
        video_id: &str,
    ) -> Result<Uuid, String> {
        let transcript = self
            .transcript_provider
            .fetch_transcript(video_id)
            .await
            .map_err(|e| e.to_string())?;

        if transcript.text.trim().is_empty() {
            return Err("Transcript text is empty".to_string());
        }

        let file = self
            .content_writer
            .persist_new_file(NewContent {
                tenant_id: request.tenant_id,
                user_id: request.user_id,
                file_name: format!("YouTube_{}.txt", video_id),
                content_type: ContentType::Txt,
                channel: SourceChannel::Youtube,
                bytes: transcript.text.into_bytes(),
                batch_job_id: None,
                metadata: Some(
                    RecordMetadata::new()
                        .with_property("videoId", serde_json::json!(video_id))
                        .with_property("language", serde_json::json!(transcript.language)),
                ),
                log_metadata: None,
            })
            .await
            .map_err(|e| e.to_string())?;

        Ok(file.id())
    }
}
