use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::use_cases::acquire_transcripts::AcquireTranscriptsResponse;
use crate::application::use_cases::acquire_upload::AcquireUploadResponse;
use crate::application::use_cases::get_file_status::GetFileStatusResponse;
use crate::domain::entities::{Chunk, IngestionFile, StatusLogEntry};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponseDto {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub file_name: String,
    pub file_type: String,
    pub file_size: i64,
    pub file_source: String,
    pub status: String,
    pub total_chunks: i32,
    pub file_tokens: Option<i32>,
    pub file_pages: Option<i32>,
    pub batch_job_id: Option<Uuid>,
    pub storage_uri: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&IngestionFile> for FileResponseDto {
    fn from(file: &IngestionFile) -> Self {
        Self {
            id: file.id(),
            tenant_id: file.tenant_id(),
            file_name: file.file_name().to_string(),
            file_type: file.file_type().as_str().to_string(),
            file_size: file.file_size(),
            file_source: file.file_source().as_str().to_string(),
            status: file.status().as_str().to_string(),
            total_chunks: file.total_chunks(),
            file_tokens: file.file_tokens(),
            file_pages: file.file_pages(),
            batch_job_id: file.batch_job_id(),
            storage_uri: file.storage_uri().to_string(),
            metadata: file.metadata().map(|m| m.clone().into()),
            created_at: file.created_at().to_rfc3339(),
            updated_at: file.updated_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusLogDto {
    pub id: Uuid,
    pub entity_type: String,
    pub status: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<&StatusLogEntry> for StatusLogDto {
    fn from(entry: &StatusLogEntry) -> Self {
        Self {
            id: entry.id(),
            entity_type: entry.entity_type().as_str().to_string(),
            status: entry.status().to_string(),
            metadata: entry.metadata().map(|m| m.clone().into()),
            created_at: entry.created_at().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponseDto {
    pub file_id: Uuid,
    pub status: String,
}

impl From<AcquireUploadResponse> for UploadResponseDto {
    fn from(response: AcquireUploadResponse) -> Self {
        Self {
            file_id: response.file_id,
            status: response.status.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeUploadRequestDto {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub video_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptSuccessDto {
    pub video_id: String,
    pub file_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptFailureDto {
    pub video_id: String,
    pub error: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YoutubeUploadResponseDto {
    pub successful: Vec<TranscriptSuccessDto>,
    pub failed: Vec<TranscriptFailureDto>,
    pub total_processed: usize,
    pub success_count: usize,
    pub failure_count: usize,
}

impl From<AcquireTranscriptsResponse> for YoutubeUploadResponseDto {
    fn from(response: AcquireTranscriptsResponse) -> Self {
        let successful: Vec<TranscriptSuccessDto> = response
            .succeeded
            .into_iter()
            .map(|s| TranscriptSuccessDto {
                video_id: s.video_id,
                file_id: s.file_id,
            })
            .collect();
        let failed: Vec<TranscriptFailureDto> = response
            .failed
            .into_iter()
            .map(|f| TranscriptFailureDto {
                video_id: f.video_id,
                error: f.error,
            })
            .collect();

        Self {
            total_processed: successful.len() + failed.len(),
            success_count: successful.len(),
            failure_count: failed.len(),
            successful,
            failed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileStatusResponseDto {
    pub file: FileResponseDto,
    pub status_logs: Vec<StatusLogDto>,
}

impl From<GetFileStatusResponse> for FileStatusResponseDto {
    fn from(response: GetFileStatusResponse) -> Self {
        Self {
            file: FileResponseDto::from(&response.file),
            status_logs: response.status_logs.iter().map(StatusLogDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponseDto {
    pub files: Vec<FileResponseDto>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkDto {
    pub id: Uuid,
    pub chunk_index: i32,
    pub object_key: String,
    pub token_count: i32,
    pub embedding_status: String,
    pub vector_id: Option<String>,
    pub vector_namespace: Option<String>,
    pub page_number: Option<i32>,
}

impl From<&Chunk> for ChunkDto {
    fn from(chunk: &Chunk) -> Self {
        Self {
            id: chunk.id(),
            chunk_index: chunk.chunk_index(),
            object_key: chunk.object_key().to_string(),
            token_count: chunk.token_count(),
            embedding_status: chunk.embedding_status().to_string(),
            vector_id: chunk.vector_id().map(|s| s.to_string()),
            vector_namespace: chunk.vector_namespace().map(|s| s.to_string()),
            page_number: chunk.page_number(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileChunksResponseDto {
    pub file_id: Uuid,
    pub chunks: Vec<ChunkDto>,
    pub total: usize,
}

#[derive(Debug, Deserialize)]
pub struct FileListQueryDto {
    pub status: Option<String>,
}
