use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::use_cases::acquire_transcripts::{
    AcquireTranscriptsError, AcquireTranscriptsRequest, AcquireTranscriptsUseCase,
};
use crate::application::use_cases::acquire_upload::{
    AcquireUploadError, AcquireUploadRequest, AcquireUploadUseCase,
};
use crate::application::use_cases::get_file_status::{GetFileStatusError, GetFileStatusUseCase};
use crate::application::use_cases::list_files::{
    ListFilesError, ListFilesRequest, ListFilesUseCase,
};
use crate::application::use_cases::purge_file::{PurgeFileError, PurgeFileUseCase};
use crate::domain::repositories::ChunkRepository;
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::ingestion_dto::{
    ChunkDto, FileChunksResponseDto, FileListQueryDto, FileListResponseDto, FileResponseDto,
    FileStatusResponseDto, UploadResponseDto, YoutubeUploadRequestDto, YoutubeUploadResponseDto,
};

pub struct IngestionHandler {
    acquire_upload_use_case: Arc<AcquireUploadUseCase>,
    acquire_transcripts_use_case: Arc<AcquireTranscriptsUseCase>,
    get_file_status_use_case: Arc<GetFileStatusUseCase>,
    list_files_use_case: Arc<ListFilesUseCase>,
    purge_file_use_case: Arc<PurgeFileUseCase>,
    chunk_repository: Arc<dyn ChunkRepository>,
}

impl IngestionHandler {
    pub fn new(
        acquire_upload_use_case: Arc<AcquireUploadUseCase>,
        acquire_transcripts_use_case: Arc<AcquireTranscriptsUseCase>,
        get_file_status_use_case: Arc<GetFileStatusUseCase>,
        list_files_use_case: Arc<ListFilesUseCase>,
        purge_file_use_case: Arc<PurgeFileUseCase>,
        chunk_repository: Arc<dyn ChunkRepository>,
    ) -> Self {
        Self {
            acquire_upload_use_case,
            acquire_transcripts_use_case,
            get_file_status_use_case,
            list_files_use_case,
            purge_file_use_case,
            chunk_repository,
        }
    }

    pub async fn upload_file(
        State(handler): State<Arc<IngestionHandler>>,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut tenant_id: Option<Uuid> = None;
        let mut user_id: Option<Uuid> = None;
        let mut file_name: Option<String> = None;
        let mut declared_mime: Option<String> = None;
        let mut bytes: Option<Vec<u8>> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|_| StatusCode::BAD_REQUEST)?
        {
            let field_name = field.name().map(|name| name.to_string());
            match field_name.as_deref() {
                Some("tenantId") => {
                    let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                    tenant_id = Some(value.parse().map_err(|_| StatusCode::BAD_REQUEST)?);
                }
                Some("userId") => {
                    let value = field.text().await.map_err(|_| StatusCode::BAD_REQUEST)?;
                    user_id = Some(value.parse().map_err(|_| StatusCode::BAD_REQUEST)?);
                }
                Some("file") => {
                    file_name = field.file_name().map(|name| name.to_string());
                    declared_mime = field.content_type().map(|ct| ct.to_string());
                    bytes = Some(
                        field
                            .bytes()
                            .await
                            .map_err(|_| StatusCode::BAD_REQUEST)?
                            .to_vec(),
                    );
                }
                _ => {}
            }
        }

        let (Some(tenant_id), Some(user_id), Some(bytes)) = (tenant_id, user_id, bytes) else {
            return Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UploadResponseDto>::error(
                    "NO_FILE_PROVIDED",
                    "Request must include tenantId, userId and a file",
                )),
            ));
        };

        let declared_size = bytes.len() as i64;
        let request = AcquireUploadRequest {
            tenant_id,
            user_id,
            file_name: file_name.unwrap_or_else(|| "upload".to_string()),
            declared_mime: declared_mime.unwrap_or_default(),
            declared_size,
            bytes,
        };

        match handler.acquire_upload_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(UploadResponseDto::from(response))),
            )),
            Err(error) => {
                let (status, code) = upload_error_status(&error);
                Ok((
                    status,
                    Json(ApiResponse::error(code, error.to_string())),
                ))
            }
        }
    }

    pub async fn upload_youtube_transcripts(
        State(handler): State<Arc<IngestionHandler>>,
        Json(request): Json<YoutubeUploadRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = AcquireTranscriptsRequest {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            video_ids: request.video_ids,
        };

        match handler.acquire_transcripts_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(YoutubeUploadResponseDto::from(response))),
            )),
            Err(error) => {
                let (status, code) = transcripts_error_status(&error);
                Ok((
                    status,
                    Json(ApiResponse::error(code, error.to_string())),
                ))
            }
        }
    }

    pub async fn get_file_status(
        State(handler): State<Arc<IngestionHandler>>,
        Path(file_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.get_file_status_use_case.execute(file_id).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(FileStatusResponseDto::from(response))),
            )),
            Err(GetFileStatusError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("FILE_NOT_FOUND", "File not found")),
            )),
            Err(error) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("STATUS_FAILED", error.to_string())),
            )),
        }
    }

    pub async fn list_tenant_files(
        State(handler): State<Arc<IngestionHandler>>,
        Path(tenant_id): Path<Uuid>,
        Query(query): Query<FileListQueryDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListFilesRequest {
            tenant_id,
            status: query.status,
        };

        match handler.list_files_use_case.execute(request).await {
            Ok(response) => {
                let files: Vec<FileResponseDto> =
                    response.files.iter().map(FileResponseDto::from).collect();
                let total = files.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(FileListResponseDto { files, total })),
                ))
            }
            Err(ListFilesError::InvalidStatus(status)) => Ok((
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::error(
                    "INVALID_STATUS",
                    format!("Invalid status filter: {}", status),
                )),
            )),
            Err(error) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("LIST_FAILED", error.to_string())),
            )),
        }
    }

    pub async fn get_file_chunks(
        State(handler): State<Arc<IngestionHandler>>,
        Path(file_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.chunk_repository.find_by_file_id(file_id).await {
            Ok(chunks) => {
                let chunks: Vec<ChunkDto> = chunks.iter().map(ChunkDto::from).collect();
                let total = chunks.len();
                Ok((
                    StatusCode::OK,
                    Json(ApiResponse::success(FileChunksResponseDto {
                        file_id,
                        chunks,
                        total,
                    })),
                ))
            }
            Err(error) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("CHUNKS_FAILED", error.to_string())),
            )),
        }
    }

    pub async fn delete_file(
        State(handler): State<Arc<IngestionHandler>>,
        Path(file_id): Path<Uuid>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.purge_file_use_case.execute(file_id).await {
            Ok(()) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(
                    "File and associated data deleted successfully".to_string(),
                )),
            )),
            Err(PurgeFileError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("FILE_NOT_FOUND", "File not found")),
            )),
            Err(error) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("DELETE_FAILED", error.to_string())),
            )),
        }
    }
}

fn upload_error_status(error: &AcquireUploadError) -> (StatusCode, &'static str) {
    match error {
        AcquireUploadError::PermissionDenied => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
        AcquireUploadError::QuotaExceeded { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED")
        }
        AcquireUploadError::UnsupportedContentType(_) => {
            (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE")
        }
        AcquireUploadError::ContentIntegrity(_) => (StatusCode::BAD_REQUEST, "CONTENT_INTEGRITY"),
        AcquireUploadError::GatewayError(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR"),
        AcquireUploadError::StorageError(_) | AcquireUploadError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "UPLOAD_FAILED")
        }
    }
}

fn transcripts_error_status(error: &AcquireTranscriptsError) -> (StatusCode, &'static str) {
    match error {
        AcquireTranscriptsError::PermissionDenied => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
        AcquireTranscriptsError::QuotaExceeded { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED")
        }
        AcquireTranscriptsError::ValidationError(_) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
        }
        AcquireTranscriptsError::GatewayError(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR"),
    }
}
