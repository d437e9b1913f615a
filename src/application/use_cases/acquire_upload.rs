use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::TenantGateway;
use crate::application::ports::tenant_gateway::{IngestionAction, TenantGatewayError};
use crate::application::services::content_writer::{
    ContentWriterError, ContentWriterService, NewContent,
};
use crate::domain::value_objects::{ContentType, FileStatus, SourceChannel};

#[derive(Debug)]
pub enum AcquireUploadError {
    PermissionDenied,
    QuotaExceeded { remaining: i64 },
    UnsupportedContentType(String),
    ContentIntegrity(String),
    GatewayError(String),
    StorageError(String),
    RepositoryError(String),
}

impl std::fmt::Display for AcquireUploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcquireUploadError::PermissionDenied => write!(f, "Not permitted to ingest"),
            AcquireUploadError::QuotaExceeded { remaining } => {
                write!(f, "Ingestion quota exceeded ({} remaining)", remaining)
            }
            AcquireUploadError::UnsupportedContentType(mime) => {
                write!(f, "Unsupported file type: {}", mime)
            }
            AcquireUploadError::ContentIntegrity(msg) => write!(f, "Content integrity: {}", msg),
            AcquireUploadError::GatewayError(msg) => write!(f, "Tenant gateway error: {}", msg),
            AcquireUploadError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AcquireUploadError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for AcquireUploadError {}

impl From<TenantGatewayError> for AcquireUploadError {
    fn from(error: TenantGatewayError) -> Self {
        AcquireUploadError::GatewayError(error.to_string())
    }
}

impl From<ContentWriterError> for AcquireUploadError {
    fn from(error: ContentWriterError) -> Self {
        match error {
            ContentWriterError::StorageError(msg) => AcquireUploadError::StorageError(msg),
            ContentWriterError::RepositoryError(msg) => AcquireUploadError::RepositoryError(msg),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AcquireUploadRequest {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub file_name: String,
    pub declared_mime: String,
    pub declared_size: i64,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct AcquireUploadResponse {
    pub file_id: Uuid,
    pub status: FileStatus,
}

/// Direct document upload. Every validation runs before the first storage
/// write, so a rejected request leaves no trace.
pub struct AcquireUploadUseCase {
    tenant_gateway: Arc<dyn TenantGateway>,
    content_writer: Arc<ContentWriterService>,
}

impl AcquireUploadUseCase {
    pub fn new(
        tenant_gateway: Arc<dyn TenantGateway>,
        content_writer: Arc<ContentWriterService>,
    ) -> Self {
        Self {
            tenant_gateway,
            content_writer,
        }
    }

    pub async fn execute(
        &self,
        request: AcquireUploadRequest,
    ) -> Result<AcquireUploadResponse, AcquireUploadError> {
        let permitted = self
            .tenant_gateway
            .check_ingestion_permission(request.tenant_id, request.user_id, IngestionAction::Ingest)
            .await?;
        if !permitted {
            return Err(AcquireUploadError::PermissionDenied);
        }

        let quota = self
            .tenant_gateway
            .check_ingestion_quota(request.tenant_id)
            .await?;
        if !quota.allowed {
            return Err(AcquireUploadError::QuotaExceeded {
                remaining: quota.remaining,
            });
        }

        let content_type = ContentType::from_mime(&request.declared_mime)
            .ok_or_else(|| AcquireUploadError::UnsupportedContentType(request.declared_mime.clone()))?;

        if request.bytes.is_empty() {
            return Err(AcquireUploadError::ContentIntegrity(
                "File content is empty or could not be read".to_string(),
            ));
        }
        if request.bytes.len() as i64 != request.declared_size {
            return Err(AcquireUploadError::ContentIntegrity(format!(
                "Size mismatch: read {} bytes, declared {}",
                request.bytes.len(),
                request.declared_size
            )));
        }

        let file = self
            .content_writer
            .persist_new_file(NewContent {
                tenant_id: request.tenant_id,
                user_id: request.user_id,
                file_name: request.file_name,
                content_type,
                channel: SourceChannel::LocalUpload,
                bytes: request.bytes,
                batch_job_id: None,
                metadata: None,
                log_metadata: None,
            })
            .await?;

        Ok(AcquireUploadResponse {
            file_id: file.id(),
            status: file.status(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeObjectStorage, FakeTenantGateway, InMemoryStore};
    use crate::domain::repositories::{FileRepository, StatusLogRepository};

    struct Fixture {
        store: Arc<InMemoryStore>,
        storage: Arc<FakeObjectStorage>,
        gateway: Arc<FakeTenantGateway>,
        use_case: AcquireUploadUseCase,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let storage = Arc::new(FakeObjectStorage::new());
        let gateway = Arc::new(FakeTenantGateway::allowing());
        let content_writer = Arc::new(ContentWriterService::new(
            storage.clone(),
            store.clone() as Arc<dyn FileRepository>,
            store.clone() as Arc<dyn StatusLogRepository>,
        ));
        let use_case =
            AcquireUploadUseCase::new(gateway.clone() as Arc<dyn TenantGateway>, content_writer);
        Fixture {
            store,
            storage,
            gateway,
            use_case,
        }
    }

    fn pdf_request(bytes: Vec<u8>) -> AcquireUploadRequest {
        let declared_size = bytes.len() as i64;
        AcquireUploadRequest {
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            file_name: "doc.pdf".to_string(),
            declared_mime: "application/pdf".to_string(),
            declared_size,
            bytes,
        }
    }

    #[tokio::test]
    async fn test_upload_creates_file_in_uploaded_state() {
        let f = fixture();
        let request = pdf_request(vec![1u8; 10_240]);
        let tenant_id = request.tenant_id;

        let response = f.use_case.execute(request).await.unwrap();

        assert_eq!(response.status, FileStatus::Uploaded);
        let file = f.store.file(response.file_id).unwrap();
        assert_eq!(file.file_name(), "doc.pdf");
        assert_eq!(file.file_size(), 10_240);
        assert_eq!(file.file_type(), ContentType::Pdf);
        assert_eq!(file.file_source(), SourceChannel::LocalUpload);

        // Object landed under the tenant/file-scoped key.
        let keys = f.storage.keys();
        assert_eq!(keys.len(), 1);
        assert_eq!(
            keys[0],
            format!(
                "uploads/tenants/{}/files/LOCAL_UPLOAD/{}/raw.pdf",
                tenant_id, response.file_id
            )
        );

        let logs = f.store.logs_for(response.file_id);
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].status(), "UPLOADED");
    }

    #[tokio::test]
    async fn test_unsupported_mime_rejected_without_side_effects() {
        let f = fixture();
        let mut request = pdf_request(vec![1u8; 100]);
        request.declared_mime = "image/png".to_string();

        let result = f.use_case.execute(request).await;

        assert!(matches!(
            result,
            Err(AcquireUploadError::UnsupportedContentType(_))
        ));
        assert_eq!(f.storage.object_count(), 0);
        assert_eq!(f.store.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_empty_bytes_rejected_before_storage() {
        let f = fixture();
        let mut request = pdf_request(Vec::new());
        request.declared_size = 0;

        let result = f.use_case.execute(request).await;

        assert!(matches!(result, Err(AcquireUploadError::ContentIntegrity(_))));
        assert_eq!(f.storage.object_count(), 0);
        assert_eq!(f.store.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_size_mismatch_rejected_before_storage() {
        let f = fixture();
        let mut request = pdf_request(vec![1u8; 100]);
        request.declared_size = 200;

        let result = f.use_case.execute(request).await;

        assert!(matches!(result, Err(AcquireUploadError::ContentIntegrity(_))));
        assert_eq!(f.storage.object_count(), 0);
        assert_eq!(f.store.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_quota_exceeded_aborts_with_no_side_effects() {
        let f = fixture();
        f.gateway
            .quota_allowed
            .store(false, std::sync::atomic::Ordering::SeqCst);

        let result = f.use_case.execute(pdf_request(vec![1u8; 100])).await;

        assert!(matches!(result, Err(AcquireUploadError::QuotaExceeded { .. })));
        assert_eq!(f.storage.object_count(), 0);
        assert_eq!(f.store.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_permission_denied_aborts_with_no_side_effects() {
        let f = fixture();
        f.gateway
            .permission_allowed
            .store(false, std::sync::atomic::Ordering::SeqCst);

        let result = f.use_case.execute(pdf_request(vec![1u8; 100])).await;

        assert!(matches!(result, Err(AcquireUploadError::PermissionDenied)));
        assert_eq!(f.storage.object_count(), 0);
        assert_eq!(f.store.total_writes(), 0);
    }

    #[tokio::test]
    async fn test_failed_storage_write_leaves_no_file_row() {
        let f = fixture();
        f.storage
            .fail_puts
            .store(true, std::sync::atomic::Ordering::SeqCst);

        let result = f.use_case.execute(pdf_request(vec![1u8; 100])).await;

        assert!(matches!(result, Err(AcquireUploadError::StorageError(_))));
        assert_eq!(f.store.file_count(), 0);
    }
}
