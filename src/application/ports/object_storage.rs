use async_trait::async_trait;

#[derive(Debug)]
pub enum ObjectStorageError {
    PutFailed(String),
    ListFailed(String),
    DeleteFailed(String),
}

impl std::fmt::Display for ObjectStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectStorageError::PutFailed(msg) => write!(f, "Object put failed: {}", msg),
            ObjectStorageError::ListFailed(msg) => write!(f, "Object list failed: {}", msg),
            ObjectStorageError::DeleteFailed(msg) => write!(f, "Object delete failed: {}", msg),
        }
    }
}

impl std::error::Error for ObjectStorageError {}

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub object_key: String,
    pub storage_uri: String,
}

/// Opaque blob storage under tenant/content-scoped keys. Pure I/O; callers
/// own the key layout.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, ObjectStorageError>;

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError>;

    async fn delete_objects(&self, keys: &[String]) -> Result<(), ObjectStorageError>;
}
