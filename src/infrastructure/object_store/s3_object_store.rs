use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{
    Client as S3Client,
    config::Builder as S3ConfigBuilder,
    primitives::ByteStream,
    types::{Delete, ObjectIdentifier},
};
use std::env;

use crate::application::ports::object_storage::{ObjectStorage, ObjectStorageError, StoredObject};

/// S3 deletes take at most 1000 keys per request.
const DELETE_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone)]
pub struct S3ObjectStoreConfig {
    pub bucket: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub endpoint: Option<String>,
}

impl S3ObjectStoreConfig {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bucket: env::var("AWS_BUCKET_NAME").map_err(|_| "AWS_BUCKET_NAME not set")?,
            region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            access_key: env::var("AWS_ACCESS_KEY").map_err(|_| "AWS_ACCESS_KEY not set")?,
            secret_key: env::var("AWS_SECRET_KEY").map_err(|_| "AWS_SECRET_KEY not set")?,
            endpoint: env::var("AWS_ENDPOINT_URL").ok(),
        })
    }
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    pub async fn new(config: S3ObjectStoreConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(aws_sdk_s3::config::Credentials::new(
                config.access_key.clone(),
                config.secret_key.clone(),
                None,
                None,
                "static",
            ));
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint.clone());
        }
        let base_config = loader.load().await;

        let s3_config = S3ConfigBuilder::from(&base_config)
            .force_path_style(config.endpoint.is_some())
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            bucket: config.bucket,
        }
    }

    fn public_uri(&self, key: &str) -> String {
        format!("https://{}.s3.amazonaws.com/{}", self.bucket, key)
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStore {
    async fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(bytes.to_vec()))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| ObjectStorageError::PutFailed(e.to_string()))?;

        Ok(StoredObject {
            object_key: key.to_string(),
            storage_uri: self.public_uri(key),
        })
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        let mut keys = Vec::new();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = &continuation {
                request = request.continuation_token(token.clone());
            }

            let output = request
                .send()
                .await
                .map_err(|e| ObjectStorageError::ListFailed(e.to_string()))?;

            keys.extend(
                output
                    .contents()
                    .iter()
                    .filter_map(|object| object.key().map(|k| k.to_string())),
            );

            match output.next_continuation_token() {
                Some(token) if output.is_truncated() == Some(true) => {
                    continuation = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(keys)
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<(), ObjectStorageError> {
        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            let mut identifiers = Vec::with_capacity(batch.len());
            for key in batch {
                identifiers.push(
                    ObjectIdentifier::builder()
                        .key(key.clone())
                        .build()
                        .map_err(|e| ObjectStorageError::DeleteFailed(e.to_string()))?,
                );
            }

            let delete = Delete::builder()
                .set_objects(Some(identifiers))
                .quiet(true)
                .build()
                .map_err(|e| ObjectStorageError::DeleteFailed(e.to_string()))?;

            self.client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await
                .map_err(|e| ObjectStorageError::DeleteFailed(e.to_string()))?;
        }

        Ok(())
    }
}
