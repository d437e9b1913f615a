use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::vector_index::{VectorIndex, VectorIndexError};

#[derive(Debug, Clone)]
pub struct VectorIndexConfig {
    pub service_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for VectorIndexConfig {
    fn default() -> Self {
        let service_url =
            env::var("VECTOR_INDEX_URL").unwrap_or_else(|_| "http://localhost:8100".to_string());
        let api_key = env::var("VECTOR_INDEX_API_KEY").unwrap_or_default();

        Self {
            service_url,
            api_key,
            timeout_secs: 30,
        }
    }
}

/// Client for the external vector index's data plane. Vectors live in one
/// namespace per tenant and carry their owning file id as metadata, so a
/// file's vectors are deleted with a metadata filter, never by namespace
/// teardown.
pub struct HttpVectorIndex {
    client: Client,
    config: VectorIndexConfig,
}

impl HttpVectorIndex {
    pub fn new(config: VectorIndexConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(VectorIndexConfig::default())
    }
}

#[async_trait]
impl VectorIndex for HttpVectorIndex {
    async fn delete_file_vectors(
        &self,
        namespace: &str,
        file_id: Uuid,
    ) -> Result<(), VectorIndexError> {
        let body = serde_json::json!({
            "namespace": namespace,
            "filter": { "fileId": file_id },
        });

        let response = self
            .client
            .post(format!("{}/vectors/delete", self.config.service_url))
            .header("Api-Key", &self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VectorIndexError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(VectorIndexError::DeleteFailed(format!(
                "{}: {}",
                status, detail
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_posts_namespace_and_file_filter() {
        let mut server = mockito::Server::new_async().await;
        let file_id = Uuid::new_v4();
        let expected = serde_json::json!({
            "namespace": "tenants/abc",
            "filter": { "fileId": file_id },
        });
        let mock = server
            .mock("POST", "/vectors/delete")
            .match_body(mockito::Matcher::Json(expected))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let index = HttpVectorIndex::new(VectorIndexConfig {
            service_url: server.url(),
            api_key: "test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        index
            .delete_file_vectors("tenants/abc", file_id)
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_status_is_delete_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/vectors/delete")
            .with_status(500)
            .with_body("index unavailable")
            .create_async()
            .await;

        let index = HttpVectorIndex::new(VectorIndexConfig {
            service_url: server.url(),
            api_key: "test".to_string(),
            timeout_secs: 5,
        })
        .unwrap();

        let result = index.delete_file_vectors("tenants/abc", Uuid::new_v4()).await;
        assert!(matches!(result, Err(VectorIndexError::DeleteFailed(_))));
    }
}
