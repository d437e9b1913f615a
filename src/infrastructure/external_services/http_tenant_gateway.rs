use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::time::Duration;
use uuid::Uuid;

use crate::application::ports::tenant_gateway::{
    IngestionAction, QuotaDecision, TenantGateway, TenantGatewayError,
};

#[derive(Debug, Clone)]
pub struct TenantGatewayConfig {
    pub service_url: String,
    pub timeout_secs: u64,
}

impl Default for TenantGatewayConfig {
    fn default() -> Self {
        let service_url =
            env::var("TENANT_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8200".to_string());

        Self {
            service_url,
            timeout_secs: 10,
        }
    }
}

#[derive(Deserialize)]
struct QuotaResponse {
    allowed: bool,
    remaining: i64,
}

#[derive(Deserialize)]
struct PermissionResponse {
    allowed: bool,
}

/// Client for the tenant-management service: this side only ever asks "may
/// this actor ingest/delete" and "is there page budget left".
pub struct HttpTenantGateway {
    client: Client,
    config: TenantGatewayConfig,
}

impl HttpTenantGateway {
    pub fn new(config: TenantGatewayConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(TenantGatewayConfig::default())
    }
}

#[async_trait]
impl TenantGateway for HttpTenantGateway {
    async fn check_ingestion_quota(
        &self,
        tenant_id: Uuid,
    ) -> Result<QuotaDecision, TenantGatewayError> {
        let response = self
            .client
            .get(format!(
                "{}/tenants/{}/ingestion-quota",
                self.config.service_url, tenant_id
            ))
            .send()
            .await
            .map_err(|e| TenantGatewayError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TenantGatewayError::Unavailable(format!(
                "Quota check returned {}",
                response.status()
            )));
        }

        let quota: QuotaResponse = response
            .json()
            .await
            .map_err(|e| TenantGatewayError::Unavailable(e.to_string()))?;

        Ok(QuotaDecision {
            allowed: quota.allowed,
            remaining: quota.remaining,
        })
    }

    async fn check_ingestion_permission(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        action: IngestionAction,
    ) -> Result<bool, TenantGatewayError> {
        let response = self
            .client
            .get(format!(
                "{}/tenants/{}/users/{}/permissions/{}",
                self.config.service_url,
                tenant_id,
                user_id,
                action.as_str()
            ))
            .send()
            .await
            .map_err(|e| TenantGatewayError::Unavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TenantGatewayError::Unavailable(format!(
                "Permission check returned {}",
                response.status()
            )));
        }

        let permission: PermissionResponse = response
            .json()
            .await
            .map_err(|e| TenantGatewayError::Unavailable(e.to_string()))?;

        Ok(permission.allowed)
    }
}
