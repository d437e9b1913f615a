use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug)]
pub enum TenantGatewayError {
    Unavailable(String),
}

impl std::fmt::Display for TenantGatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TenantGatewayError::Unavailable(msg) => {
                write!(f, "Tenant gateway unavailable: {}", msg)
            }
        }
    }
}

impl std::error::Error for TenantGatewayError {}

#[derive(Debug, Clone, Copy)]
pub struct QuotaDecision {
    pub allowed: bool,
    pub remaining: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionAction {
    Ingest,
    Delete,
}

impl IngestionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngestionAction::Ingest => "INGEST",
            IngestionAction::Delete => "DELETE",
        }
    }
}

/// Boundary to the tenant-management collaborator. Both checks run before any
/// acquisition side effect; a gateway failure aborts the operation.
#[async_trait]
pub trait TenantGateway: Send + Sync {
    async fn check_ingestion_quota(
        &self,
        tenant_id: Uuid,
    ) -> Result<QuotaDecision, TenantGatewayError>;

    async fn check_ingestion_permission(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        action: IngestionAction,
    ) -> Result<bool, TenantGatewayError>;
}
