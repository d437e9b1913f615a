use std::env;

/// Service-level settings read once at startup. Client-specific settings
/// (crawler, vector index, object store) live with their clients.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Shared secret for the processing-service webhook signature.
    pub processing_webhook_secret: String,
    /// Shared secret for the crawler webhook signature.
    pub crawler_webhook_secret: String,
    /// Externally reachable base URL, registered with the crawler as the
    /// webhook callback target.
    pub public_base_url: String,
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => write!(f, "{} not set", name),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid(format!("PORT must be a port number: {}", raw)))?,
            Err(_) => 3000,
        };

        let processing_webhook_secret = env::var("LAMBDA_WEBHOOK_SECRET")
            .map_err(|_| ConfigError::Missing("LAMBDA_WEBHOOK_SECRET"))?;
        let crawler_webhook_secret = env::var("FIRECRAWL_WEBHOOK_SECRET")
            .map_err(|_| ConfigError::Missing("FIRECRAWL_WEBHOOK_SECRET"))?;

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://localhost:{}", port));

        Ok(Self {
            port,
            processing_webhook_secret,
            crawler_webhook_secret,
            public_base_url,
        })
    }

    pub fn crawler_webhook_url(&self) -> String {
        format!(
            "{}/ingestion/webhook/firecrawl",
            self.public_base_url.trim_end_matches('/')
        )
    }
}
