use async_trait::async_trait;

#[derive(Debug)]
pub enum CrawlerError {
    NotConfigured(String),
    RequestFailed(String),
    Rejected(String),
}

impl std::fmt::Display for CrawlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrawlerError::NotConfigured(msg) => write!(f, "Crawler not configured: {}", msg),
            CrawlerError::RequestFailed(msg) => write!(f, "Crawler request failed: {}", msg),
            CrawlerError::Rejected(msg) => write!(f, "Crawler rejected the job: {}", msg),
        }
    }
}

impl std::error::Error for CrawlerError {}

/// Webhook callback registered with every submitted job. The metadata
/// envelope travels with the job and comes back on completion events.
#[derive(Debug, Clone)]
pub struct WebhookRegistration {
    pub url: String,
    pub events: Vec<String>,
    pub metadata: serde_json::Value,
}

#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    pub only_main_content: bool,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub limit: i32,
    pub max_depth: i32,
    pub include_paths: Vec<String>,
    pub exclude_paths: Vec<String>,
    pub scrape: ScrapeOptions,
}

/// External crawling service. Submissions return the crawler-assigned job id;
/// page content arrives later through the webhook, never here.
#[async_trait]
pub trait CrawlerClient: Send + Sync {
    async fn start_batch_scrape(
        &self,
        urls: &[String],
        options: &ScrapeOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError>;

    async fn start_crawl(
        &self,
        seed_url: &str,
        options: &CrawlOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError>;

    /// URL discovery for a site/sitemap, used as fallback when direct
    /// sitemap parsing finds nothing.
    async fn map_site(
        &self,
        url: &str,
        limit: i32,
        include_paths: &[String],
        exclude_paths: &[String],
    ) -> Result<Vec<String>, CrawlerError>;
}
