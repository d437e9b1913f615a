use async_trait::async_trait;

#[derive(Debug)]
pub enum SitemapFetchError {
    RequestFailed(String),
}

impl std::fmt::Display for SitemapFetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SitemapFetchError::RequestFailed(msg) => write!(f, "Sitemap fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for SitemapFetchError {}

/// Plain HTTP retrieval of a sitemap document. Parsing stays on our side;
/// a fetch failure is not fatal because the crawler's map endpoint serves
/// as fallback discovery.
#[async_trait]
pub trait SitemapFetcher: Send + Sync {
    async fn fetch_xml(&self, url: &str) -> Result<String, SitemapFetchError>;
}
