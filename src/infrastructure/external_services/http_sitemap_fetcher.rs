use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::application::ports::sitemap_fetcher::{SitemapFetchError, SitemapFetcher};

pub struct HttpSitemapFetcher {
    client: Client,
}

impl HttpSitemapFetcher {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SitemapFetcher for HttpSitemapFetcher {
    async fn fetch_xml(&self, url: &str) -> Result<String, SitemapFetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SitemapFetchError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SitemapFetchError::RequestFailed(format!(
                "{} returned {}",
                url, status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SitemapFetchError::RequestFailed(e.to_string()))
    }
}
