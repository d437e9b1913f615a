use async_trait::async_trait;
use reqwest::Client;
use std::env;
use std::time::Duration;

use crate::application::ports::crawler_client::{
    CrawlOptions, CrawlerClient, CrawlerError, ScrapeOptions, WebhookRegistration,
};

#[derive(Debug, Clone)]
pub struct FirecrawlConfig {
    pub api_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for FirecrawlConfig {
    fn default() -> Self {
        let api_url = env::var("FIRECRAWL_API_URL")
            .unwrap_or_else(|_| "https://api.firecrawl.dev/v1".to_string());
        let api_key = env::var("FIRECRAWL_API_KEY").unwrap_or_default();

        Self {
            api_url,
            api_key,
            timeout_secs: 30,
        }
    }
}

/// HTTP client for the Firecrawl API: batch scrapes, crawls, and site maps,
/// all submitted with a webhook registration so results stream back
/// asynchronously.
pub struct FirecrawlClient {
    client: Client,
    config: FirecrawlConfig,
}

impl FirecrawlClient {
    pub fn new(config: FirecrawlConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn from_env() -> Result<Self, reqwest::Error> {
        Self::new(FirecrawlConfig::default())
    }

    async fn post_json(
        &self,
        endpoint: &str,
        body: serde_json::Value,
    ) -> Result<serde_json::Value, CrawlerError> {
        if self.config.api_key.is_empty() {
            return Err(CrawlerError::NotConfigured(
                "FIRECRAWL_API_KEY not set".to_string(),
            ));
        }

        let response = self
            .client
            .post(format!("{}{}", self.config.api_url, endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| CrawlerError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CrawlerError::Rejected(format!("{}: {}", status, detail)));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| CrawlerError::RequestFailed(e.to_string()))
    }

    fn webhook_json(webhook: &WebhookRegistration) -> serde_json::Value {
        serde_json::json!({
            "url": webhook.url,
            "events": webhook.events,
            "metadata": webhook.metadata,
        })
    }

    fn apply_scrape_options(body: &mut serde_json::Value, options: &ScrapeOptions) {
        if options.only_main_content {
            body["onlyMainContent"] = serde_json::json!(true);
        }
        if !options.include_tags.is_empty() {
            body["includeTags"] = serde_json::json!(options.include_tags);
        }
        if !options.exclude_tags.is_empty() {
            body["excludeTags"] = serde_json::json!(options.exclude_tags);
        }
    }
}

#[async_trait]
impl CrawlerClient for FirecrawlClient {
    async fn start_batch_scrape(
        &self,
        urls: &[String],
        options: &ScrapeOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError> {
        let mut body = serde_json::json!({
            "urls": urls,
            "formats": ["markdown"],
            "webhook": Self::webhook_json(webhook),
        });
        Self::apply_scrape_options(&mut body, options);

        let response = self.post_json("/batch/scrape", body).await?;
        response["id"]
            .as_str()
            .map(|id| id.to_string())
            .ok_or_else(|| CrawlerError::Rejected("No job id in response".to_string()))
    }

    async fn start_crawl(
        &self,
        seed_url: &str,
        options: &CrawlOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError> {
        let mut scrape_options = serde_json::json!({"formats": ["markdown"]});
        Self::apply_scrape_options(&mut scrape_options, &options.scrape);

        let mut body = serde_json::json!({
            "url": seed_url,
            "limit": options.limit,
            "maxDepth": options.max_depth,
            "scrapeOptions": scrape_options,
            "webhook": Self::webhook_json(webhook),
        });
        if !options.include_paths.is_empty() {
            body["includePaths"] = serde_json::json!(options.include_paths);
        }
        if !options.exclude_paths.is_empty() {
            body["excludePaths"] = serde_json::json!(options.exclude_paths);
        }

        let response = self.post_json("/crawl", body).await?;
        response["id"]
            .as_str()
            .or_else(|| response["jobId"].as_str())
            .map(|id| id.to_string())
            .ok_or_else(|| CrawlerError::Rejected("No job id in response".to_string()))
    }

    async fn map_site(
        &self,
        url: &str,
        limit: i32,
        include_paths: &[String],
        exclude_paths: &[String],
    ) -> Result<Vec<String>, CrawlerError> {
        let mut body = serde_json::json!({
            "url": url,
            "limit": limit,
        });
        if !include_paths.is_empty() {
            body["includePaths"] = serde_json::json!(include_paths);
        }
        if !exclude_paths.is_empty() {
            body["excludePaths"] = serde_json::json!(exclude_paths);
        }

        let response = self.post_json("/map", body).await?;
        let links = response["links"]
            .as_array()
            .map(|array| {
                array
                    .iter()
                    .filter_map(|v| v.as_str().map(|s| s.to_string()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(links)
    }
}
