use std::sync::Arc;
use uuid::Uuid;

use crate::application::ports::crawler_client::{
    CrawlOptions, CrawlerError, ScrapeOptions, WebhookRegistration,
};
use crate::application::ports::tenant_gateway::{IngestionAction, TenantGatewayError};
use crate::application::ports::{CrawlerClient, SitemapFetcher, TenantGateway};
use crate::application::services::sitemap;
use crate::domain::entities::{BatchJob, ErrorRecord};
use crate::domain::repositories::batch_job_repository::BatchJobRepositoryError;
use crate::domain::repositories::{BatchJobRepository, ErrorRepository};
use crate::domain::value_objects::{BatchJobStatus, RecordMetadata, ScrapeJobType};

#[derive(Debug)]
pub enum SubmitScrapeJobError {
    PermissionDenied,
    QuotaExceeded { remaining: i64 },
    ValidationError(String),
    NoUrlsFound,
    ExternalServiceError(String),
    GatewayError(String),
    RepositoryError(String),
}

impl std::fmt::Display for SubmitScrapeJobError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitScrapeJobError::PermissionDenied => write!(f, "Not permitted to ingest"),
            SubmitScrapeJobError::QuotaExceeded { remaining } => {
                write!(f, "Ingestion quota exceeded ({} remaining)", remaining)
            }
            SubmitScrapeJobError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            SubmitScrapeJobError::NoUrlsFound => write!(f, "No URLs found in sitemap"),
            SubmitScrapeJobError::ExternalServiceError(msg) => {
                write!(f, "Crawler submission failed: {}", msg)
            }
            SubmitScrapeJobError::GatewayError(msg) => write!(f, "Tenant gateway error: {}", msg),
            SubmitScrapeJobError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SubmitScrapeJobError {}

impl From<TenantGatewayError> for SubmitScrapeJobError {
    fn from(error: TenantGatewayError) -> Self {
        SubmitScrapeJobError::GatewayError(error.to_string())
    }
}

impl From<CrawlerError> for SubmitScrapeJobError {
    fn from(error: CrawlerError) -> Self {
        SubmitScrapeJobError::ExternalServiceError(error.to_string())
    }
}

impl From<BatchJobRepositoryError> for SubmitScrapeJobError {
    fn from(error: BatchJobRepositoryError) -> Self {
        SubmitScrapeJobError::RepositoryError(error.to_string())
    }
}

/// What to scrape, per job type.
#[derive(Debug, Clone)]
pub enum ScrapeTarget {
    Bulk {
        urls: Vec<String>,
    },
    Sitemap {
        sitemap_url: String,
        max_pages: i32,
        include_url_paths: Vec<String>,
        exclude_url_paths: Vec<String>,
    },
    Crawl {
        website_url: String,
        recursion_depth: i32,
        max_pages: i32,
        include_url_paths: Vec<String>,
        exclude_url_paths: Vec<String>,
    },
}

impl ScrapeTarget {
    fn job_type(&self) -> ScrapeJobType {
        match self {
            ScrapeTarget::Bulk { .. } => ScrapeJobType::Bulk,
            ScrapeTarget::Sitemap { .. } => ScrapeJobType::Sitemap,
            ScrapeTarget::Crawl { .. } => ScrapeJobType::Crawl,
        }
    }

    fn source_url(&self) -> String {
        match self {
            ScrapeTarget::Bulk { urls } => urls.first().cloned().unwrap_or_default(),
            ScrapeTarget::Sitemap { sitemap_url, .. } => sitemap_url.clone(),
            ScrapeTarget::Crawl { website_url, .. } => website_url.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SubmitScrapeJobRequest {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub target: ScrapeTarget,
    pub options: ScrapeOptions,
}

#[derive(Debug, Clone)]
pub struct SubmitScrapeJobResponse {
    pub job_id: String,
    pub status: BatchJobStatus,
    pub total_urls: i32,
}

/// Submits a scrape/crawl to the external crawler with our webhook
/// registered, then records the job in STARTED. The job row is only written
/// after the crawler accepts — a rejected submission leaves nothing behind —
/// and the call never waits for page processing.
pub struct SubmitScrapeJobUseCase {
    tenant_gateway: Arc<dyn TenantGateway>,
    crawler: Arc<dyn CrawlerClient>,
    sitemap_fetcher: Arc<dyn SitemapFetcher>,
    batch_job_repository: Arc<dyn BatchJobRepository>,
    error_repository: Arc<dyn ErrorRepository>,
    webhook_url: String,
}

impl SubmitScrapeJobUseCase {
    pub fn new(
        tenant_gateway: Arc<dyn TenantGateway>,
        crawler: Arc<dyn CrawlerClient>,
        sitemap_fetcher: Arc<dyn SitemapFetcher>,
        batch_job_repository: Arc<dyn BatchJobRepository>,
        error_repository: Arc<dyn ErrorRepository>,
        webhook_url: String,
    ) -> Self {
        Self {
            tenant_gateway,
            crawler,
            sitemap_fetcher,
            batch_job_repository,
            error_repository,
            webhook_url,
        }
    }

    pub async fn execute(
        &self,
        request: SubmitScrapeJobRequest,
    ) -> Result<SubmitScrapeJobResponse, SubmitScrapeJobError> {
        self.validate(&request.target)?;

        let permitted = self
            .tenant_gateway
            .check_ingestion_permission(request.tenant_id, request.user_id, IngestionAction::Ingest)
            .await?;
        if !permitted {
            return Err(SubmitScrapeJobError::PermissionDenied);
        }

        let quota = self
            .tenant_gateway
            .check_ingestion_quota(request.tenant_id)
            .await?;
        if !quota.allowed {
            return Err(SubmitScrapeJobError::QuotaExceeded {
                remaining: quota.remaining,
            });
        }

        let job_type = request.target.job_type();
        let webhook = self.webhook_registration(&request, job_type);

        let submission = self.submit(&request, &webhook).await;
        let (job_id, total_urls, job_metadata) = match submission {
            Ok(accepted) => accepted,
            Err(error) => {
                let record = ErrorRecord::new(
                    request.tenant_id,
                    None,
                    None,
                    submission_step(job_type),
                    error.to_string(),
                    RecordMetadata::new()
                        .with_property("url", serde_json::json!(request.target.source_url())),
                );
                if let Err(insert_error) = self.error_repository.insert(&record).await {
                    tracing::error!(error = %insert_error, "Failed to record submission error");
                }
                return Err(error);
            }
        };

        let job = BatchJob::new(
            request.tenant_id,
            request.user_id,
            job_id.clone(),
            job_type,
            total_urls,
            job_metadata,
        );
        self.batch_job_repository.insert(&job).await?;

        tracing::info!(
            job_id = %job_id,
            job_type = %job_type,
            total_urls,
            "Scrape job submitted"
        );

        Ok(SubmitScrapeJobResponse {
            job_id,
            status: job.status(),
            total_urls,
        })
    }

    fn validate(&self, target: &ScrapeTarget) -> Result<(), SubmitScrapeJobError> {
        match target {
            ScrapeTarget::Bulk { urls } if urls.is_empty() => Err(
                SubmitScrapeJobError::ValidationError(
                    "URLs array is required and must not be empty".to_string(),
                ),
            ),
            ScrapeTarget::Sitemap { sitemap_url, .. } if sitemap_url.trim().is_empty() => Err(
                SubmitScrapeJobError::ValidationError("Sitemap URL is required".to_string()),
            ),
            ScrapeTarget::Crawl { website_url, .. } if website_url.trim().is_empty() => Err(
                SubmitScrapeJobError::ValidationError("Website URL is required".to_string()),
            ),
            _ => Ok(()),
        }
    }

    fn webhook_registration(
        &self,
        request: &SubmitScrapeJobRequest,
        job_type: ScrapeJobType,
    ) -> WebhookRegistration {
        WebhookRegistration {
            url: self.webhook_url.clone(),
            events: vec![
                "started".to_string(),
                "page".to_string(),
                "completed".to_string(),
                "failed".to_string(),
            ],
            metadata: serde_json::json!({
                "tenantId": request.tenant_id,
                "userId": request.user_id,
                "jobType": job_type.as_str(),
                "sourceUrl": request.target.source_url(),
            }),
        }
    }

    async fn submit(
        &self,
        request: &SubmitScrapeJobRequest,
        webhook: &WebhookRegistration,
    ) -> Result<(String, i32, RecordMetadata), SubmitScrapeJobError> {
        match &request.target {
            ScrapeTarget::Bulk { urls } => {
                let job_id = self
                    .crawler
                    .start_batch_scrape(urls, &request.options, webhook)
                    .await?;
                let metadata =
                    RecordMetadata::new().with_property("urls", serde_json::json!(urls));
                Ok((job_id, urls.len() as i32, metadata))
            }
            ScrapeTarget::Sitemap {
                sitemap_url,
                max_pages,
                include_url_paths,
                exclude_url_paths,
            } => {
                let urls = self
                    .resolve_sitemap(sitemap_url, *max_pages, include_url_paths, exclude_url_paths)
                    .await?;
                let job_id = self
                    .crawler
                    .start_batch_scrape(&urls, &request.options, webhook)
                    .await?;
                let metadata = RecordMetadata::new()
                    .with_property("sitemapUrl", serde_json::json!(sitemap_url))
                    .with_property("maxPages", serde_json::json!(max_pages))
                    .with_property("includeUrlPaths", serde_json::json!(include_url_paths))
                    .with_property("excludeUrlPaths", serde_json::json!(exclude_url_paths));
                Ok((job_id, urls.len() as i32, metadata))
            }
            ScrapeTarget::Crawl {
                website_url,
                recursion_depth,
                max_pages,
                include_url_paths,
                exclude_url_paths,
            } => {
                let options = CrawlOptions {
                    limit: *max_pages,
                    max_depth: *recursion_depth,
                    include_paths: include_url_paths.clone(),
                    exclude_paths: exclude_url_paths.clone(),
                    scrape: request.options.clone(),
                };
                let job_id = self.crawler.start_crawl(website_url, &options, webhook).await?;
                let metadata = RecordMetadata::new()
                    .with_property("websiteUrl", serde_json::json!(website_url))
                    .with_property("recursionDepth", serde_json::json!(recursion_depth))
                    .with_property("maxPages", serde_json::json!(max_pages));
                // Page count is unknown until the crawl discovers it.
                Ok((job_id, 0, metadata))
            }
        }
    }

    async fn resolve_sitemap(
        &self,
        sitemap_url: &str,
        max_pages: i32,
        include_paths: &[String],
        exclude_paths: &[String],
    ) -> Result<Vec<String>, SubmitScrapeJobError> {
        let mut urls = match self.sitemap_fetcher.fetch_xml(sitemap_url).await {
            Ok(xml) => sitemap::apply_path_filters(
                sitemap::extract_loc_urls(&xml),
                include_paths,
                exclude_paths,
            ),
            Err(error) => {
                tracing::warn!(url = %sitemap_url, error = %error, "Direct sitemap fetch failed, falling back to crawler map");
                Vec::new()
            }
        };
        urls.truncate(max_pages.max(0) as usize);

        if urls.is_empty() {
            urls = self
                .crawler
                .map_site(sitemap_url, max_pages, include_paths, exclude_paths)
                .await?;
        }

        if urls.is_empty() {
            return Err(SubmitScrapeJobError::NoUrlsFound);
        }
        Ok(urls)
    }
}

fn submission_step(job_type: ScrapeJobType) -> &'static str {
    match job_type {
        ScrapeJobType::Bulk => "BULK_SCRAPE",
        ScrapeJobType::Sitemap => "SITEMAP_FETCH",
        ScrapeJobType::Crawl => "WEBSITE_CRAWL_INIT",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        FakeCrawlerClient, FakeSitemapFetcher, FakeTenantGateway, InMemoryStore,
    };

    const SITEMAP_XML: &str = r#"<urlset>
  <url><loc>https://example.com/a</loc></url>
  <url><loc>https://example.com/b</loc></url>
  <url><loc>https://example.com/docs/c</loc></url>
  <url><loc>https://example.com/docs/d</loc></url>
  <url><loc>https://example.com/e</loc></url>
</urlset>"#;

    struct Fixture {
        store: Arc<InMemoryStore>,
        crawler: Arc<FakeCrawlerClient>,
        use_case: SubmitScrapeJobUseCase,
    }

    fn fixture_with(crawler: FakeCrawlerClient, fetcher: FakeSitemapFetcher) -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let crawler = Arc::new(crawler);
        let use_case = SubmitScrapeJobUseCase::new(
            Arc::new(FakeTenantGateway::allowing()),
            crawler.clone() as Arc<dyn CrawlerClient>,
            Arc::new(fetcher),
            store.clone() as Arc<dyn BatchJobRepository>,
            store.clone() as Arc<dyn ErrorRepository>,
            "https://api.example.com/ingestion/webhook/firecrawl".to_string(),
        );
        Fixture {
            store,
            crawler,
            use_case,
        }
    }

    fn request(target: ScrapeTarget) -> SubmitScrapeJobRequest {
        SubmitScrapeJobRequest {
            tenant_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            target,
            options: ScrapeOptions {
                only_main_content: true,
                ..ScrapeOptions::default()
            },
        }
    }

    #[tokio::test]
    async fn test_bulk_submission_records_started_job() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-bulk-1"),
            FakeSitemapFetcher::default(),
        );

        let response = f
            .use_case
            .execute(request(ScrapeTarget::Bulk {
                urls: vec![
                    "https://example.com/a".to_string(),
                    "https://example.com/b".to_string(),
                ],
            }))
            .await
            .unwrap();

        assert_eq!(response.job_id, "fc-bulk-1");
        assert_eq!(response.status, BatchJobStatus::Started);
        assert_eq!(response.total_urls, 2);

        let job = f.store.job("fc-bulk-1").unwrap();
        assert_eq!(job.job_type(), ScrapeJobType::Bulk);
        assert_eq!(job.total_urls(), 2);

        // The webhook registration carried the tenant/job envelope.
        let submissions = f.crawler.submissions.lock().unwrap();
        assert_eq!(submissions.len(), 1);
        assert_eq!(
            submissions[0].url,
            "https://api.example.com/ingestion/webhook/firecrawl"
        );
        assert_eq!(submissions[0].metadata["jobType"], "BULK");
        assert_eq!(submissions[0].events.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_bulk_urls_rejected() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-bulk-1"),
            FakeSitemapFetcher::default(),
        );

        let result = f
            .use_case
            .execute(request(ScrapeTarget::Bulk { urls: Vec::new() }))
            .await;

        assert!(matches!(
            result,
            Err(SubmitScrapeJobError::ValidationError(_))
        ));
        assert_eq!(f.crawler.submission_count(), 0);
    }

    #[tokio::test]
    async fn test_sitemap_expansion_with_filters_and_limit() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-map-1"),
            FakeSitemapFetcher::with_xml(SITEMAP_XML),
        );

        let response = f
            .use_case
            .execute(request(ScrapeTarget::Sitemap {
                sitemap_url: "https://example.com/sitemap.xml".to_string(),
                max_pages: 1,
                include_url_paths: vec!["/docs".to_string()],
                exclude_url_paths: Vec::new(),
            }))
            .await
            .unwrap();

        // Two /docs URLs matched, the limit kept one.
        assert_eq!(response.total_urls, 1);
        assert_eq!(f.store.job("fc-map-1").unwrap().total_urls(), 1);
    }

    #[tokio::test]
    async fn test_sitemap_scenario_b_expansion() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-map-2"),
            FakeSitemapFetcher::with_xml(SITEMAP_XML),
        );

        let response = f
            .use_case
            .execute(request(ScrapeTarget::Sitemap {
                sitemap_url: "https://example.com/sitemap.xml".to_string(),
                max_pages: 100,
                include_url_paths: Vec::new(),
                exclude_url_paths: Vec::new(),
            }))
            .await
            .unwrap();

        assert_eq!(response.status, BatchJobStatus::Started);
        assert_eq!(response.total_urls, 5);
    }

    #[tokio::test]
    async fn test_sitemap_falls_back_to_crawler_map() {
        let mut crawler = FakeCrawlerClient::new("fc-map-3");
        crawler.mapped_urls = vec![
            "https://example.com/x".to_string(),
            "https://example.com/y".to_string(),
        ];
        let f = fixture_with(crawler, FakeSitemapFetcher::failing());

        let response = f
            .use_case
            .execute(request(ScrapeTarget::Sitemap {
                sitemap_url: "https://example.com/sitemap.xml".to_string(),
                max_pages: 100,
                include_url_paths: Vec::new(),
                exclude_url_paths: Vec::new(),
            }))
            .await
            .unwrap();

        assert_eq!(response.total_urls, 2);
    }

    #[tokio::test]
    async fn test_sitemap_with_no_urls_anywhere_fails() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-map-4"),
            FakeSitemapFetcher::with_xml("<urlset></urlset>"),
        );

        let result = f
            .use_case
            .execute(request(ScrapeTarget::Sitemap {
                sitemap_url: "https://example.com/sitemap.xml".to_string(),
                max_pages: 100,
                include_url_paths: Vec::new(),
                exclude_url_paths: Vec::new(),
            }))
            .await;

        assert!(matches!(result, Err(SubmitScrapeJobError::NoUrlsFound)));
        assert!(f.store.job("fc-map-4").is_none());
    }

    #[tokio::test]
    async fn test_crawl_starts_with_unknown_page_count() {
        let f = fixture_with(
            FakeCrawlerClient::new("fc-crawl-1"),
            FakeSitemapFetcher::default(),
        );

        let response = f
            .use_case
            .execute(request(ScrapeTarget::Crawl {
                website_url: "https://example.com".to_string(),
                recursion_depth: 2,
                max_pages: 50,
                include_url_paths: Vec::new(),
                exclude_url_paths: Vec::new(),
            }))
            .await
            .unwrap();

        assert_eq!(response.total_urls, 0);
        let job = f.store.job("fc-crawl-1").unwrap();
        assert_eq!(job.job_type(), ScrapeJobType::Crawl);
        assert_eq!(job.metadata().get_str("websiteUrl"), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_crawler_rejection_leaves_no_job_row() {
        let crawler = FakeCrawlerClient::new("fc-never");
        crawler.fail.store(true, std::sync::atomic::Ordering::SeqCst);
        let f = fixture_with(crawler, FakeSitemapFetcher::default());

        let result = f
            .use_case
            .execute(request(ScrapeTarget::Bulk {
                urls: vec!["https://example.com/a".to_string()],
            }))
            .await;

        assert!(matches!(
            result,
            Err(SubmitScrapeJobError::ExternalServiceError(_))
        ));
        assert!(f.store.job("fc-never").is_none());
        // The rejection itself was recorded for the operator.
        assert_eq!(f.store.error_count(), 1);
    }

    #[tokio::test]
    async fn test_quota_check_runs_before_any_submission() {
        let store = Arc::new(InMemoryStore::new());
        let crawler = Arc::new(FakeCrawlerClient::new("fc-quota"));
        let gateway = Arc::new(FakeTenantGateway::allowing());
        gateway
            .quota_allowed
            .store(false, std::sync::atomic::Ordering::SeqCst);
        let use_case = SubmitScrapeJobUseCase::new(
            gateway,
            crawler.clone() as Arc<dyn CrawlerClient>,
            Arc::new(FakeSitemapFetcher::default()),
            store.clone() as Arc<dyn BatchJobRepository>,
            store.clone() as Arc<dyn ErrorRepository>,
            "https://api.example.com/webhook".to_string(),
        );

        let result = use_case
            .execute(request(ScrapeTarget::Bulk {
                urls: vec!["https://example.com/a".to_string()],
            }))
            .await;

        assert!(matches!(result, Err(SubmitScrapeJobError::QuotaExceeded { .. })));
        assert_eq!(crawler.submission_count(), 0);
        assert_eq!(store.total_writes(), 0);
    }
}
