use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::ports::crawler_client::ScrapeOptions;
use crate::application::use_cases::get_batch_job_status::GetBatchJobStatusResponse;
use crate::application::use_cases::submit_scrape_job::SubmitScrapeJobResponse;
use crate::presentation::http::dto::ingestion_dto::FileResponseDto;

fn default_max_pages() -> i32 {
    100
}

fn default_recursion_depth() -> i32 {
    1
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkScrapeRequestDto {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub urls: Vec<String>,
    #[serde(default = "default_true")]
    pub extract_main_content_only: bool,
    #[serde(default)]
    pub include_selectors: Vec<String>,
    #[serde(default)]
    pub exclude_selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapScrapeRequestDto {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub sitemap_url: String,
    #[serde(default = "default_max_pages")]
    pub max_pages: i32,
    #[serde(default)]
    pub include_url_paths: Vec<String>,
    #[serde(default)]
    pub exclude_url_paths: Vec<String>,
    #[serde(default = "default_true")]
    pub extract_main_content_only: bool,
    #[serde(default)]
    pub include_selectors: Vec<String>,
    #[serde(default)]
    pub exclude_selectors: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrawlRequestDto {
    pub tenant_id: Uuid,
    pub user_id: Uuid,
    pub website_url: String,
    #[serde(default = "default_recursion_depth")]
    pub recursion_depth: i32,
    #[serde(default = "default_max_pages")]
    pub max_pages: i32,
    #[serde(default)]
    pub include_url_paths: Vec<String>,
    #[serde(default)]
    pub exclude_url_paths: Vec<String>,
    #[serde(default = "default_true")]
    pub extract_main_content_only: bool,
    #[serde(default)]
    pub include_selectors: Vec<String>,
    #[serde(default)]
    pub exclude_selectors: Vec<String>,
}

pub fn scrape_options(
    extract_main_content_only: bool,
    include_selectors: Vec<String>,
    exclude_selectors: Vec<String>,
) -> ScrapeOptions {
    ScrapeOptions {
        only_main_content: extract_main_content_only,
        include_tags: include_selectors,
        exclude_tags: exclude_selectors,
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeJobResponseDto {
    pub job_id: String,
    pub status: String,
    pub total_urls: i32,
    pub message: String,
}

impl From<SubmitScrapeJobResponse> for ScrapeJobResponseDto {
    fn from(response: SubmitScrapeJobResponse) -> Self {
        Self {
            job_id: response.job_id,
            status: response.status.as_str().to_string(),
            total_urls: response.total_urls,
            message: "Job started. Results will be processed via webhooks.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponseDto {
    pub job_id: String,
    pub job_type: String,
    pub status: String,
    pub total_urls: i32,
    pub processed_urls: i32,
    pub successful_urls: i32,
    pub failed_urls: i32,
    pub metadata: serde_json::Value,
    pub files: Vec<FileResponseDto>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<GetBatchJobStatusResponse> for JobStatusResponseDto {
    fn from(response: GetBatchJobStatusResponse) -> Self {
        let job = &response.job;
        Self {
            job_id: job.job_id().to_string(),
            job_type: job.job_type().as_str().to_string(),
            status: job.status().as_str().to_string(),
            total_urls: job.total_urls(),
            processed_urls: job.processed_urls(),
            successful_urls: job.successful_urls(),
            failed_urls: job.failed_urls(),
            metadata: job.metadata().clone().into(),
            files: response.files.iter().map(FileResponseDto::from).collect(),
            created_at: job.created_at().to_rfc3339(),
            updated_at: job.updated_at().to_rfc3339(),
        }
    }
}
