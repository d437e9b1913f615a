use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::get_batch_job_status::{
    GetBatchJobStatusError, GetBatchJobStatusUseCase,
};
use crate::application::use_cases::submit_scrape_job::{
    ScrapeTarget, SubmitScrapeJobError, SubmitScrapeJobRequest, SubmitScrapeJobUseCase,
};
use crate::presentation::http::dto::ApiResponse;
use crate::presentation::http::dto::scrape_dto::{
    BulkScrapeRequestDto, CrawlRequestDto, JobStatusResponseDto, ScrapeJobResponseDto,
    SitemapScrapeRequestDto, scrape_options,
};

pub struct ScrapeHandler {
    submit_use_case: Arc<SubmitScrapeJobUseCase>,
    job_status_use_case: Arc<GetBatchJobStatusUseCase>,
}

impl ScrapeHandler {
    pub fn new(
        submit_use_case: Arc<SubmitScrapeJobUseCase>,
        job_status_use_case: Arc<GetBatchJobStatusUseCase>,
    ) -> Self {
        Self {
            submit_use_case,
            job_status_use_case,
        }
    }

    pub async fn scrape_bulk_links(
        State(handler): State<Arc<ScrapeHandler>>,
        Json(request): Json<BulkScrapeRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let submit = SubmitScrapeJobRequest {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            target: ScrapeTarget::Bulk { urls: request.urls },
            options: scrape_options(
                request.extract_main_content_only,
                request.include_selectors,
                request.exclude_selectors,
            ),
        };
        handler.submit(submit).await
    }

    pub async fn scrape_sitemap(
        State(handler): State<Arc<ScrapeHandler>>,
        Json(request): Json<SitemapScrapeRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let submit = SubmitScrapeJobRequest {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            target: ScrapeTarget::Sitemap {
                sitemap_url: request.sitemap_url,
                max_pages: request.max_pages,
                include_url_paths: request.include_url_paths,
                exclude_url_paths: request.exclude_url_paths,
            },
            options: scrape_options(
                request.extract_main_content_only,
                request.include_selectors,
                request.exclude_selectors,
            ),
        };
        handler.submit(submit).await
    }

    pub async fn crawl_website(
        State(handler): State<Arc<ScrapeHandler>>,
        Json(request): Json<CrawlRequestDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let submit = SubmitScrapeJobRequest {
            tenant_id: request.tenant_id,
            user_id: request.user_id,
            target: ScrapeTarget::Crawl {
                website_url: request.website_url,
                recursion_depth: request.recursion_depth,
                max_pages: request.max_pages,
                include_url_paths: request.include_url_paths,
                exclude_url_paths: request.exclude_url_paths,
            },
            options: scrape_options(
                request.extract_main_content_only,
                request.include_selectors,
                request.exclude_selectors,
            ),
        };
        handler.submit(submit).await
    }

    pub async fn get_job_status(
        State(handler): State<Arc<ScrapeHandler>>,
        Path(job_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        match handler.job_status_use_case.execute(&job_id).await {
            Ok(response) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(JobStatusResponseDto::from(response))),
            )),
            Err(GetBatchJobStatusError::NotFound(_)) => Ok((
                StatusCode::NOT_FOUND,
                Json(ApiResponse::error("JOB_NOT_FOUND", "Job not found")),
            )),
            Err(error) => Ok((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("JOB_STATUS_FAILED", error.to_string())),
            )),
        }
    }

    async fn submit(
        &self,
        request: SubmitScrapeJobRequest,
    ) -> Result<(StatusCode, Json<ApiResponse<ScrapeJobResponseDto>>), StatusCode> {
        match self.submit_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::ACCEPTED,
                Json(ApiResponse::success(ScrapeJobResponseDto::from(response))),
            )),
            Err(error) => {
                let (status, code) = submit_error_status(&error);
                Ok((status, Json(ApiResponse::error(code, error.to_string()))))
            }
        }
    }
}

fn submit_error_status(error: &SubmitScrapeJobError) -> (StatusCode, &'static str) {
    match error {
        SubmitScrapeJobError::PermissionDenied => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
        SubmitScrapeJobError::QuotaExceeded { .. } => {
            (StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED")
        }
        SubmitScrapeJobError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        SubmitScrapeJobError::NoUrlsFound => (StatusCode::NOT_FOUND, "NO_URLS_FOUND"),
        SubmitScrapeJobError::ExternalServiceError(_) => {
            (StatusCode::BAD_GATEWAY, "CRAWLER_ERROR")
        }
        SubmitScrapeJobError::GatewayError(_) => (StatusCode::BAD_GATEWAY, "GATEWAY_ERROR"),
        SubmitScrapeJobError::RepositoryError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "SUBMIT_FAILED")
        }
    }
}
