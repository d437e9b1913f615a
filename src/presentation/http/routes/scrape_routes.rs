use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::ScrapeHandler;

pub fn scrape_routes(handler: Arc<ScrapeHandler>) -> Router {
    Router::new()
        .route(
            "/ingestion/scrape/bulk",
            post(ScrapeHandler::scrape_bulk_links),
        )
        .route(
            "/ingestion/scrape/sitemap",
            post(ScrapeHandler::scrape_sitemap),
        )
        .route(
            "/ingestion/scrape/crawl",
            post(ScrapeHandler::crawl_website),
        )
        .route(
            "/ingestion/jobs/{job_id}",
            get(ScrapeHandler::get_job_status),
        )
        .with_state(handler)
}
