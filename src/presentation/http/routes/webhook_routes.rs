use axum::{Router, routing::post};
use std::sync::Arc;

use crate::presentation::http::handlers::WebhookHandler;

pub fn webhook_routes(handler: Arc<WebhookHandler>) -> Router {
    Router::new()
        .route(
            "/ingestion/webhook/processing",
            post(WebhookHandler::handle_processing_event),
        )
        .route(
            "/ingestion/webhook/firecrawl",
            post(WebhookHandler::handle_crawler_event),
        )
        .with_state(handler)
}
