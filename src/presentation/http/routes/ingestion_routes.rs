use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::IngestionHandler;

pub fn ingestion_routes(handler: Arc<IngestionHandler>) -> Router {
    Router::new()
        .route("/ingestion/upload", post(IngestionHandler::upload_file))
        .route(
            "/ingestion/youtube",
            post(IngestionHandler::upload_youtube_transcripts),
        )
        .route(
            "/ingestion/files/{file_id}",
            get(IngestionHandler::get_file_status),
        )
        .route(
            "/ingestion/files/{file_id}",
            delete(IngestionHandler::delete_file),
        )
        .route(
            "/ingestion/files/{file_id}/chunks",
            get(IngestionHandler::get_file_chunks),
        )
        .route(
            "/ingestion/tenants/{tenant_id}/files",
            get(IngestionHandler::list_tenant_files),
        )
        .with_state(handler)
}
