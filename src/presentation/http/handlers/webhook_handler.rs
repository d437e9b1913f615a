use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::use_cases::apply_crawler_event::{
    ApplyCrawlerEventError, ApplyCrawlerEventRequest, ApplyCrawlerEventUseCase, CrawlerAck,
};
use crate::application::use_cases::apply_processing_event::{
    ApplyProcessingEventError, ApplyProcessingEventRequest, ApplyProcessingEventUseCase,
    ProcessingAck,
};
use crate::presentation::http::dto::WebhookAckDto;

const PROCESSING_SIGNATURE_HEADER: &str = "x-webhook-signature";
const CRAWLER_SIGNATURE_HEADER: &str = "x-firecrawl-signature";

/// HTTP face of the reconciliation engine. Handlers read the raw body bytes
/// so signature verification sees exactly what was sent; only signature
/// failures turn into error statuses, every other outcome is acknowledged
/// to keep the external systems from retrying events that already have a
/// durable ledger entry.
pub struct WebhookHandler {
    processing_use_case: Arc<ApplyProcessingEventUseCase>,
    crawler_use_case: Arc<ApplyCrawlerEventUseCase>,
}

impl WebhookHandler {
    pub fn new(
        processing_use_case: Arc<ApplyProcessingEventUseCase>,
        crawler_use_case: Arc<ApplyCrawlerEventUseCase>,
    ) -> Self {
        Self {
            processing_use_case,
            crawler_use_case,
        }
    }

    pub async fn handle_processing_event(
        State(handler): State<Arc<WebhookHandler>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        let signature = header_value(&headers, PROCESSING_SIGNATURE_HEADER);
        let request = ApplyProcessingEventRequest {
            raw_body: body.to_vec(),
            signature,
        };

        match handler.processing_use_case.execute(request).await {
            Ok(ack) => {
                let result = match ack {
                    ProcessingAck::Applied(status) => format!("applied:{}", status),
                    ProcessingAck::AlreadyProcessed => "duplicate".to_string(),
                    ProcessingAck::OutOfOrder => "ignored:out-of-order".to_string(),
                };
                (StatusCode::OK, Json(WebhookAckDto::ok(&result)))
            }
            Err(ApplyProcessingEventError::InvalidSignature) => (
                StatusCode::UNAUTHORIZED,
                Json(WebhookAckDto::failed("Invalid signature".to_string())),
            ),
            Err(error) => (StatusCode::OK, Json(WebhookAckDto::failed(error.to_string()))),
        }
    }

    pub async fn handle_crawler_event(
        State(handler): State<Arc<WebhookHandler>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> impl IntoResponse {
        let signature = header_value(&headers, CRAWLER_SIGNATURE_HEADER);
        let request = ApplyCrawlerEventRequest {
            raw_body: body.to_vec(),
            signature,
        };

        match handler.crawler_use_case.execute(request).await {
            Ok(ack) => {
                let result = match ack {
                    CrawlerAck::Applied(_) => "applied".to_string(),
                    CrawlerAck::AlreadyProcessed => "duplicate".to_string(),
                    CrawlerAck::UnknownJob => "ignored:unknown-job".to_string(),
                    CrawlerAck::Ignored => "ignored:unknown-event".to_string(),
                };
                (StatusCode::OK, Json(WebhookAckDto::ok(&result)))
            }
            Err(ApplyCrawlerEventError::InvalidSignature) => (
                StatusCode::UNAUTHORIZED,
                Json(WebhookAckDto::failed("Invalid signature".to_string())),
            ),
            Err(error) => (StatusCode::OK, Json(WebhookAckDto::failed(error.to_string()))),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
