use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::presentation::http::{
    handlers::{IngestionHandler, ScrapeHandler, WebhookHandler},
    routes::{health_routes, ingestion_routes, scrape_routes, webhook_routes},
};

pub struct HttpServer {
    ingestion_handler: Arc<IngestionHandler>,
    scrape_handler: Arc<ScrapeHandler>,
    webhook_handler: Arc<WebhookHandler>,
    port: u16,
}

impl HttpServer {
    pub fn new(
        ingestion_handler: Arc<IngestionHandler>,
        scrape_handler: Arc<ScrapeHandler>,
        webhook_handler: Arc<WebhookHandler>,
        port: u16,
    ) -> Self {
        Self {
            ingestion_handler,
            scrape_handler,
            webhook_handler,
            port,
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = Router::new()
            .merge(health_routes())
            .merge(ingestion_routes(self.ingestion_handler))
            .merge(scrape_routes(self.scrape_handler))
            .merge(webhook_routes(self.webhook_handler))
            .layer(cors)
            .layer(RequestBodyLimitLayer::new(250 * 1024 * 1024))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            );

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        tracing::info!("Listening on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
