mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;

use infrastructure::{AppConfig, AppContainer};
use presentation::http::server::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let container = AppContainer::new(&config).await?;

    let server = HttpServer::new(
        Arc::clone(&container.ingestion_handler),
        Arc::clone(&container.scrape_handler),
        Arc::clone(&container.webhook_handler),
        config.port,
    );

    server.run().await
}
