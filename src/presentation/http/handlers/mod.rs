pub mod ingestion_handler;
pub mod scrape_handler;
pub mod webhook_handler;

pub use ingestion_handler::IngestionHandler;
pub use scrape_handler::ScrapeHandler;
pub use webhook_handler::WebhookHandler;
