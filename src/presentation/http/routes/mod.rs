pub mod health_routes;
pub mod ingestion_routes;
pub mod scrape_routes;
pub mod webhook_routes;

pub use health_routes::health_routes;
pub use ingestion_routes::ingestion_routes;
pub use scrape_routes::scrape_routes;
pub use webhook_routes::webhook_routes;
