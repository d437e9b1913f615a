pub mod ingestion_dto;
pub mod response_dto;
pub mod scrape_dto;

pub use response_dto::{ApiResponse, HealthResponseDto, WebhookAckDto};
