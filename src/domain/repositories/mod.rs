pub mod batch_job_repository;
pub mod chunk_repository;
pub mod error_repository;
pub mod file_repository;
pub mod status_log_repository;
pub mod webhook_event_repository;

pub use batch_job_repository::BatchJobRepository;
pub use chunk_repository::ChunkRepository;
pub use error_repository::ErrorRepository;
pub use file_repository::FileRepository;
pub use status_log_repository::StatusLogRepository;
pub use webhook_event_repository::WebhookEventRepository;
