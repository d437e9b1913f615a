pub mod postgres_batch_job_repository;
pub mod postgres_chunk_repository;
pub mod postgres_error_repository;
pub mod postgres_file_repository;
pub mod postgres_status_log_repository;
pub mod postgres_webhook_event_repository;

pub use postgres_batch_job_repository::PostgresBatchJobRepository;
pub use postgres_chunk_repository::PostgresChunkRepository;
pub use postgres_error_repository::PostgresErrorRepository;
pub use postgres_file_repository::PostgresFileRepository;
pub use postgres_status_log_repository::PostgresStatusLogRepository;
pub use postgres_webhook_event_repository::PostgresWebhookEventRepository;
