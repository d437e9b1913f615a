pub mod acquire_transcripts;
pub mod acquire_upload;
pub mod apply_crawler_event;
pub mod apply_processing_event;
pub mod get_batch_job_status;
pub mod get_file_status;
pub mod list_files;
pub mod purge_file;
pub mod submit_scrape_job;

pub use acquire_transcripts::AcquireTranscriptsUseCase;
pub use acquire_upload::AcquireUploadUseCase;
pub use apply_crawler_event::ApplyCrawlerEventUseCase;
pub use apply_processing_event::ApplyProcessingEventUseCase;
pub use get_batch_job_status::GetBatchJobStatusUseCase;
pub use get_file_status::GetFileStatusUseCase;
pub use list_files::ListFilesUseCase;
pub use purge_file::PurgeFileUseCase;
pub use submit_scrape_job::SubmitScrapeJobUseCase;
