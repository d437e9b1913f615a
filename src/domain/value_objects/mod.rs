pub mod batch_job_status;
pub mod content_type;
pub mod file_status;
pub mod object_key;
pub mod record_metadata;
pub mod source_channel;

pub use batch_job_status::BatchJobStatus;
pub use content_type::ContentType;
pub use file_status::FileStatus;
pub use object_key::{ObjectKey, vector_namespace};
pub use record_metadata::RecordMetadata;
pub use source_channel::{ScrapeJobType, SourceChannel};
