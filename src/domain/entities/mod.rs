pub mod batch_job;
pub mod chunk;
pub mod error_record;
pub mod ingestion_file;
pub mod status_log;

pub use batch_job::BatchJob;
pub use chunk::Chunk;
pub use error_record::ErrorRecord;
pub use ingestion_file::IngestionFile;
pub use status_log::{EntityKind, StatusLogEntry};
