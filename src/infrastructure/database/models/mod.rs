pub mod batch_job_model;
pub mod chunk_model;
pub mod error_model;
pub mod file_model;
pub mod status_log_model;
pub mod webhook_event_model;

pub use batch_job_model::*;
pub use chunk_model::*;
pub use error_model::*;
pub use file_model::*;
pub use status_log_model::*;
pub use webhook_event_model::*;
