pub mod content_writer;
pub mod sitemap;
pub mod webhook_signature;

pub use content_writer::ContentWriterService;
pub use webhook_signature::WebhookSignatureVerifier;
