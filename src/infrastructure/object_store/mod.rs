pub mod s3_object_store;

pub use s3_object_store::{S3ObjectStore, S3ObjectStoreConfig};
