pub mod crawler_client;
pub mod object_storage;
pub mod sitemap_fetcher;
pub mod tenant_gateway;
pub mod transcript_provider;
pub mod vector_index;

pub use crawler_client::CrawlerClient;
pub use object_storage::ObjectStorage;
pub use sitemap_fetcher::SitemapFetcher;
pub use tenant_gateway::TenantGateway;
pub use transcript_provider::TranscriptProvider;
pub use vector_index::VectorIndex;
