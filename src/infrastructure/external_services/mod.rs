pub mod firecrawl_client;
pub mod http_sitemap_fetcher;
pub mod http_tenant_gateway;
pub mod http_vector_index;
pub mod youtube_transcript_provider;

pub use firecrawl_client::FirecrawlClient;
pub use http_sitemap_fetcher::HttpSitemapFetcher;
pub use http_tenant_gateway::HttpTenantGateway;
pub use http_vector_index::HttpVectorIndex;
pub use youtube_transcript_provider::YoutubeTranscriptProvider;
