use std::sync::Arc;

use crate::{
    application::{
        ports::{
            CrawlerClient, ObjectStorage, SitemapFetcher, TenantGateway, TranscriptProvider,
            VectorIndex,
        },
        services::{ContentWriterService, WebhookSignatureVerifier},
        use_cases::{
            AcquireTranscriptsUseCase, AcquireUploadUseCase, ApplyCrawlerEventUseCase,
            ApplyProcessingEventUseCase, GetBatchJobStatusUseCase, GetFileStatusUseCase,
            ListFilesUseCase, PurgeFileUseCase, SubmitScrapeJobUseCase,
        },
    },
    domain::repositories::{
        BatchJobRepository, ChunkRepository, ErrorRepository, FileRepository, StatusLogRepository,
        WebhookEventRepository,
    },
    infrastructure::{
        config::AppConfig,
        database::{
            create_connection_pool, get_connection_from_pool,
            repositories::{
                PostgresBatchJobRepository, PostgresChunkRepository, PostgresErrorRepository,
                PostgresFileRepository, PostgresStatusLogRepository,
                PostgresWebhookEventRepository,
            },
            run_migrations,
        },
        external_services::{
            FirecrawlClient, HttpSitemapFetcher, HttpTenantGateway, HttpVectorIndex,
            YoutubeTranscriptProvider,
        },
        object_store::{S3ObjectStore, S3ObjectStoreConfig},
    },
    presentation::http::handlers::{IngestionHandler, ScrapeHandler, WebhookHandler},
};

pub struct AppContainer {
    // Repositories
    pub file_repository: Arc<dyn FileRepository>,
    pub chunk_repository: Arc<dyn ChunkRepository>,
    pub batch_job_repository: Arc<dyn BatchJobRepository>,
    pub status_log_repository: Arc<dyn StatusLogRepository>,
    pub error_repository: Arc<dyn ErrorRepository>,
    pub webhook_event_repository: Arc<dyn WebhookEventRepository>,

    // External services
    pub object_storage: Arc<dyn ObjectStorage>,
    pub vector_index: Arc<dyn VectorIndex>,
    pub crawler: Arc<dyn CrawlerClient>,
    pub transcript_provider: Arc<dyn TranscriptProvider>,
    pub tenant_gateway: Arc<dyn TenantGateway>,

    // Application services
    pub content_writer: Arc<ContentWriterService>,

    // Use cases
    pub acquire_upload_use_case: Arc<AcquireUploadUseCase>,
    pub acquire_transcripts_use_case: Arc<AcquireTranscriptsUseCase>,
    pub submit_scrape_job_use_case: Arc<SubmitScrapeJobUseCase>,
    pub apply_processing_event_use_case: Arc<ApplyProcessingEventUseCase>,
    pub apply_crawler_event_use_case: Arc<ApplyCrawlerEventUseCase>,
    pub purge_file_use_case: Arc<PurgeFileUseCase>,
    pub get_file_status_use_case: Arc<GetFileStatusUseCase>,
    pub get_batch_job_status_use_case: Arc<GetBatchJobStatusUseCase>,
    pub list_files_use_case: Arc<ListFilesUseCase>,

    // HTTP handlers
    pub ingestion_handler: Arc<IngestionHandler>,
    pub scrape_handler: Arc<ScrapeHandler>,
    pub webhook_handler: Arc<WebhookHandler>,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let db_pool = create_connection_pool()?;
        let mut conn = get_connection_from_pool(&db_pool)?;
        run_migrations(&mut conn)?;
        drop(conn);

        // Repositories
        let file_repository: Arc<dyn FileRepository> =
            Arc::new(PostgresFileRepository::new(db_pool.clone()));
        let chunk_repository: Arc<dyn ChunkRepository> =
            Arc::new(PostgresChunkRepository::new(db_pool.clone()));
        let batch_job_repository: Arc<dyn BatchJobRepository> =
            Arc::new(PostgresBatchJobRepository::new(db_pool.clone()));
        let status_log_repository: Arc<dyn StatusLogRepository> =
            Arc::new(PostgresStatusLogRepository::new(db_pool.clone()));
        let error_repository: Arc<dyn ErrorRepository> =
            Arc::new(PostgresErrorRepository::new(db_pool.clone()));
        let webhook_event_repository: Arc<dyn WebhookEventRepository> =
            Arc::new(PostgresWebhookEventRepository::new(db_pool));

        // External services
        let object_storage: Arc<dyn ObjectStorage> = Arc::new(
            S3ObjectStore::new(S3ObjectStoreConfig::from_env().map_err(|e| e.to_string())?).await,
        );
        let vector_index: Arc<dyn VectorIndex> = Arc::new(HttpVectorIndex::from_env()?);
        let crawler: Arc<dyn CrawlerClient> = Arc::new(FirecrawlClient::from_env()?);
        let sitemap_fetcher: Arc<dyn SitemapFetcher> = Arc::new(HttpSitemapFetcher::new()?);
        let transcript_provider: Arc<dyn TranscriptProvider> =
            Arc::new(YoutubeTranscriptProvider::new().map_err(|e| e.to_string())?);
        let tenant_gateway: Arc<dyn TenantGateway> = Arc::new(HttpTenantGateway::from_env()?);

        // Application services
        let content_writer = Arc::new(ContentWriterService::new(
            object_storage.clone(),
            file_repository.clone(),
            status_log_repository.clone(),
        ));

        // Use cases
        let acquire_upload_use_case = Arc::new(AcquireUploadUseCase::new(
            tenant_gateway.clone(),
            content_writer.clone(),
        ));

        let acquire_transcripts_use_case = Arc::new(AcquireTranscriptsUseCase::new(
            tenant_gateway.clone(),
            transcript_provider.clone(),
            content_writer.clone(),
        ));

        let submit_scrape_job_use_case = Arc::new(SubmitScrapeJobUseCase::new(
            tenant_gateway.clone(),
            crawler.clone(),
            sitemap_fetcher,
            batch_job_repository.clone(),
            error_repository.clone(),
            config.crawler_webhook_url(),
        ));

        let apply_processing_event_use_case = Arc::new(ApplyProcessingEventUseCase::new(
            WebhookSignatureVerifier::new(config.processing_webhook_secret.as_bytes().to_vec()),
            file_repository.clone(),
            error_repository.clone(),
            webhook_event_repository.clone(),
        ));

        let apply_crawler_event_use_case = Arc::new(ApplyCrawlerEventUseCase::new(
            WebhookSignatureVerifier::new(config.crawler_webhook_secret.as_bytes().to_vec()),
            content_writer.clone(),
            batch_job_repository.clone(),
            error_repository.clone(),
            webhook_event_repository.clone(),
        ));

        let purge_file_use_case = Arc::new(PurgeFileUseCase::new(
            file_repository.clone(),
            vector_index.clone(),
            object_storage.clone(),
        ));

        let get_file_status_use_case = Arc::new(GetFileStatusUseCase::new(
            file_repository.clone(),
            status_log_repository.clone(),
        ));

        let get_batch_job_status_use_case = Arc::new(GetBatchJobStatusUseCase::new(
            batch_job_repository.clone(),
            file_repository.clone(),
        ));

        let list_files_use_case = Arc::new(ListFilesUseCase::new(file_repository.clone()));

        // HTTP handlers
        let ingestion_handler = Arc::new(IngestionHandler::new(
            acquire_upload_use_case.clone(),
            acquire_transcripts_use_case.clone(),
            get_file_status_use_case.clone(),
            list_files_use_case.clone(),
            purge_file_use_case.clone(),
            chunk_repository.clone(),
        ));

        let scrape_handler = Arc::new(ScrapeHandler::new(
            submit_scrape_job_use_case.clone(),
            get_batch_job_status_use_case.clone(),
        ));

        let webhook_handler = Arc::new(WebhookHandler::new(
            apply_processing_event_use_case.clone(),
            apply_crawler_event_use_case.clone(),
        ));

        Ok(Self {
            file_repository,
            chunk_repository,
            batch_job_repository,
            status_log_repository,
            error_repository,
            webhook_event_repository,
            object_storage,
            vector_index,
            crawler,
            transcript_provider,
            tenant_gateway,
            content_writer,
            acquire_upload_use_case,
            acquire_transcripts_use_case,
            submit_scrape_job_use_case,
            apply_processing_event_use_case,
            apply_crawler_event_use_case,
            purge_file_use_case,
            get_file_status_use_case,
            get_batch_job_status_use_case,
            list_files_use_case,
            ingestion_handler,
            scrape_handler,
            webhook_handler,
        })
    }
}
