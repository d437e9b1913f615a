//! In-memory implementations of the repository and port traits, backing the
//! use-case tests. The store keeps all tables behind one mutex so multi-row
//! operations are atomic the same way the Postgres transactions are, and
//! failure flags let tests stand in for storage outages and rolled-back
//! transactions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::application::ports::crawler_client::{
    CrawlOptions, CrawlerClient, CrawlerError, ScrapeOptions, WebhookRegistration,
};
use crate::application::ports::object_storage::{ObjectStorage, ObjectStorageError, StoredObject};
use crate::application::ports::tenant_gateway::{
    IngestionAction, QuotaDecision, TenantGateway, TenantGatewayError,
};
use crate::application::ports::transcript_provider::{
    Transcript, TranscriptError, TranscriptProvider,
};
use crate::application::ports::vector_index::{VectorIndex, VectorIndexError};
use crate::domain::entities::{BatchJob, Chunk, ErrorRecord, IngestionFile, StatusLogEntry};
use crate::domain::repositories::batch_job_repository::{
    BatchJobRepository, BatchJobRepositoryError,
};
use crate::domain::repositories::chunk_repository::{ChunkRepository, ChunkRepositoryError};
use crate::domain::repositories::error_repository::{ErrorRepository, ErrorRepositoryError};
use crate::domain::repositories::file_repository::{
    CompletionCounts, FileRepository, FileRepositoryError,
};
use crate::domain::repositories::status_log_repository::{
    StatusLogRepository, StatusLogRepositoryError,
};
use crate::domain::repositories::webhook_event_repository::{
    LedgerOutcome, WebhookEventRepository, WebhookEventRepositoryError, WebhookSource,
};
use crate::domain::value_objects::{BatchJobStatus, FileStatus, RecordMetadata};

#[derive(Debug, Clone)]
pub struct LedgerRow {
    pub id: Uuid,
    pub source: WebhookSource,
    pub payload: serde_json::Value,
    pub processed: bool,
}

#[derive(Debug, Clone)]
pub struct SourceRow {
    pub file_id: Option<Uuid>,
    pub extraction_status: String,
}

#[derive(Default)]
pub struct StoreState {
    pub files: HashMap<Uuid, IngestionFile>,
    pub chunks: Vec<Chunk>,
    pub logs: Vec<StatusLogEntry>,
    pub jobs: HashMap<String, BatchJob>,
    pub errors: Vec<ErrorRecord>,
    pub events: HashMap<String, LedgerRow>,
    pub sources: HashMap<Uuid, SourceRow>,
}

#[derive(Default)]
pub struct InMemoryStore {
    pub state: Mutex<StoreState>,
    pub fail_file_insert: AtomicBool,
    pub fail_completion: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_writes(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.files.len()
            + state.chunks.len()
            + state.logs.len()
            + state.jobs.len()
            + state.errors.len()
            + state.events.len()
    }

    pub fn seed_file(&self, file: IngestionFile) {
        self.state.lock().unwrap().files.insert(file.id(), file);
    }

    pub fn seed_job(&self, job: BatchJob) {
        self.state
            .lock()
            .unwrap()
            .jobs
            .insert(job.job_id().to_string(), job);
    }

    pub fn seed_source(&self, source_id: Uuid, file_id: Uuid) {
        self.state.lock().unwrap().sources.insert(
            source_id,
            SourceRow {
                file_id: Some(file_id),
                extraction_status: "COMPLETED".to_string(),
            },
        );
    }

    pub fn file(&self, id: Uuid) -> Option<IngestionFile> {
        self.state.lock().unwrap().files.get(&id).cloned()
    }

    pub fn job(&self, job_id: &str) -> Option<BatchJob> {
        self.state.lock().unwrap().jobs.get(job_id).cloned()
    }

    pub fn chunks_for(&self, file_id: Uuid) -> Vec<Chunk> {
        self.state
            .lock()
            .unwrap()
            .chunks
            .iter()
            .filter(|c| c.file_id() == file_id)
            .cloned()
            .collect()
    }

    pub fn logs_for(&self, file_id: Uuid) -> Vec<StatusLogEntry> {
        self.state
            .lock()
            .unwrap()
            .logs
            .iter()
            .filter(|l| l.file_id() == Some(file_id))
            .cloned()
            .collect()
    }

    pub fn errors_for(&self, file_id: Option<Uuid>) -> Vec<ErrorRecord> {
        self.state
            .lock()
            .unwrap()
            .errors
            .iter()
            .filter(|e| e.file_id() == file_id)
            .cloned()
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.state.lock().unwrap().errors.len()
    }

    pub fn source(&self, source_id: Uuid) -> Option<SourceRow> {
        self.state.lock().unwrap().sources.get(&source_id).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

fn rebuild_with_status(file: &IngestionFile, status: FileStatus) -> IngestionFile {
    IngestionFile::from_database(
        file.id(),
        file.tenant_id(),
        file.user_id(),
        file.file_name().to_string(),
        file.file_type(),
        file.file_size(),
        file.file_tokens(),
        file.file_pages(),
        file.file_source(),
        file.source_id(),
        file.batch_job_id(),
        file.storage_uri().to_string(),
        file.object_key().to_string(),
        file.total_chunks(),
        status,
        file.metadata().cloned(),
        file.created_at(),
        chrono::Utc::now(),
    )
}

fn rebuild_completed(file: &IngestionFile, counts: CompletionCounts) -> IngestionFile {
    IngestionFile::from_database(
        file.id(),
        file.tenant_id(),
        file.user_id(),
        file.file_name().to_string(),
        file.file_type(),
        file.file_size(),
        counts.total_tokens,
        counts.total_pages,
        file.file_source(),
        file.source_id(),
        file.batch_job_id(),
        file.storage_uri().to_string(),
        file.object_key().to_string(),
        counts.total_chunks,
        FileStatus::Completed,
        file.metadata().cloned(),
        file.created_at(),
        chrono::Utc::now(),
    )
}

fn overwrite_file_logs(state: &mut StoreState, file_id: Uuid, marker: &str) {
    let replacements: Vec<StatusLogEntry> = state
        .logs
        .iter()
        .map(|entry| {
            if entry.file_id() == Some(file_id) {
                StatusLogEntry::from_database(
                    entry.id(),
                    entry.tenant_id(),
                    entry.entity_type(),
                    entry.file_id(),
                    entry.chunk_id(),
                    entry.source_id(),
                    marker.to_string(),
                    entry.metadata().cloned(),
                    entry.created_at(),
                )
            } else {
                entry.clone()
            }
        })
        .collect();
    state.logs = replacements;
}

#[async_trait]
impl FileRepository for InMemoryStore {
    async fn insert(&self, file: &IngestionFile) -> Result<(), FileRepositoryError> {
        if self.fail_file_insert.load(Ordering::SeqCst) {
            return Err(FileRepositoryError::DatabaseError(
                "injected insert failure".to_string(),
            ));
        }
        self.state
            .lock()
            .unwrap()
            .files
            .insert(file.id(), file.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<IngestionFile>, FileRepositoryError> {
        Ok(self.state.lock().unwrap().files.get(&id).cloned())
    }

    async fn find_by_tenant(
        &self,
        tenant_id: Uuid,
        status: Option<FileStatus>,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .files
            .values()
            .filter(|f| f.tenant_id() == tenant_id)
            .filter(|f| status.is_none_or(|s| f.status() == s))
            .cloned()
            .collect())
    }

    async fn find_by_batch_job(
        &self,
        batch_job_id: Uuid,
    ) -> Result<Vec<IngestionFile>, FileRepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .files
            .values()
            .filter(|f| f.batch_job_id() == Some(batch_job_id))
            .cloned()
            .collect())
    }

    async fn transition_status(
        &self,
        file_id: Uuid,
        status: FileStatus,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get(&file_id)
            .ok_or(FileRepositoryError::NotFound(file_id))?;
        let updated = rebuild_with_status(file, status);
        state.files.insert(file_id, updated);
        state.logs.push(log.clone());
        Ok(())
    }

    async fn complete_with_chunks(
        &self,
        file_id: Uuid,
        counts: CompletionCounts,
        chunks: &[Chunk],
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        // Returning early without touching state mirrors a rolled-back
        // transaction.
        if self.fail_completion.load(Ordering::SeqCst) {
            return Err(FileRepositoryError::DatabaseError(
                "injected transaction failure".to_string(),
            ));
        }
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get(&file_id)
            .ok_or(FileRepositoryError::NotFound(file_id))?;
        let updated = rebuild_completed(file, counts);
        state.files.insert(file_id, updated);
        for chunk in chunks {
            let duplicate = state
                .chunks
                .iter()
                .any(|c| c.file_id() == file_id && c.chunk_index() == chunk.chunk_index());
            if !duplicate {
                state.chunks.push(chunk.clone());
            }
        }
        state.logs.push(log.clone());
        Ok(())
    }

    async fn mark_failed(
        &self,
        file_id: Uuid,
        error: &ErrorRecord,
        log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get(&file_id)
            .ok_or(FileRepositoryError::NotFound(file_id))?;
        let updated = rebuild_with_status(file, FileStatus::Failed);
        state.files.insert(file_id, updated);
        state.errors.push(error.clone());
        state.logs.push(log.clone());
        Ok(())
    }

    async fn mark_deleting(&self, file_id: Uuid) -> Result<(), FileRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let file = state
            .files
            .get(&file_id)
            .ok_or(FileRepositoryError::NotFound(file_id))?;
        let updated = rebuild_with_status(file, FileStatus::Deleting);
        state.files.insert(file_id, updated);
        overwrite_file_logs(&mut state, file_id, FileStatus::Deleting.as_str());
        Ok(())
    }

    async fn purge(
        &self,
        file: &IngestionFile,
        final_log: &StatusLogEntry,
    ) -> Result<(), FileRepositoryError> {
        let mut state = self.state.lock().unwrap();
        for source in state.sources.values_mut() {
            if source.file_id == Some(file.id()) {
                source.file_id = None;
                source.extraction_status = "FAILED".to_string();
            }
        }
        overwrite_file_logs(&mut state, file.id(), FileStatus::Deleted.as_str());
        state.logs.push(final_log.clone());
        state.files.remove(&file.id());
        state.chunks.retain(|c| c.file_id() != file.id());
        Ok(())
    }
}

#[async_trait]
impl ChunkRepository for InMemoryStore {
    async fn find_by_file_id(&self, file_id: Uuid) -> Result<Vec<Chunk>, ChunkRepositoryError> {
        let mut chunks = self.chunks_for(file_id);
        chunks.sort_by_key(|c| c.chunk_index());
        Ok(chunks)
    }

    async fn count_by_file_id(&self, file_id: Uuid) -> Result<i64, ChunkRepositoryError> {
        Ok(self.chunks_for(file_id).len() as i64)
    }
}

#[async_trait]
impl BatchJobRepository for InMemoryStore {
    async fn insert(&self, job: &BatchJob) -> Result<(), BatchJobRepositoryError> {
        self.state
            .lock()
            .unwrap()
            .jobs
            .insert(job.job_id().to_string(), job.clone());
        Ok(())
    }

    async fn find_by_job_id(
        &self,
        job_id: &str,
    ) -> Result<Option<BatchJob>, BatchJobRepositoryError> {
        Ok(self.state.lock().unwrap().jobs.get(job_id).cloned())
    }

    async fn update_status(
        &self,
        job_id: &str,
        status: BatchJobStatus,
        metadata: Option<&RecordMetadata>,
    ) -> Result<(), BatchJobRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get(job_id)
            .ok_or_else(|| BatchJobRepositoryError::NotFound(job_id.to_string()))?;
        let updated = BatchJob::from_database(
            job.id(),
            job.tenant_id(),
            job.user_id(),
            job.job_id().to_string(),
            job.job_type(),
            status,
            job.total_urls(),
            job.processed_urls(),
            job.successful_urls(),
            job.failed_urls(),
            metadata.cloned().unwrap_or_else(|| job.metadata().clone()),
            job.created_at(),
            chrono::Utc::now(),
        );
        state.jobs.insert(job_id.to_string(), updated);
        Ok(())
    }

    async fn record_page_outcome(
        &self,
        job_id: &str,
        success: bool,
    ) -> Result<(), BatchJobRepositoryError> {
        let mut state = self.state.lock().unwrap();
        let job = state
            .jobs
            .get(job_id)
            .ok_or_else(|| BatchJobRepositoryError::NotFound(job_id.to_string()))?;
        let updated = BatchJob::from_database(
            job.id(),
            job.tenant_id(),
            job.user_id(),
            job.job_id().to_string(),
            job.job_type(),
            job.status(),
            job.total_urls(),
            job.processed_urls() + 1,
            job.successful_urls() + if success { 1 } else { 0 },
            job.failed_urls() + if success { 0 } else { 1 },
            job.metadata().clone(),
            job.created_at(),
            chrono::Utc::now(),
        );
        state.jobs.insert(job_id.to_string(), updated);
        Ok(())
    }
}

#[async_trait]
impl StatusLogRepository for InMemoryStore {
    async fn append(&self, entry: &StatusLogEntry) -> Result<(), StatusLogRepositoryError> {
        self.state.lock().unwrap().logs.push(entry.clone());
        Ok(())
    }

    async fn list_for_file(
        &self,
        file_id: Uuid,
    ) -> Result<Vec<StatusLogEntry>, StatusLogRepositoryError> {
        Ok(self.logs_for(file_id))
    }
}

#[async_trait]
impl ErrorRepository for InMemoryStore {
    async fn insert(&self, record: &ErrorRecord) -> Result<(), ErrorRepositoryError> {
        self.state.lock().unwrap().errors.push(record.clone());
        Ok(())
    }

    async fn list_for_file(
        &self,
        file_id: Uuid,
    ) -> Result<Vec<ErrorRecord>, ErrorRepositoryError> {
        Ok(self.errors_for(Some(file_id)))
    }
}

#[async_trait]
impl WebhookEventRepository for InMemoryStore {
    async fn record(
        &self,
        source: WebhookSource,
        digest: &str,
        payload: &serde_json::Value,
    ) -> Result<LedgerOutcome, WebhookEventRepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.events.contains_key(digest) {
            return Ok(LedgerOutcome::Duplicate);
        }
        let id = Uuid::new_v4();
        state.events.insert(
            digest.to_string(),
            LedgerRow {
                id,
                source,
                payload: payload.clone(),
                processed: false,
            },
        );
        Ok(LedgerOutcome::Recorded(id))
    }

    async fn mark_processed(&self, event_id: Uuid) -> Result<(), WebhookEventRepositoryError> {
        let mut state = self.state.lock().unwrap();
        for row in state.events.values_mut() {
            if row.id == event_id {
                row.processed = true;
            }
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeObjectStorage {
    pub objects: Mutex<HashMap<String, Vec<u8>>>,
    pub fail_puts: AtomicBool,
}

impl FakeObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        self.objects.lock().unwrap().keys().cloned().collect()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStorage for FakeObjectStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<StoredObject, ObjectStorageError> {
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(ObjectStorageError::PutFailed(
                "injected put failure".to_string(),
            ));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(StoredObject {
            object_key: key.to_string(),
            storage_uri: format!("https://fake-bucket.s3.amazonaws.com/{}", key),
        })
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn delete_objects(&self, keys: &[String]) -> Result<(), ObjectStorageError> {
        let mut objects = self.objects.lock().unwrap();
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeVectorIndex {
    pub deletes: Mutex<Vec<(String, Uuid)>>,
    pub fail: AtomicBool,
}

impl FakeVectorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deleted(&self) -> Vec<(String, Uuid)> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl VectorIndex for FakeVectorIndex {
    async fn delete_file_vectors(
        &self,
        namespace: &str,
        file_id: Uuid,
    ) -> Result<(), VectorIndexError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(VectorIndexError::DeleteFailed(
                "injected delete failure".to_string(),
            ));
        }
        self.deletes
            .lock()
            .unwrap()
            .push((namespace.to_string(), file_id));
        Ok(())
    }
}

pub struct FakeCrawlerClient {
    pub job_id: String,
    pub mapped_urls: Vec<String>,
    pub submissions: Mutex<Vec<WebhookRegistration>>,
    pub fail: AtomicBool,
}

impl FakeCrawlerClient {
    pub fn new(job_id: &str) -> Self {
        Self {
            job_id: job_id.to_string(),
            mapped_urls: Vec::new(),
            submissions: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }
}

#[async_trait]
impl CrawlerClient for FakeCrawlerClient {
    async fn start_batch_scrape(
        &self,
        _urls: &[String],
        _options: &ScrapeOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CrawlerError::Rejected("injected rejection".to_string()));
        }
        self.submissions.lock().unwrap().push(webhook.clone());
        Ok(self.job_id.clone())
    }

    async fn start_crawl(
        &self,
        _seed_url: &str,
        _options: &CrawlOptions,
        webhook: &WebhookRegistration,
    ) -> Result<String, CrawlerError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(CrawlerError::Rejected("injected rejection".to_string()));
        }
        self.submissions.lock().unwrap().push(webhook.clone());
        Ok(self.job_id.clone())
    }

    async fn map_site(
        &self,
        _url: &str,
        limit: i32,
        _include_paths: &[String],
        _exclude_paths: &[String],
    ) -> Result<Vec<String>, CrawlerError> {
        Ok(self
            .mapped_urls
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct FakeSitemapFetcher {
    pub xml: Option<String>,
}

impl FakeSitemapFetcher {
    pub fn with_xml(xml: &str) -> Self {
        Self {
            xml: Some(xml.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { xml: None }
    }
}

#[async_trait]
impl crate::application::ports::sitemap_fetcher::SitemapFetcher for FakeSitemapFetcher {
    async fn fetch_xml(
        &self,
        url: &str,
    ) -> Result<String, crate::application::ports::sitemap_fetcher::SitemapFetchError> {
        match &self.xml {
            Some(xml) => Ok(xml.clone()),
            None => Err(
                crate::application::ports::sitemap_fetcher::SitemapFetchError::RequestFailed(
                    format!("unreachable: {}", url),
                ),
            ),
        }
    }
}

#[derive(Default)]
pub struct FakeTranscriptProvider {
    pub transcripts: HashMap<String, String>,
}

impl FakeTranscriptProvider {
    pub fn with_transcript(mut self, video_id: &str, text: &str) -> Self {
        self.transcripts
            .insert(video_id.to_string(), text.to_string());
        self
    }
}

#[async_trait]
impl TranscriptProvider for FakeTranscriptProvider {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        match self.transcripts.get(video_id) {
            Some(text) => Ok(Transcript {
                video_id: video_id.to_string(),
                text: text.clone(),
                language: Some("en".to_string()),
            }),
            None => Err(TranscriptError::Unavailable(format!(
                "No transcript for {}",
                video_id
            ))),
        }
    }
}

pub struct FakeTenantGateway {
    pub quota_allowed: AtomicBool,
    pub permission_allowed: AtomicBool,
    pub remaining: i64,
}

impl FakeTenantGateway {
    pub fn allowing() -> Self {
        Self {
            quota_allowed: AtomicBool::new(true),
            permission_allowed: AtomicBool::new(true),
            remaining: 100,
        }
    }
}

#[async_trait]
impl TenantGateway for FakeTenantGateway {
    async fn check_ingestion_quota(
        &self,
        _tenant_id: Uuid,
    ) -> Result<QuotaDecision, TenantGatewayError> {
        Ok(QuotaDecision {
            allowed: self.quota_allowed.load(Ordering::SeqCst),
            remaining: self.remaining,
        })
    }

    async fn check_ingestion_permission(
        &self,
        _tenant_id: Uuid,
        _user_id: Uuid,
        _action: IngestionAction,
    ) -> Result<bool, TenantGatewayError> {
        Ok(self.permission_allowed.load(Ordering::SeqCst))
    }
}
