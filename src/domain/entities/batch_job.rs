use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::value_objects::{BatchJobStatus, RecordMetadata, ScrapeJobType};

/// Tracks one external crawl/scrape job spanning many URLs. Counters hold
/// `processed_urls == successful_urls + failed_urls` at all times and only
/// ever grow; jobs are kept forever for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchJob {
    id: Uuid,
    tenant_id: Uuid,
    user_id: Uuid,
    job_id: String,
    job_type: ScrapeJobType,
    status: BatchJobStatus,
    total_urls: i32,
    processed_urls: i32,
    successful_urls: i32,
    failed_urls: i32,
    metadata: RecordMetadata,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BatchJob {
    pub fn new(
        tenant_id: Uuid,
        user_id: Uuid,
        job_id: String,
        job_type: ScrapeJobType,
        total_urls: i32,
        metadata: RecordMetadata,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id,
            user_id,
            job_id,
            job_type,
            status: BatchJobStatus::Started,
            total_urls,
            processed_urls: 0,
            successful_urls: 0,
            failed_urls: 0,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_database(
        id: Uuid,
        tenant_id: Uuid,
        user_id: Uuid,
        job_id: String,
        job_type: ScrapeJobType,
        status: BatchJobStatus,
        total_urls: i32,
        processed_urls: i32,
        successful_urls: i32,
        failed_urls: i32,
        metadata: RecordMetadata,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            user_id,
            job_id,
            job_type,
            status,
            total_urls,
            processed_urls,
            successful_urls,
            failed_urls,
            metadata,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Identifier assigned by the external crawler.
    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn job_type(&self) -> ScrapeJobType {
        self.job_type
    }

    pub fn status(&self) -> BatchJobStatus {
        self.status
    }

    pub fn total_urls(&self) -> i32 {
        self.total_urls
    }

    pub fn processed_urls(&self) -> i32 {
        self.processed_urls
    }

    pub fn successful_urls(&self) -> i32 {
        self.successful_urls
    }

    pub fn failed_urls(&self) -> i32 {
        self.failed_urls
    }

    pub fn metadata(&self) -> &RecordMetadata {
        &self.metadata
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn counters_consistent(&self) -> bool {
        self.processed_urls == self.successful_urls + self.failed_urls
    }
}
