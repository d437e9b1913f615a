diesel::table! {
    ingestion_batch_jobs (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        user_id -> Uuid,
        job_id -> Text,
        job_type -> Varchar,
        status -> Varchar,
        total_urls -> Int4,
        processed_urls -> Int4,
        successful_urls -> Int4,
        failed_urls -> Int4,
        metadata -> Jsonb,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ingestion_chunks (id) {
        id -> Uuid,
        file_id -> Uuid,
        chunk_index -> Int4,
        object_key -> Text,
        chunk_text_preview_link -> Nullable<Text>,
        token_count -> Int4,
        embedding_status -> Varchar,
        vector_id -> Nullable<Text>,
        vector_namespace -> Nullable<Text>,
        vector_metadata -> Nullable<Jsonb>,
        page_number -> Nullable<Int4>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ingestion_errors (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        file_id -> Nullable<Uuid>,
        chunk_id -> Nullable<Uuid>,
        step -> Varchar,
        error_message -> Text,
        retry_count -> Int4,
        resolved_at -> Nullable<Timestamptz>,
        metadata -> Jsonb,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    ingestion_files (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        user_id -> Uuid,
        file_name -> Varchar,
        file_type -> Varchar,
        file_size -> Int8,
        file_tokens -> Nullable<Int4>,
        file_pages -> Nullable<Int4>,
        file_source -> Varchar,
        source_id -> Nullable<Uuid>,
        batch_job_id -> Nullable<Uuid>,
        storage_uri -> Text,
        object_key -> Text,
        total_chunks -> Int4,
        status -> Varchar,
        metadata -> Nullable<Jsonb>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ingestion_sources (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        file_id -> Nullable<Uuid>,
        source_type -> Varchar,
        source_url -> Text,
        normalized_url -> Nullable<Text>,
        extractor -> Varchar,
        extraction_status -> Varchar,
        extracted_pages -> Nullable<Int4>,
        extracted_tokens -> Nullable<Int4>,
        metadata -> Nullable<Jsonb>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    ingestion_status_logs (id) {
        id -> Uuid,
        tenant_id -> Uuid,
        entity_type -> Varchar,
        file_id -> Nullable<Uuid>,
        chunk_id -> Nullable<Uuid>,
        source_id -> Nullable<Uuid>,
        status -> Varchar,
        metadata -> Nullable<Jsonb>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    webhook_events (id) {
        id -> Uuid,
        source -> Varchar,
        event_digest -> Varchar,
        payload -> Jsonb,
        received_at -> Timestamptz,
        processed_at -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(ingestion_chunks -> ingestion_files (file_id));
diesel::joinable!(ingestion_files -> ingestion_batch_jobs (batch_job_id));

diesel::allow_tables_to_appear_in_same_query!(
    ingestion_batch_jobs,
    ingestion_chunks,
    ingestion_errors,
    ingestion_files,
    ingestion_sources,
    ingestion_status_logs,
    webhook_events,
);
