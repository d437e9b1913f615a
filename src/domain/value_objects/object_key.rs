use uuid::Uuid;

use crate::domain::value_objects::{ContentType, SourceChannel};

/// Deterministic object-store key layout, scoped by tenant and file:
///
///   uploads/tenants/{tenant}/files/{channel}/{file}/raw.{ext}
///   uploads/tenants/{tenant}/files/{channel}/{file}/chunks/chunk_{i}.txt
///
/// Everything belonging to one file lives under a single prefix so a purge
/// can list-and-delete it in one sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectKey(String);

impl ObjectKey {
    pub fn raw_content(
        tenant_id: Uuid,
        channel: SourceChannel,
        file_id: Uuid,
        content_type: ContentType,
    ) -> Self {
        Self(format!(
            "{}raw.{}",
            Self::file_prefix(tenant_id, channel, file_id),
            content_type.extension()
        ))
    }

    pub fn chunk(tenant_id: Uuid, channel: SourceChannel, file_id: Uuid, index: i32) -> Self {
        Self(format!(
            "{}chunks/chunk_{}.txt",
            Self::file_prefix(tenant_id, channel, file_id),
            index
        ))
    }

    /// Prefix covering every object stored for one file.
    pub fn file_prefix(tenant_id: Uuid, channel: SourceChannel, file_id: Uuid) -> String {
        format!(
            "uploads/tenants/{}/files/{}/{}/",
            tenant_id,
            channel.as_str(),
            file_id
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vector-index namespace: one namespace per tenant, vectors tagged with
/// their owning file id in metadata. Bounds the namespace count regardless
/// of how many files a tenant ingests.
pub fn vector_namespace(tenant_id: Uuid) -> String {
    format!("tenants/{}", tenant_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_content_key_layout() {
        let tenant_id = Uuid::new_v4();
        let file_id = Uuid::new_v4();
        let key = ObjectKey::raw_content(
            tenant_id,
            SourceChannel::LocalUpload,
            file_id,
            ContentType::Pdf,
        );

        assert_eq!(
            key.as_str(),
            format!(
                "uploads/tenants/{}/files/LOCAL_UPLOAD/{}/raw.pdf",
                tenant_id, file_id
            )
        );
    }

    #[test]
    fn test_chunk_key_shares_file_prefix() {
        let tenant_id = Uuid::new_v4();
        let file_id = Uuid::new_v4();
        let prefix = ObjectKey::file_prefix(tenant_id, SourceChannel::FirecrawlCrawl, file_id);
        let raw = ObjectKey::raw_content(
            tenant_id,
            SourceChannel::FirecrawlCrawl,
            file_id,
            ContentType::Markdown,
        );
        let chunk = ObjectKey::chunk(tenant_id, SourceChannel::FirecrawlCrawl, file_id, 2);

        assert!(raw.as_str().starts_with(&prefix));
        assert!(chunk.as_str().starts_with(&prefix));
        assert!(chunk.as_str().ends_with("chunks/chunk_2.txt"));
    }

    #[test]
    fn test_vector_namespace_is_per_tenant() {
        let tenant_id = Uuid::new_v4();
        assert_eq!(vector_namespace(tenant_id), format!("tenants/{}", tenant_id));
    }
}
