use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cap on the serialized size of a metadata blob accepted at the boundary.
pub const MAX_METADATA_BYTES: usize = 16 * 1024;

/// Loosely-typed per-entity extra data (source URLs, scrape options, webhook
/// summaries). A side channel only: anything the reconciliation engine
/// branches on is a modeled column, never a metadata lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordMetadata {
    properties: HashMap<String, serde_json::Value>,
}

impl RecordMetadata {
    pub fn new() -> Self {
        Self {
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: serde_json::Value) -> Self {
        self.properties.insert(key.to_string(), value);
        self
    }

    pub fn set_property(&mut self, key: &str, value: serde_json::Value) {
        self.properties.insert(key.to_string(), value);
    }

    pub fn get_property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Validates an untrusted JSON blob at the boundary: must be an object
    /// and must not exceed the size cap.
    pub fn from_untrusted(value: serde_json::Value) -> Result<Self, String> {
        let serialized = serde_json::to_string(&value)
            .map_err(|e| format!("Metadata is not serializable: {}", e))?;
        if serialized.len() > MAX_METADATA_BYTES {
            return Err(format!(
                "Metadata exceeds {} byte cap ({} bytes)",
                MAX_METADATA_BYTES,
                serialized.len()
            ));
        }
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                properties: map.into_iter().collect(),
            }),
            _ => Err("Metadata must be a JSON object".to_string()),
        }
    }
}

impl From<RecordMetadata> for serde_json::Value {
    fn from(metadata: RecordMetadata) -> Self {
        serde_json::Value::Object(metadata.properties.into_iter().collect())
    }
}

impl From<HashMap<String, serde_json::Value>> for RecordMetadata {
    fn from(properties: HashMap<String, serde_json::Value>) -> Self {
        Self { properties }
    }
}

impl TryFrom<serde_json::Value> for RecordMetadata {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Object(map) => Ok(Self {
                properties: map.into_iter().collect(),
            }),
            _ => Err("Metadata must be a JSON object".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_operations() {
        let mut metadata = RecordMetadata::new();
        assert!(metadata.is_empty());

        metadata.set_property("sourceUrl", serde_json::json!("https://example.com"));
        assert_eq!(metadata.get_str("sourceUrl"), Some("https://example.com"));
        assert!(metadata.get_property("missing").is_none());
    }

    #[test]
    fn test_from_untrusted_accepts_objects() {
        let metadata =
            RecordMetadata::from_untrusted(serde_json::json!({"a": 1, "b": "two"})).unwrap();
        assert_eq!(metadata.get_property("a"), Some(&serde_json::json!(1)));
    }

    #[test]
    fn test_from_untrusted_rejects_non_objects() {
        assert!(RecordMetadata::from_untrusted(serde_json::json!([1, 2])).is_err());
        assert!(RecordMetadata::from_untrusted(serde_json::json!("str")).is_err());
    }

    #[test]
    fn test_from_untrusted_rejects_oversized_blobs() {
        let big = "x".repeat(MAX_METADATA_BYTES + 1);
        assert!(RecordMetadata::from_untrusted(serde_json::json!({ "blob": big })).is_err());
    }
}
