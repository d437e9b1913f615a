use serde::{Deserialize, Serialize};

/// Pipeline state of an ingested file. Transitions only move forward along
/// the pipeline or into FAILED/DELETING/DELETED, never backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    Uploaded,
    Chunking,
    Embedding,
    Completed,
    Failed,
    Deleting,
    Deleted,
}

impl FileStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileStatus::Uploaded => "UPLOADED",
            FileStatus::Chunking => "CHUNKING",
            FileStatus::Embedding => "EMBEDDING",
            FileStatus::Completed => "COMPLETED",
            FileStatus::Failed => "FAILED",
            FileStatus::Deleting => "DELETING",
            FileStatus::Deleted => "DELETED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "UPLOADED" => Ok(FileStatus::Uploaded),
            "CHUNKING" => Ok(FileStatus::Chunking),
            "EMBEDDING" => Ok(FileStatus::Embedding),
            "COMPLETED" => Ok(FileStatus::Completed),
            "FAILED" => Ok(FileStatus::Failed),
            "DELETING" => Ok(FileStatus::Deleting),
            "DELETED" => Ok(FileStatus::Deleted),
            _ => Err(format!("Invalid file status: {}", s)),
        }
    }

    /// Statuses the external processing service is allowed to report.
    /// DELETING/DELETED are owned by the purge path and never accepted
    /// from the wire.
    pub fn parse_reported(s: &str) -> Result<Self, String> {
        match Self::parse(s)? {
            FileStatus::Deleting | FileStatus::Deleted => {
                Err(format!("Status not reportable by the pipeline: {}", s))
            }
            status => Ok(status),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            FileStatus::Completed | FileStatus::Failed | FileStatus::Deleted
        )
    }

    pub fn can_transition_to(&self, next: FileStatus) -> bool {
        match (self, next) {
            // Forward pipeline progression.
            (FileStatus::Uploaded, FileStatus::Chunking)
            | (FileStatus::Uploaded, FileStatus::Embedding)
            | (FileStatus::Uploaded, FileStatus::Completed)
            | (FileStatus::Chunking, FileStatus::Embedding)
            | (FileStatus::Chunking, FileStatus::Completed)
            | (FileStatus::Embedding, FileStatus::Completed) => true,
            // Anything in flight may fail.
            (FileStatus::Uploaded, FileStatus::Failed)
            | (FileStatus::Chunking, FileStatus::Failed)
            | (FileStatus::Embedding, FileStatus::Failed) => true,
            // Purge path.
            (_, FileStatus::Deleting) => !matches!(self, FileStatus::Deleted),
            (FileStatus::Deleting, FileStatus::Deleted) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for status in [
            FileStatus::Uploaded,
            FileStatus::Chunking,
            FileStatus::Embedding,
            FileStatus::Completed,
            FileStatus::Failed,
            FileStatus::Deleting,
            FileStatus::Deleted,
        ] {
            assert_eq!(FileStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_rejects_unknown_status() {
        assert!(FileStatus::parse("PENDING").is_err());
        assert!(FileStatus::parse("uploaded").is_err());
        assert!(FileStatus::parse("").is_err());
    }

    #[test]
    fn test_reported_statuses_exclude_purge_states() {
        assert!(FileStatus::parse_reported("COMPLETED").is_ok());
        assert!(FileStatus::parse_reported("DELETING").is_err());
        assert!(FileStatus::parse_reported("DELETED").is_err());
    }

    #[test]
    fn test_forward_only_transitions() {
        assert!(FileStatus::Uploaded.can_transition_to(FileStatus::Chunking));
        assert!(FileStatus::Chunking.can_transition_to(FileStatus::Embedding));
        assert!(FileStatus::Embedding.can_transition_to(FileStatus::Completed));
        assert!(FileStatus::Chunking.can_transition_to(FileStatus::Failed));

        // Never backward.
        assert!(!FileStatus::Completed.can_transition_to(FileStatus::Chunking));
        assert!(!FileStatus::Embedding.can_transition_to(FileStatus::Uploaded));
        assert!(!FileStatus::Failed.can_transition_to(FileStatus::Completed));
    }

    #[test]
    fn test_purge_transitions() {
        assert!(FileStatus::Completed.can_transition_to(FileStatus::Deleting));
        assert!(FileStatus::Failed.can_transition_to(FileStatus::Deleting));
        assert!(FileStatus::Deleting.can_transition_to(FileStatus::Deleted));
        assert!(!FileStatus::Deleted.can_transition_to(FileStatus::Deleting));
        assert!(!FileStatus::Completed.can_transition_to(FileStatus::Deleted));
    }
}
