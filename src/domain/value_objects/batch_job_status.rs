use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchJobStatus {
    Started,
    Processing,
    Completed,
    Failed,
}

impl BatchJobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchJobStatus::Started => "STARTED",
            BatchJobStatus::Processing => "PROCESSING",
            BatchJobStatus::Completed => "COMPLETED",
            BatchJobStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Result<Self, String> {
        match s {
            "STARTED" => Ok(BatchJobStatus::Started),
            "PROCESSING" => Ok(BatchJobStatus::Processing),
            "COMPLETED" => Ok(BatchJobStatus::Completed),
            "FAILED" => Ok(BatchJobStatus::Failed),
            _ => Err(format!("Invalid batch job status: {}", s)),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchJobStatus::Completed | BatchJobStatus::Failed)
    }
}

impl std::fmt::Display for BatchJobStatus {
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
            BatchJobStatus::Started,
            BatchJobStatus::Processing,
            BatchJobStatus::Completed,
            BatchJobStatus::Failed,
        ] {
            assert_eq!(BatchJobStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_rejects_unknown() {
        assert!(BatchJobStatus::parse("RUNNING").is_err());
        assert!(BatchJobStatus::parse("started").is_err());
    }

    #[test]
    fn test_terminal() {
        assert!(!BatchJobStatus::Started.is_terminal());
        assert!(!BatchJobStatus::Processing.is_terminal());
        assert!(BatchJobStatus::Completed.is_terminal());
        assert!(BatchJobStatus::Failed.is_terminal());
    }
}
