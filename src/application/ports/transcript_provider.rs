use async_trait::async_trait;

#[derive(Debug)]
pub enum TranscriptError {
    Unavailable(String),
    FetchFailed(String),
}

impl std::fmt::Display for TranscriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptError::Unavailable(msg) => write!(f, "Transcript unavailable: {}", msg),
            TranscriptError::FetchFailed(msg) => write!(f, "Transcript fetch failed: {}", msg),
        }
    }
}

impl std::error::Error for TranscriptError {}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub video_id: String,
    pub text: String,
    pub language: Option<String>,
}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError>;
}
