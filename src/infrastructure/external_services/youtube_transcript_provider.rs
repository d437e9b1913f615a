use async_trait::async_trait;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::application::ports::transcript_provider::{
    Transcript, TranscriptError, TranscriptProvider,
};

const TRANSCRIPT_LANGUAGES: &[&str] = &["en"];

pub struct YoutubeTranscriptProvider {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscriptProvider {
    pub fn new() -> Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            TranscriptError::FetchFailed(format!("Failed to set up YouTube API: {}", e))
        })?;

        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptProvider for YoutubeTranscriptProvider {
    async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, TranscriptError> {
        let fetched = self
            .api
            .fetch_transcript(video_id, TRANSCRIPT_LANGUAGES, false)
            .await
            .map_err(|e| TranscriptError::FetchFailed(format!("{}: {}", video_id, e)))?;

        if fetched.snippets.is_empty() {
            return Err(TranscriptError::Unavailable(
                "Video has no available transcripts".to_string(),
            ));
        }

        let text = fetched
            .snippets
            .iter()
            .map(|snippet| snippet.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Ok(Transcript {
            video_id: video_id.to_string(),
            text,
            language: Some("en".to_string()),
        })
    }
}
