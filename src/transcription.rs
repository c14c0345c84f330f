use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

pub const MOCK_TRANSCRIPT: &str = "Hello, this is a mock transcription.";

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("transcription timed out after {0:?}")]
    Timeout(Duration),

    #[error("transcription returned no text")]
    EmptyOutput,

    // Returned by networked backends; the bundled mock never fails this way.
    #[allow(dead_code)]
    #[error("transcription service error: {0}")]
    Service(String),
}

/// Speech-to-text backend used by the upload flow.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes) -> Result<String, TranscriptionError>;
}

/// Stand-in backend: waits `delay`, then returns a fixed transcript.
#[derive(Debug, Clone)]
pub struct MockTranscriber {
    delay: Duration,
    text: String,
}

impl MockTranscriber {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            text: MOCK_TRANSCRIPT.to_string(),
        }
    }
}

#[async_trait]
impl Transcriber for MockTranscriber {
    async fn transcribe(&self, audio: Bytes) -> Result<String, TranscriptionError> {
        debug!(bytes = audio.len(), delay_ms = self.delay.as_millis() as u64, "mock transcription");
        tokio::time::sleep(self.delay).await;
        Ok(self.text.clone())
    }
}

/// Run `transcriber` with an upper bound on latency and reject blank output.
pub async fn transcribe_bounded(
    transcriber: &dyn Transcriber,
    audio: Bytes,
    timeout: Duration,
) -> Result<String, TranscriptionError> {
    let text = match tokio::time::timeout(timeout, transcriber.transcribe(audio)).await {
        Ok(res) => res?,
        Err(_) => {
            warn!(timeout_ms = timeout.as_millis() as u64, "transcription timed out");
            return Err(TranscriptionError::Timeout(timeout));
        }
    };
    if text.trim().is_empty() {
        return Err(TranscriptionError::EmptyOutput);
    }
    Ok(text)
}
