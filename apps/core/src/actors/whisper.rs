//! HTTP client for the Whisper speech service.

use crate::actors::messages::{ActorError, AppError, AudioClip, Transcription};
use crate::actors::traits::SpeechToText;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Body returned by `POST /transcribe-realtime`.
#[derive(Debug, Deserialize)]
struct TranscribeBody {
    status: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    error: Option<String>,
}

/// Speech-to-text backend that uploads audio to a Whisper HTTP service.
#[derive(Debug, Clone)]
pub struct WhisperHttpBackend {
    base_url: Url,
    client: Client,
}

impl WhisperHttpBackend {
    /// Creates a backend for the service at `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url)?;
        // Endpoints are joined relative to the base, so keep any path prefix as a directory.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url, client })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        Ok(self.base_url.join(path)?)
    }
}

#[async_trait]
impl SpeechToText for WhisperHttpBackend {
    async fn transcribe(&self, clip: AudioClip) -> Result<Transcription, AppError> {
        let url = self.endpoint("transcribe-realtime")?;
        let size = clip.bytes.len();

        let part = Part::bytes(clip.bytes)
            .file_name(clip.file_name)
            .mime_str(&clip.content_type)
            .map_err(|e| AppError::Validation(format!("Invalid audio content type: {}", e)))?;
        let form = Form::new().part("audio", part);

        debug!("Uploading {} bytes to {}", size, url);
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ActorError::Timeout(format!("Speech service timed out: {}", e))
                } else {
                    ActorError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ActorError::Unavailable(e.to_string()))?;
        if !status.is_success() {
            return Err(ActorError::Transcription(format!(
                "Speech service returned {}: {}",
                status, body
            ))
            .into());
        }

        let parsed: TranscribeBody = serde_json::from_str(&body).map_err(|e| {
            ActorError::Transcription(format!("Unexpected speech service response: {}", e))
        })?;
        if parsed.status == "error" {
            let reason = parsed.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(ActorError::Transcription(reason).into());
        }

        info!(
            "Transcribed {} bytes into {} chars in {:.2}s",
            size,
            parsed.text.len(),
            parsed.duration
        );
        Ok(Transcription {
            text: parsed.text.trim().to_string(),
            duration: parsed.duration,
        })
    }

    async fn health(&self) -> Result<(), AppError> {
        let url = self.endpoint("health")?;
        let response = self
            .client
            .get(url)
            .timeout(HEALTH_TIMEOUT)
            .send()
            .await
            .map_err(|e| ActorError::Unavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(ActorError::Unavailable(format!(
                "Speech service health returned {}",
                response.status()
            ))
            .into())
        }
    }

    fn name(&self) -> &str {
        "whisper-http"
    }
}
