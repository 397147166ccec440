use crate::actors::messages::{AppError, AudioClip, Transcription};
use async_trait::async_trait;

/// Defines the public interface for a speech-to-text backend.
///
/// This trait abstracts the transcription engine, allowing the HTTP Whisper service, a local
/// model or a test double to be used interchangeably.
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribes one audio clip.
    async fn transcribe(&self, clip: AudioClip) -> Result<Transcription, AppError>;

    /// Checks that the backend is reachable and ready.
    async fn health(&self) -> Result<(), AppError>;

    /// Short backend name used in logs and reports.
    fn name(&self) -> &str;
}
