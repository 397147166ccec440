use serde::Serialize;
use tokio::sync::oneshot;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// The speech service answered, but could not transcribe the audio.
    #[error("Transcription failed: {0}")]
    Transcription(String),
    /// The speech service could not be reached.
    #[error("Speech service unavailable: {0}")]
    Unavailable(String),
    /// A generic internal error within an actor (closed channel, dropped responder).
    #[error("Internal system error: {0}")]
    Internal(String),
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Raw audio handed to the transcriber.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

impl AudioClip {
    pub fn new(bytes: Vec<u8>, file_name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            file_name: file_name.into(),
            content_type: content_type.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Text produced from an `AudioClip`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transcription {
    pub text: String,
    /// Seconds the speech service spent on the clip.
    pub duration: f64,
}

/// Messages that can be sent to the `TranscriberActor`.
#[derive(Debug)]
pub enum TranscriberMessage {
    /// Transcribe one clip.
    Transcribe {
        clip: AudioClip,
        /// A channel to send the transcription back.
        responder: oneshot::Sender<Result<Transcription, AppError>>,
    },
    /// Ask the backend whether the speech service is healthy.
    HealthCheck {
        responder: oneshot::Sender<Result<(), AppError>>,
    },
}
