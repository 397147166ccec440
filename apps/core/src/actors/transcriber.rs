use crate::actors::messages::{ActorError, AppError, AudioClip, TranscriberMessage, Transcription};
use crate::actors::traits::SpeechToText;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{error, info, instrument};

const CHANNEL_CAPACITY: usize = 32;

/// A handle to the `TranscriberActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the running
/// transcriber. Requests are served one at a time by the runner, so a single speech service
/// never sees concurrent uploads from this process.
#[derive(Clone)]
pub struct TranscriberHandle {
    sender: mpsc::Sender<TranscriberMessage>,
    request_timeout: Duration,
}

impl TranscriberHandle {
    /// Spawns the runner in a new Tokio task and returns a handle to it.
    ///
    /// `request_timeout` bounds how long a caller waits for one transcription, queueing included.
    pub fn new(backend: Arc<dyn SpeechToText>, request_timeout: Duration) -> Self {
        let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);
        let actor = TranscriberRunner::new(receiver, backend);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout,
        }
    }

    async fn send<T>(
        &self,
        msg: TranscriberMessage,
        recv: oneshot::Receiver<Result<T, AppError>>,
    ) -> Result<T, AppError> {
        self.sender
            .send(msg)
            .await
            .map_err(|e| ActorError::Internal(e.to_string()))?;
        timeout(self.request_timeout, recv)
            .await
            .map_err(ActorError::from)?
            .map_err(|e| ActorError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl SpeechToText for TranscriberHandle {
    #[instrument(skip(self, clip), fields(bytes = clip.bytes.len()))]
    async fn transcribe(&self, clip: AudioClip) -> Result<Transcription, AppError> {
        if clip.is_empty() {
            return Err(AppError::Validation("Audio file is empty".to_string()));
        }
        let (responder, recv) = oneshot::channel();
        self.send(TranscriberMessage::Transcribe { clip, responder }, recv)
            .await
    }

    #[instrument(skip(self))]
    async fn health(&self) -> Result<(), AppError> {
        let (responder, recv) = oneshot::channel();
        self.send(TranscriberMessage::HealthCheck { responder }, recv)
            .await
    }

    fn name(&self) -> &str {
        "transcriber"
    }
}

// --- Actor Runner (Internal Logic) ---
struct TranscriberRunner {
    receiver: mpsc::Receiver<TranscriberMessage>,
    backend: Arc<dyn SpeechToText>,
}

impl TranscriberRunner {
    fn new(receiver: mpsc::Receiver<TranscriberMessage>, backend: Arc<dyn SpeechToText>) -> Self {
        Self { receiver, backend }
    }

    async fn run(mut self) {
        info!("TranscriberActor started (backend: {})", self.backend.name());

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        info!("TranscriberActor stopped");
    }

    async fn handle_message(&self, msg: TranscriberMessage) {
        match msg {
            TranscriberMessage::Transcribe { clip, responder } => {
                let result = self.backend.transcribe(clip).await;
                if let Err(ref e) = result {
                    error!("Transcription failed: {}", e);
                }
                // The caller may have timed out and dropped its receiver.
                let _ = responder.send(result);
            }
            TranscriberMessage::HealthCheck { responder } => {
                let _ = responder.send(self.backend.health().await);
            }
        }
    }
}
