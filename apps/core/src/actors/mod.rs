pub mod messages;
pub mod traits;
pub mod transcriber;
pub mod whisper;
