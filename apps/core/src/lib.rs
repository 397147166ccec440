//! MindBridge core: keyword-driven risk and mood classification, a conversation store and a
//! bridge to the speech-to-text service, served over one configurable HTTP service.

pub mod actors;
pub mod api;
pub mod brain;
pub mod config;
pub mod database;
pub mod error;
pub mod models;
pub mod preflight;
pub mod rate_limiter;
pub mod telemetry;

#[cfg(test)]
mod tests;
