use sqlx::SqlitePool;
use std::sync::{Arc, Mutex};

use crate::actors::traits::SpeechToText;
use crate::brain::Classifier;
use crate::config::ServiceConfig;
use crate::error::AppError;
use crate::rate_limiter::RateLimiter;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pool: Option<SqlitePool>,
    pub classifier: Classifier,
    /// Speech-to-text front end (normally a `TranscriberHandle`).
    pub speech: Arc<dyn SpeechToText>,
    rate_limiter: Arc<Mutex<RateLimiter>>,
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    pub fn new(
        pool: Option<SqlitePool>,
        speech: Arc<dyn SpeechToText>,
        config: ServiceConfig,
    ) -> Self {
        let rate_limiter = RateLimiter::new(config.rate_limit_requests, config.rate_limit_window());
        Self {
            pool,
            classifier: Classifier::new(),
            speech,
            rate_limiter: Arc::new(Mutex::new(rate_limiter)),
            config: Arc::new(config),
        }
    }

    pub fn pool(&self) -> Result<&SqlitePool, AppError> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::Config("Database is not configured for this profile".to_string()))
    }

    pub fn pool_opt(&self) -> Option<&SqlitePool> {
        self.pool.as_ref()
    }

    /// Counts one request against the session's window, or fails with `RateLimited`.
    pub fn check_rate_limit(&self, session_id: &str) -> Result<(), AppError> {
        let mut limiter = self
            .rate_limiter
            .lock()
            .map_err(|_| AppError::Internal("Rate limiter lock poisoned".to_string()))?;
        if limiter.check(session_id) {
            Ok(())
        } else {
            Err(AppError::RateLimited)
        }
    }

    /// Forgets sessions that have been idle for a full window.
    pub fn prune_rate_limits(&self) {
        if let Ok(mut limiter) = self.rate_limiter.lock() {
            limiter.prune();
        }
    }
}
