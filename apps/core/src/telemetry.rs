//! Tracing subscriber setup.

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ServiceConfig};
use crate::error::AppError;

/// Installs the global subscriber. `RUST_LOG` wins over `LOG_LEVEL` when set.
pub fn init(config: &ServiceConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| AppError::Config(format!("Invalid LOG_LEVEL '{}': {}", config.log_level, e)))?;

    let (pretty, storage, bunyan) = match config.log_format {
        LogFormat::Pretty => (Some(tracing_subscriber::fmt::layer().with_target(true)), None, None),
        LogFormat::Json => (
            None,
            Some(JsonStorageLayer),
            Some(BunyanFormattingLayer::new("mindbridge".into(), std::io::stdout)),
        ),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(storage)
        .with(bunyan)
        .try_init()
        .map_err(|e| AppError::Internal(format!("Failed to install tracing subscriber: {}", e)))
}
