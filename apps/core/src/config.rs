//! Service configuration read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use validator::Validate;

use crate::error::AppError;

/// Which request schema and route set the service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceProfile {
    /// Persistence-backed API: users, chats, voice.
    Backend,
    /// Stateless agent endpoints: `/process` and the agent `/chat` schema.
    Agent,
    /// Backend routes plus `/process`.
    Combined,
}

impl ServiceProfile {
    pub fn default_port(&self) -> u16 {
        match self {
            ServiceProfile::Agent => 8001,
            ServiceProfile::Backend | ServiceProfile::Combined => 8080,
        }
    }
}

impl FromStr for ServiceProfile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backend" => Ok(ServiceProfile::Backend),
            "agent" => Ok(ServiceProfile::Agent),
            "combined" => Ok(ServiceProfile::Combined),
            other => Err(AppError::Config(format!(
                "Unknown SERVICE_PROFILE '{}' (expected backend, agent or combined)",
                other
            ))),
        }
    }
}

impl fmt::Display for ServiceProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ServiceProfile::Backend => "backend",
            ServiceProfile::Agent => "agent",
            ServiceProfile::Combined => "combined",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown LOG_FORMAT '{}'", other))),
        }
    }
}

pub const DEFAULT_DATABASE_URL: &str = "sqlite://mindbridge.sqlite?mode=rwc";
pub const DEFAULT_WHISPER_URL: &str = "http://localhost:9000";

/// Runtime configuration of the service.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    pub profile: ServiceProfile,
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(length(min = 1))]
    pub database_url: String,
    #[validate(url)]
    pub whisper_service_url: String,
    #[validate(range(min = 1, max = 600))]
    pub whisper_timeout_secs: u64,
    #[validate(range(min = 1))]
    pub rate_limit_requests: usize,
    #[validate(range(min = 1))]
    pub rate_limit_window_secs: u64,
    #[validate(length(min = 1))]
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            profile: ServiceProfile::Combined,
            host: "0.0.0.0".to_string(),
            port: ServiceProfile::Combined.default_port(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            whisper_service_url: DEFAULT_WHISPER_URL.to_string(),
            whisper_timeout_secs: 60,
            rate_limit_requests: 30,
            rate_limit_window_secs: 60,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ServiceConfig {
    /// Reads the configuration from environment variables, falling back to defaults.
    ///
    /// Call `dotenv::dotenv()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let profile: ServiceProfile = read_or("SERVICE_PROFILE", defaults.profile)?;

        let config = Self {
            profile,
            host: env::var("HOST").unwrap_or(defaults.host),
            port: read_or("PORT", profile.default_port())?,
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            whisper_service_url: env::var("WHISPER_SERVICE_URL")
                .unwrap_or(defaults.whisper_service_url),
            whisper_timeout_secs: read_or("WHISPER_TIMEOUT_SECS", defaults.whisper_timeout_secs)?,
            rate_limit_requests: read_or("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
            rate_limit_window_secs: read_or(
                "RATE_LIMIT_WINDOW_SECS",
                defaults.rate_limit_window_secs,
            )?,
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: read_or("LOG_FORMAT", defaults.log_format)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn whisper_timeout(&self) -> Duration {
        Duration::from_secs(self.whisper_timeout_secs)
    }

    pub fn rate_limit_window(&self) -> Duration {
        Duration::from_secs(self.rate_limit_window_secs)
    }
}

fn read_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("Invalid {} '{}': {}", key, raw, e))),
        _ => Ok(default),
    }
}
