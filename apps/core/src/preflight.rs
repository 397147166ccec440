//! Connection checks.
//!
//! Verifies the database and the speech service and reports each result. Used by
//! `GET /test-connection` and once at startup.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::time::Instant;
use tracing::{info, warn};

use crate::actors::traits::SpeechToText;

/// Result of a single check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub passed: bool,
    pub message: String,
    pub details: Option<String>,
    pub latency_ms: u64,
}

impl CheckResult {
    fn pass(name: &str, message: &str, started: Instant) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            details: None,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn fail(name: &str, message: &str, details: Option<String>, started: Instant) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            details,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Complete connection report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionReport {
    pub all_passed: bool,
    pub checks: Vec<CheckResult>,
    pub summary: String,
}

impl ConnectionReport {
    fn from_checks(checks: Vec<CheckResult>) -> Self {
        let passed = checks.iter().filter(|c| c.passed).count();
        let all_passed = passed == checks.len();
        let summary = if all_passed {
            format!("All {} checks passed", checks.len())
        } else {
            let failed: Vec<&str> = checks
                .iter()
                .filter(|c| !c.passed)
                .map(|c| c.name.as_str())
                .collect();
            format!(
                "{}/{} checks passed; failing: {}",
                passed,
                checks.len(),
                failed.join(", ")
            )
        };
        Self {
            all_passed,
            checks,
            summary,
        }
    }
}

pub async fn check_database(pool: &SqlitePool) -> CheckResult {
    let started = Instant::now();
    match sqlx::query_scalar::<_, i64>("SELECT 1").fetch_one(pool).await {
        Ok(1) => CheckResult::pass("database", "Database connection successful", started),
        Ok(other) => CheckResult::fail(
            "database",
            "Database returned an unexpected value",
            Some(format!("SELECT 1 returned {}", other)),
            started,
        ),
        Err(e) => CheckResult::fail(
            "database",
            "Database connection failed",
            Some(e.to_string()),
            started,
        ),
    }
}

pub async fn check_speech_service(speech: &dyn SpeechToText) -> CheckResult {
    let started = Instant::now();
    match speech.health().await {
        Ok(()) => CheckResult::pass("speech_service", "Speech service is healthy", started),
        Err(e) => CheckResult::fail(
            "speech_service",
            "Speech service is unreachable",
            Some(e.to_string()),
            started,
        ),
    }
}

/// Runs every check. A missing database (agent profile) is skipped, not failed.
pub async fn run_connection_checks(
    pool: Option<&SqlitePool>,
    speech: &dyn SpeechToText,
) -> ConnectionReport {
    let mut checks = Vec::new();
    if let Some(pool) = pool {
        checks.push(check_database(pool).await);
    }
    checks.push(check_speech_service(speech).await);

    let report = ConnectionReport::from_checks(checks);
    if report.all_passed {
        info!("Connection checks: {}", report.summary);
    } else {
        warn!("Connection checks: {}", report.summary);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_failures() {
        let started = Instant::now();
        let report = ConnectionReport::from_checks(vec![
            CheckResult::pass("database", "ok", started),
            CheckResult::fail("speech_service", "down", None, started),
        ]);
        assert!(!report.all_passed);
        assert_eq!(report.summary, "1/2 checks passed; failing: speech_service");
    }

    #[test]
    fn test_all_passed() {
        let started = Instant::now();
        let report = ConnectionReport::from_checks(vec![CheckResult::pass("database", "ok", started)]);
        assert!(report.all_passed);
        assert_eq!(report.summary, "All 1 checks passed");
    }
}
