//! Runtime configuration from environment variables

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the interview coach
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoachConfig {
    /// Base URL of the scoring service
    pub api_url: String,
    /// Bound on every scoring request; expiry counts as the service being unavailable
    pub request_timeout: Duration,
    /// SQLite file holding the session slot
    pub db_path: PathBuf,
}

impl Default for CoachConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl CoachConfig {
    /// Read `INTERVIEW_API_URL`, `INTERVIEW_TIMEOUT_SECS` and `INTERVIEW_DB_PATH`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = lookup("INTERVIEW_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = lookup("INTERVIEW_TIMEOUT_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let db_path = lookup("INTERVIEW_DB_PATH").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| "/tmp".to_string());
                PathBuf::from(format!("{home}/.interview-coach/session.db"))
            },
            PathBuf::from,
        );

        Self {
            api_url,
            request_timeout: Duration::from_secs(timeout_secs),
            db_path,
        }
    }
}
