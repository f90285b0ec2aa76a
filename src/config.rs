//! Client configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const SESSION_FILE_NAME: &str = "session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `REALNEST_API_URL`: API base URL, default `http://localhost:8080/api`
    /// - `REALNEST_SESSION_FILE`: session file, default `<data dir>/realnest/session.json`
    /// - `REALNEST_TIMEOUT_SECS`: request timeout, default 30
    pub fn from_env() -> Self {
        let api_base_url = normalize_base_url(
            &std::env::var("REALNEST_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        );
        let session_file = std::env::var_os("REALNEST_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);
        let request_timeout = Duration::from_secs(env_parse_u64("REALNEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS));

        Self { api_base_url, session_file, request_timeout }
    }

    pub fn with_api_base_url(mut self, url: &str) -> Self {
        self.api_base_url = normalize_base_url(url);
        self
    }

    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: default_session_file(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("realnest")
        .join(SESSION_FILE_NAME)
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
