//! Client configuration.
//!
//! # Design
//! `ClientConfig` is an explicit value handed to `OperadorasClient::new`. The
//! client itself never reads the environment; `ClientConfig::from_env` exists
//! for the composition root (a binary, a test harness) to call once.

use std::time::Duration;

/// Base URL used when no override is supplied.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Upper bound for a single request/response exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(10_000);

/// Environment variable consulted by `ClientConfig::from_env`.
pub const BASE_URL_ENV: &str = "OPERADORAS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    /// Use `base_url` when it is present and not blank, the default otherwise.
    pub fn resolve(base_url: Option<&str>) -> Self {
        match base_url.map(str::trim) {
            Some(url) if !url.is_empty() => Self::new(url),
            _ => Self::default(),
        }
    }

    /// Read the base URL override from `OPERADORAS_API_URL`.
    pub fn from_env() -> Self {
        let value = std::env::var(BASE_URL_ENV).ok();
        Self::resolve(value.as_deref())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Add a default header, replacing any existing header with the same
    /// (case-insensitive) name.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_ascii_lowercase(), value.to_string()));
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
