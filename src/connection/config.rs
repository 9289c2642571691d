use std::time::Duration;

use anyhow::{Context, Result};

/// Connection settings for the restaurant backend.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub base_url: String,

    /// TCP connect timeout.
    pub connect_timeout: Duration,

    /// Per-request timeout, covering the full response.
    pub request_timeout: Duration,
}

impl ConnectionConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Set the TCP connect timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the per-request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Read configuration from the environment.
    ///
    /// `BISTRO_BASE_URL` defaults to the backend's development address.
    pub fn from_env() -> Result<Self> {
        let base_url = env_string("BISTRO_BASE_URL", "http://localhost:5000");

        let request_timeout = env_string("BISTRO_REQUEST_TIMEOUT_SECS", "30")
            .parse::<u64>()
            .context("BISTRO_REQUEST_TIMEOUT_SECS must be u64")?;

        Ok(Self::new(&base_url).request_timeout(Duration::from_secs(request_timeout)))
    }
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}

fn env_string(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
