//! Transport configuration parsed from environment variables.

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for TransportTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Base URL relative endpoint paths are joined to. No trailing slash.
    pub base_url: String,
    pub timeouts: TransportTimeouts,
}

impl TransportConfig {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: normalize_base_url(base_url), timeouts: TransportTimeouts::default() }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: TransportTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build typed transport config from environment variables.
    ///
    /// Optional:
    /// - `LEADFORM_BASE_URL`: default `http://localhost:3000`
    /// - `LEADFORM_REQUEST_TIMEOUT_SECS`: default 20
    /// - `LEADFORM_CONNECT_TIMEOUT_SECS`: default 10
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = std::env::var("LEADFORM_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let timeouts = TransportTimeouts {
            request_secs: env_parse_u64("LEADFORM_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("LEADFORM_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Self::new(&base_url).with_timeouts(timeouts)
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
