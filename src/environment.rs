//! Process environment captured once per invocation.

/// Environment variables the bridge reads. Captured once at startup and passed down
/// explicitly so nothing below the entry point touches `std::env`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSnapshot {
    /// `HTTP_PROXY`
    pub http_proxy: Option<String>,
    /// `TD_API_KEY`
    pub api_key: Option<String>,
    /// `TD_API_SERVER`
    pub api_server: Option<String>,
    /// `TD_IMPORT_LOG`, a log filter directive
    pub log_filter: Option<String>,
    /// `TD_IMPORT_LOG_FORMAT`
    pub log_format: Option<String>,
    /// `TD_IMPORT_LOG_OUTPUT`
    pub log_output: Option<String>,
}

impl EnvironmentSnapshot {
    pub fn capture() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a snapshot from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            http_proxy: lookup("HTTP_PROXY"),
            api_key: lookup("TD_API_KEY"),
            api_server: lookup("TD_API_SERVER"),
            log_filter: lookup("TD_IMPORT_LOG"),
            log_format: lookup("TD_IMPORT_LOG_FORMAT"),
            log_output: lookup("TD_IMPORT_LOG_OUTPUT"),
        }
    }
}
