//! Error types for the bulk import bridge.

use std::path::PathBuf;
use thiserror::Error;

/// Log file the delegate writes its diagnostics to.
pub const DELEGATE_LOG_FILE: &str = "td-bulk-import.log";

/// Configuration errors: malformed endpoint or proxy input, missing credentials,
/// or configuration files that could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid port '{port}' in '{input}' (must be 1-65535)")]
    InvalidPort { input: String, port: String },

    #[error("HTTP proxy URL must use 'http' protocol. Example format: 'http://localhost:3128'. Got: {0}")]
    ProxySchemeNotAllowed(String),

    #[error("Invalid HTTP proxy URL: {0}")]
    InvalidProxy(String),

    #[error("API key is not configured. Set it in the config file, TD_API_KEY, or pass --apikey")]
    MissingApiKey,

    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid logging configuration: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for ConfigurationError {
    fn from(err: config::ConfigError) -> Self {
        ConfigurationError::Load(err.to_string())
    }
}

/// Why the runtime probe failed.
#[derive(Debug, Error)]
pub enum PreflightReason {
    #[error("'{program} -version' exited with status {status}")]
    ProbeFailed { program: String, status: i32 },

    #[error("could not launch '{program}': {source}")]
    NotInvocable {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// The Java runtime required by the delegate is not usable.
///
/// Not meant to be handled programmatically: the binary prints [`guidance`](Self::guidance)
/// and terminates with status 1.
#[derive(Debug, Error)]
#[error("Java runtime is not available: {reason}")]
pub struct RuntimePreflightFailure {
    #[source]
    pub reason: PreflightReason,
}

impl RuntimePreflightFailure {
    /// User-facing lines explaining the failure and the slower fallback commands.
    pub fn guidance(&self) -> Vec<&'static str> {
        vec![
            "Java is not installed. 'td import' command requires Java (version 1.6 or later).",
            "Alternatively, you can use the 'bulk_import' commands.",
            "Since they do not run on Java, they perform significantly slower.",
        ]
    }
}

/// The delegate ran and exited with a non-zero status.
#[derive(Debug, Error)]
#[error("Bulk Import returned error {status}. Please check the '{log_file}' logfile for details.")]
pub struct DelegateExecutionError {
    pub status: i32,
    pub log_file: &'static str,
}

impl DelegateExecutionError {
    pub fn new(status: i32) -> Self {
        Self {
            status,
            log_file: DELEGATE_LOG_FILE,
        }
    }
}

/// Top-level error for one bridge invocation.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigurationError),

    #[error(transparent)]
    Preflight(#[from] RuntimePreflightFailure),

    #[error(transparent)]
    Execution(#[from] DelegateExecutionError),

    #[error(
        "Bulk import delegate not found at {0}. Install td-import.jar there, or point import.jar at an installed copy."
    )]
    DelegateMissing(PathBuf),

    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<config::ConfigError> for ImportError {
    fn from(err: config::ConfigError) -> Self {
        ImportError::Config(err.into())
    }
}
