//! Configuration System
//!
//! Layered configuration for the bridge: built-in defaults, then the global or explicit
//! TOML file, then `TD_API_KEY` / `TD_API_SERVER`, then command-line overrides.

use crate::error::ConfigurationError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Runtime program used when none is configured.
pub const DEFAULT_RUNTIME: &str = "java";

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TdConfig {
    /// Account and API endpoint settings
    #[serde(default)]
    pub account: AccountConfig,

    /// Delegate launch settings
    #[serde(default)]
    pub import: ImportConfig,

    /// Logging configuration for the bridge itself
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Account settings consumed by the system property builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountConfig {
    /// API key passed to the delegate. Required at invocation time.
    pub apikey: Option<String>,

    /// API endpoint, either a URL or a bare `host[:port]`
    pub endpoint: Option<String>,

    /// Default scheme for a bare endpoint (`--insecure` clears it)
    #[serde(default = "default_true")]
    pub secure: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            apikey: None,
            endpoint: None,
            secure: true,
        }
    }
}

impl AccountConfig {
    /// The configured API key; an empty key counts as missing.
    pub fn apikey(&self) -> Result<&str, ConfigurationError> {
        self.apikey
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigurationError::MissingApiKey)
    }

    /// The configured endpoint, `None` when not configured.
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}

/// Delegate launch settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImportConfig {
    /// Runtime program used for the preflight probe and the delegate launch
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Directory holding the delegate jar and its logging properties (default: ~/.td/java)
    pub delegate_home: Option<PathBuf>,

    /// Explicit delegate jar, overrides `delegate_home`
    pub jar: Option<PathBuf>,

    /// Explicit logging properties file for the delegate, overrides `delegate_home`
    pub logging_properties: Option<PathBuf>,
}

fn default_runtime() -> String {
    DEFAULT_RUNTIME.to_string()
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            runtime: default_runtime(),
            delegate_home: None,
            jar: None,
            logging_properties: None,
        }
    }
}

/// Command-line values that take precedence over every configuration source.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub apikey: Option<String>,
    pub endpoint: Option<String>,
    pub insecure: bool,
}

impl TdConfig {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(ref apikey) = overrides.apikey {
            self.account.apikey = Some(apikey.clone());
        }
        if let Some(ref endpoint) = overrides.endpoint {
            self.account.endpoint = Some(endpoint.clone());
        }
        if overrides.insecure {
            self.account.secure = false;
        }
    }

    /// Validate settings that cannot be checked by deserialization alone.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.import.runtime.trim().is_empty() {
            return Err(ConfigurationError::Load(
                "import.runtime cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}
