//! System Property Builder
//!
//! Turns the account settings, the proxy environment, and the delegate's logging
//! configuration into the `-Dkey=value` tokens passed to the delegate. Order is fixed:
//! endpoint, proxy, logging, API key.

use crate::config::AccountConfig;
use crate::endpoint::{resolve_endpoint, resolve_proxy};
use crate::environment::EnvironmentSnapshot;
use crate::error::ConfigurationError;
use std::fmt;
use std::path::Path;

pub const API_SERVER_SCHEME: &str = "td.api.server.scheme";
pub const API_SERVER_HOST: &str = "td.api.server.host";
pub const API_SERVER_PORT: &str = "td.api.server.port";
pub const PROXY_HOST: &str = "http.proxyHost";
pub const PROXY_PORT: &str = "http.proxyPort";
pub const LOGGING_CONFIG_FILE: &str = "java.util.logging.config.file";
pub const API_KEY: &str = "td.api.key";

/// One key=value assignment for the delegate runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemProperty {
    pub key: &'static str,
    pub value: String,
}

impl SystemProperty {
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }

    /// Runtime define token, `-Dkey=value`.
    pub fn to_define(&self) -> String {
        format!("-D{}={}", self.key, self.value)
    }
}

impl fmt::Display for SystemProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // never print the API key itself
        if self.key == API_KEY {
            write!(f, "{}=<redacted>", self.key)
        } else {
            write!(f, "{}={}", self.key, self.value)
        }
    }
}

/// Ordered set of system properties, built fresh per invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemPropertySet {
    properties: Vec<SystemProperty>,
}

impl SystemPropertySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: SystemProperty) {
        self.properties.push(property);
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemProperty> {
        self.properties.iter()
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.properties.iter().map(|p| p.key).collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|p| p.key == key)
            .map(|p| p.value.as_str())
    }

    /// All properties as `-Dkey=value` tokens, in insertion order.
    pub fn to_defines(&self) -> Vec<String> {
        self.properties.iter().map(SystemProperty::to_define).collect()
    }
}

/// Build the delegate's system properties.
///
/// Endpoint, proxy, and logging groups are each skipped when their source is absent.
/// The API key is always required.
pub fn build_properties(
    account: &AccountConfig,
    env: &EnvironmentSnapshot,
    logging_config: Option<&Path>,
) -> Result<SystemPropertySet, ConfigurationError> {
    let mut set = SystemPropertySet::new();

    if let Some(endpoint) = resolve_endpoint(account.endpoint(), account.secure)? {
        set.push(SystemProperty::new(API_SERVER_SCHEME, endpoint.scheme_prefix()));
        set.push(SystemProperty::new(API_SERVER_HOST, endpoint.host));
        set.push(SystemProperty::new(API_SERVER_PORT, endpoint.port.to_string()));
    }

    if let Some(proxy) = resolve_proxy(env.http_proxy.as_deref())? {
        if let Some(host) = proxy.host {
            set.push(SystemProperty::new(PROXY_HOST, host));
        }
        if let Some(port) = proxy.port {
            set.push(SystemProperty::new(PROXY_PORT, port.to_string()));
        }
    }

    if let Some(path) = logging_config.filter(|p| !p.as_os_str().is_empty()) {
        set.push(SystemProperty::new(
            LOGGING_CONFIG_FILE,
            path.to_string_lossy().into_owned(),
        ));
    }

    set.push(SystemProperty::new(API_KEY, account.apikey()?));

    Ok(set)
}
