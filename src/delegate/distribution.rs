//! Delegate distribution: locating the installed delegate jar and its logging properties.
//!
//! Downloading and updating the jar is handled elsewhere; this side only verifies that an
//! installation is present before the bridge tries to use it.

use crate::config::ImportConfig;
use crate::error::{ConfigurationError, ImportError};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const JAR_FILE_NAME: &str = "td-import.jar";
pub const LOGGING_PROPERTIES_FILE: &str = "logging.properties";

/// Source of the delegate jar.
pub trait DelegateDistribution {
    /// Make sure the delegate is installed and current, failing if it cannot be.
    fn ensure_current(&self) -> Result<(), ImportError>;

    /// Path of the delegate jar, used as the classpath.
    fn jar_path(&self) -> Result<PathBuf, ImportError>;

    /// Logging configuration for the delegate, if one is installed.
    fn logging_config_path(&self) -> Option<PathBuf>;
}

/// Delegate installed on the local filesystem (by default under `~/.td/java`).
#[derive(Debug, Clone)]
pub struct LocalDistribution {
    home: PathBuf,
    jar: Option<PathBuf>,
    logging_properties: Option<PathBuf>,
}

impl LocalDistribution {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            jar: None,
            logging_properties: None,
        }
    }

    /// Build from the `[import]` section, falling back to `~/.td/java`.
    pub fn from_config(import: &ImportConfig) -> Result<Self, ConfigurationError> {
        let home = match import.delegate_home {
            Some(ref home) => expand_home(home)?,
            None => default_home()?,
        };
        let mut distribution = Self::new(home);
        if let Some(ref jar) = import.jar {
            distribution.jar = Some(expand_home(jar)?);
        }
        if let Some(ref logging) = import.logging_properties {
            distribution.logging_properties = Some(expand_home(logging)?);
        }
        Ok(distribution)
    }

    fn resolved_jar(&self) -> PathBuf {
        self.jar
            .clone()
            .unwrap_or_else(|| self.home.join(JAR_FILE_NAME))
    }
}

impl DelegateDistribution for LocalDistribution {
    fn ensure_current(&self) -> Result<(), ImportError> {
        let jar = self.resolved_jar();
        if jar.is_file() {
            debug!(jar = %jar.display(), "Delegate jar present");
            Ok(())
        } else {
            Err(ImportError::DelegateMissing(jar))
        }
    }

    fn jar_path(&self) -> Result<PathBuf, ImportError> {
        Ok(self.resolved_jar())
    }

    fn logging_config_path(&self) -> Option<PathBuf> {
        if let Some(ref explicit) = self.logging_properties {
            return Some(explicit.clone());
        }
        let installed = self.home.join(LOGGING_PROPERTIES_FILE);
        installed.is_file().then_some(installed)
    }
}

fn default_home() -> Result<PathBuf, ConfigurationError> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".td").join("java"))
        .ok_or_else(|| {
            ConfigurationError::Load(
                "Cannot determine home directory; set import.delegate_home".to_string(),
            )
        })
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &Path) -> Result<PathBuf, ConfigurationError> {
    let Ok(rest) = path.strip_prefix("~") else {
        return Ok(path.to_path_buf());
    };
    let dirs = directories::BaseDirs::new().ok_or_else(|| {
        ConfigurationError::Load(format!(
            "Cannot expand '{}': home directory unknown",
            path.display()
        ))
    })?;
    Ok(dirs.home_dir().join(rest))
}
