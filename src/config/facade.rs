//! Config loader facade: the only place configuration sources are assembled.

use super::merge::merge_policy;
use super::sources;
use super::TdConfig;
use crate::environment::EnvironmentSnapshot;
use crate::error::ConfigurationError;
use std::path::Path;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file (if present), then environment overrides.
    pub fn load(env: &EnvironmentSnapshot) -> Result<TdConfig, ConfigurationError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::env::add_to_builder(builder, env)?;
        Self::finish(builder)
    }

    /// Load defaults, the given file (which must exist), then environment overrides.
    pub fn load_from_file(
        path: &Path,
        env: &EnvironmentSnapshot,
    ) -> Result<TdConfig, ConfigurationError> {
        debug!(config_path = %path.display(), "Loading explicit configuration file");
        let builder = merge_policy::builder_with_defaults()?;
        let builder = sources::explicit_file::add_to_builder(builder, path)?;
        let builder = sources::env::add_to_builder(builder, env)?;
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<TdConfig, ConfigurationError> {
        let config: TdConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}
