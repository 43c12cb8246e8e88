//! Environment source: TD_API_KEY and TD_API_SERVER override the file values.

use crate::environment::EnvironmentSnapshot;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    env: &EnvironmentSnapshot,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("account.apikey", non_empty(&env.api_key))?
        .set_override_option("account.endpoint", non_empty(&env.api_server))
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}
