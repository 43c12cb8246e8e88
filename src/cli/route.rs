//! CLI route: run context and the single route table from commands to the bridge.

use crate::bridge::{ImportBridge, InvocationContext};
use crate::cli::help::{command_name, delegate_subcommand};
use crate::cli::parse::{Cli, Commands};
use crate::config::{CliOverrides, ConfigLoader, TdConfig};
use crate::delegate::LocalDistribution;
use crate::environment::EnvironmentSnapshot;
use crate::error::ImportError;
use crate::process::SystemRunner;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: resolved configuration and captured environment.
pub struct RunContext {
    config: TdConfig,
    environment: EnvironmentSnapshot,
}

impl RunContext {
    /// Load configuration (explicit file or global file), then apply CLI overrides.
    pub fn new(
        config_path: Option<PathBuf>,
        overrides: &CliOverrides,
        environment: EnvironmentSnapshot,
    ) -> Result<Self, ImportError> {
        let mut config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path, &environment)?,
            None => ConfigLoader::load(&environment)?,
        };
        config.apply_overrides(overrides);
        Ok(Self {
            config,
            environment,
        })
    }

    pub fn from_cli(cli: &Cli, environment: EnvironmentSnapshot) -> Result<Self, ImportError> {
        Self::new(cli.config.clone(), &overrides_from(cli), environment)
    }

    pub fn config(&self) -> &TdConfig {
        &self.config
    }

    pub fn environment(&self) -> &EnvironmentSnapshot {
        &self.environment
    }

    /// Execute a command against the real process runner and local delegate installation.
    pub fn execute(&self, command: &Commands) -> Result<(), ImportError> {
        let distribution = LocalDistribution::from_config(&self.config.import)?;
        let bridge = ImportBridge::new(
            SystemRunner,
            distribution,
            self.config.import.runtime.clone(),
        );
        info!(command = %command_name(command), "Dispatching command");
        bridge.invoke(delegate_subcommand(command), &self.invocation_context(command))
    }

    /// Snapshot handed to the bridge for one command.
    pub fn invocation_context(&self, command: &Commands) -> InvocationContext {
        let args = match command {
            Commands::Prepare(passthrough)
            | Commands::Upload(passthrough)
            | Commands::Auto(passthrough) => passthrough.args.clone(),
        };
        InvocationContext {
            account: self.config.account.clone(),
            environment: self.environment.clone(),
            args,
        }
    }
}

fn overrides_from(cli: &Cli) -> CliOverrides {
    CliOverrides {
        apikey: cli.apikey.clone(),
        endpoint: cli.endpoint.clone(),
        insecure: cli.insecure,
    }
}
