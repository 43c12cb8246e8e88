//! td-import CLI Binary
//!
//! Launches the bulk import delegate for `import:prepare`, `import:upload` and `import:auto`.

use clap::Parser;
use std::process;
use td_import::cli::{map_error, print_preflight_guidance, Cli, RunContext};
use td_import::environment::EnvironmentSnapshot;
use td_import::error::ImportError;
use td_import::logging::{init_logging, LoggingConfig};
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();
    let environment = EnvironmentSnapshot::capture();

    // Logging is configured from the loaded file, so a load failure is reported unlogged.
    let context = match RunContext::from_cli(&cli, environment) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    let logging_config = build_logging_config(
        &cli,
        context.config().logging.clone(),
        context.environment(),
    );
    if let Err(e) = init_logging(&logging_config) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("td-import starting");

    match context.execute(&cli.command) {
        Ok(()) => {
            info!("Command completed successfully");
        }
        Err(ImportError::Preflight(failure)) => {
            error!("Runtime preflight failed: {}", failure);
            print_preflight_guidance(&failure);
            process::exit(1);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from the config file section, CLI args and environment.
/// Logging stays off unless --verbose or an explicit --log-level asks for it.
fn build_logging_config(
    cli: &Cli,
    mut config: LoggingConfig,
    environment: &EnvironmentSnapshot,
) -> LoggingConfig {
    if cli.verbose {
        config.enabled = true;
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.enabled = true;
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = Some(file.clone());
    }

    config.apply_environment(environment);
    config
}
