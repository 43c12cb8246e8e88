//! Command-name contract for logging and routing.

use crate::cli::parse::Commands;
use crate::delegate::DelegateSubcommand;

/// Delegate subcommand a CLI command maps to.
pub fn delegate_subcommand(command: &Commands) -> DelegateSubcommand {
    match command {
        Commands::Prepare(_) => DelegateSubcommand::Prepare,
        Commands::Upload(_) => DelegateSubcommand::Upload,
        Commands::Auto(_) => DelegateSubcommand::Auto,
    }
}

/// Command name as typed by the user (e.g. "import:upload").
pub fn command_name(command: &Commands) -> String {
    delegate_subcommand(command).command_name()
}
