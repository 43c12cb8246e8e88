//! CLI domain: parse, route, help, and output only.
//! No delegate logic lives here; the route table hands off to the bridge.

mod help;
mod output;
mod parse;
mod route;

pub use help::{command_name, delegate_subcommand};
pub use output::{map_error, print_preflight_guidance};
pub use parse::{Cli, Commands, PassthroughArgs};
pub use route::RunContext;
