//! CLI parse: clap types for td-import. No behavior; definitions only.

use clap::{Args, Parser, Subcommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// td-import - launch the bulk import delegate with your td configuration
#[derive(Parser)]
#[command(name = "td-import")]
#[command(about = "Run the Java bulk import commands (prepare, upload, auto)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides the global config file)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API endpoint, as a URL or host[:port]
    #[arg(short = 'e', long)]
    pub endpoint: Option<String>,

    /// API key
    #[arg(short = 'k', long)]
    pub apikey: Option<String>,

    /// Use http instead of https for an endpoint given without a scheme
    #[arg(long)]
    pub insecure: bool,

    /// Enable verbose logging (default: off)
    #[arg(long)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stderr, stdout, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert files into the upload format
    #[command(name = "import:prepare", disable_help_flag = true)]
    Prepare(PassthroughArgs),

    /// Upload prepared files into a bulk import session
    #[command(name = "import:upload", disable_help_flag = true)]
    Upload(PassthroughArgs),

    /// Prepare, upload, perform and commit in one step
    #[command(name = "import:auto", disable_help_flag = true)]
    Auto(PassthroughArgs),
}

/// Arguments handed to the delegate untouched.
#[derive(Args, Debug, Clone, Default)]
pub struct PassthroughArgs {
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..,
        value_parser = clap::value_parser!(OsString)
    )]
    pub args: Vec<OsString>,
}
