//! Invocation plan: the exact command line the delegate is launched with.
//!
//! `<runtime> -Xmx1024m [-Dkey=value ...] -cp <jar> <entry point> <subcommand> [--help | args...]`

use crate::sysprops::SystemPropertySet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// Fixed runtime flags placed before the system properties.
pub const RUNTIME_FLAGS: &[&str] = &["-Xmx1024m"];

/// Fully qualified delegate entry point.
pub const ENTRY_POINT: &str = "com.treasure_data.td_import.BulkImportCommand";

pub const HELP_FLAG: &str = "--help";

/// Prefix shared by every command of the import family (`import:prepare`, ...).
pub const COMMAND_FAMILY_PREFIX: &str = "import:";

/// Subcommands forwarded to the delegate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateSubcommand {
    Prepare,
    Upload,
    Auto,
}

impl DelegateSubcommand {
    pub const ALL: [DelegateSubcommand; 3] = [
        DelegateSubcommand::Prepare,
        DelegateSubcommand::Upload,
        DelegateSubcommand::Auto,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DelegateSubcommand::Prepare => "prepare",
            DelegateSubcommand::Upload => "upload",
            DelegateSubcommand::Auto => "auto",
        }
    }

    /// Name of the user-facing command, e.g. `import:prepare`.
    pub fn command_name(self) -> String {
        format!("{}{}", COMMAND_FAMILY_PREFIX, self.as_str())
    }
}

impl fmt::Display for DelegateSubcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the delegate should print its help instead of doing work.
///
/// True when no arguments were given, when only one was given, or when the first one is
/// itself an `import:` command token.
pub fn is_help_mode<S: AsRef<OsStr>>(args: &[S]) -> bool {
    match args {
        [] | [_] => true,
        [first, ..] => first
            .as_ref()
            .to_string_lossy()
            .starts_with(COMMAND_FAMILY_PREFIX),
    }
}

/// What follows the subcommand: the help flag or the user's arguments, never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentTail {
    Help,
    Passthrough(Vec<OsString>),
}

impl ArgumentTail {
    pub fn from_args<S: AsRef<OsStr>>(args: &[S]) -> Self {
        if is_help_mode(args) {
            ArgumentTail::Help
        } else {
            ArgumentTail::Passthrough(args.iter().map(|a| a.as_ref().to_os_string()).collect())
        }
    }
}

/// Immutable description of one delegate launch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    runtime: String,
    properties: SystemPropertySet,
    classpath: PathBuf,
    subcommand: DelegateSubcommand,
    tail: ArgumentTail,
}

impl InvocationPlan {
    pub fn new(
        runtime: impl Into<String>,
        properties: SystemPropertySet,
        classpath: PathBuf,
        subcommand: DelegateSubcommand,
        tail: ArgumentTail,
    ) -> Self {
        Self {
            runtime: runtime.into(),
            properties,
            classpath,
            subcommand,
            tail,
        }
    }

    /// Program to execute.
    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn classpath(&self) -> &Path {
        &self.classpath
    }

    pub fn tail(&self) -> &ArgumentTail {
        &self.tail
    }

    /// Arguments following the program name, in launch order.
    pub fn arguments(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = RUNTIME_FLAGS.iter().map(OsString::from).collect();
        args.extend(self.properties.to_defines().into_iter().map(OsString::from));
        args.push(OsString::from("-cp"));
        args.push(self.classpath.clone().into_os_string());
        args.push(OsString::from(ENTRY_POINT));
        args.push(OsString::from(self.subcommand.as_str()));
        match self.tail {
            ArgumentTail::Help => args.push(OsString::from(HELP_FLAG)),
            ArgumentTail::Passthrough(ref rest) => args.extend(rest.iter().cloned()),
        }
        args
    }
}

impl fmt::Display for InvocationPlan {
    /// Loggable command line with the API key redacted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.runtime)?;
        for flag in RUNTIME_FLAGS {
            write!(f, " {}", flag)?;
        }
        for property in self.properties.iter() {
            write!(f, " -D{}", property)?;
        }
        write!(
            f,
            " -cp {} {} {}",
            self.classpath.display(),
            ENTRY_POINT,
            self.subcommand
        )?;
        match self.tail {
            ArgumentTail::Help => write!(f, " {}", HELP_FLAG),
            ArgumentTail::Passthrough(ref rest) => {
                for arg in rest {
                    write!(f, " {}", arg.to_string_lossy())?;
                }
                Ok(())
            }
        }
    }
}
