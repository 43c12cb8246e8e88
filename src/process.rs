//! Child process seam.
//!
//! Everything the bridge launches goes through [`ProcessRunner`], which keeps the
//! preflight and invocation logic testable without a real runtime installed.

use std::ffi::OsString;
use std::io;
use std::process::{Command, ExitStatus, Stdio};

/// Exit status of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    pub code: i32,
}

impl ExitOutcome {
    pub fn new(code: i32) -> Self {
        Self { code }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

impl From<ExitStatus> for ExitOutcome {
    /// A child killed by a signal has no exit code; report it as `128 + signal` on Unix
    /// like a shell would, and as -1 elsewhere.
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::new(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::new(128 + signal);
            }
        }
        Self::new(-1)
    }
}

/// Launches child processes and blocks until they exit.
pub trait ProcessRunner {
    /// Run with all standard streams discarded. Used for capability probes whose
    /// output is irrelevant; only the exit status matters.
    fn probe(&self, program: &str, args: &[OsString]) -> io::Result<ExitOutcome>;

    /// Run with standard streams inherited from this process.
    fn run_inherited(&self, program: &str, args: &[OsString]) -> io::Result<ExitOutcome>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn probe(&self, program: &str, args: &[OsString]) -> io::Result<ExitOutcome> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()?;
        Ok(status.into())
    }

    fn run_inherited(&self, program: &str, args: &[OsString]) -> io::Result<ExitOutcome> {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        Ok(status.into())
    }
}
