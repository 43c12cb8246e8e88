//! Runtime preflight check: make sure the Java runtime can be launched before
//! building anything for the delegate.

use crate::error::{PreflightReason, RuntimePreflightFailure};
use crate::process::ProcessRunner;
use std::ffi::OsString;
use tracing::{debug, warn};

/// Flag that makes the runtime print its version and exit.
pub const VERSION_FLAG: &str = "-version";

/// Invoke `<runtime> -version` with output discarded and judge it by exit status alone.
pub fn check_runtime_present<R>(runner: &R, runtime: &str) -> Result<(), RuntimePreflightFailure>
where
    R: ProcessRunner + ?Sized,
{
    debug!(runtime, "Probing runtime");
    match runner.probe(runtime, &[OsString::from(VERSION_FLAG)]) {
        Ok(outcome) if outcome.success() => Ok(()),
        Ok(outcome) => {
            warn!(runtime, status = outcome.code, "Runtime probe failed");
            Err(RuntimePreflightFailure {
                reason: PreflightReason::ProbeFailed {
                    program: runtime.to_string(),
                    status: outcome.code,
                },
            })
        }
        Err(source) => {
            warn!(runtime, error = %source, "Runtime could not be launched");
            Err(RuntimePreflightFailure {
                reason: PreflightReason::NotInvocable {
                    program: runtime.to_string(),
                    source,
                },
            })
        }
    }
}
