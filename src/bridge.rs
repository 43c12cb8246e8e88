//! Delegate Invoker
//!
//! Owns one end-to-end delegate run: make sure the delegate is installed, probe the
//! runtime, build the command line, launch the delegate with inherited standard streams,
//! wait for it, and translate its exit status. Nothing is retried; every failure ends the
//! current invocation.

use crate::config::AccountConfig;
use crate::delegate::{ArgumentTail, DelegateDistribution, DelegateSubcommand, InvocationPlan};
use crate::environment::EnvironmentSnapshot;
use crate::error::{DelegateExecutionError, ImportError};
use crate::preflight::check_runtime_present;
use crate::process::ProcessRunner;
use crate::sysprops::build_properties;
use std::ffi::OsString;
use std::fmt;
use tracing::{debug, info, warn};

/// Everything one invocation reads, captured up front.
#[derive(Debug, Clone, Default)]
pub struct InvocationContext {
    pub account: AccountConfig,
    pub environment: EnvironmentSnapshot,
    /// Arguments following the command token, forwarded verbatim unless help is selected.
    pub args: Vec<OsString>,
}

/// Progress of an invocation, recorded in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStage {
    EnsuringDelegatePresent,
    PreflightChecking,
    BuildingArgs,
    Spawned,
    Completed,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvocationStage::EnsuringDelegatePresent => "ensuring_delegate_present",
            InvocationStage::PreflightChecking => "preflight_checking",
            InvocationStage::BuildingArgs => "building_args",
            InvocationStage::Spawned => "spawned",
            InvocationStage::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Launches the delegate for the `import:*` commands that need it.
pub struct ImportBridge<R, D> {
    runner: R,
    distribution: D,
    runtime: String,
}

impl<R, D> ImportBridge<R, D>
where
    R: ProcessRunner,
    D: DelegateDistribution,
{
    pub fn new(runner: R, distribution: D, runtime: impl Into<String>) -> Self {
        Self {
            runner,
            distribution,
            runtime: runtime.into(),
        }
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Build the command line without launching anything.
    pub fn plan(
        &self,
        subcommand: DelegateSubcommand,
        context: &InvocationContext,
    ) -> Result<InvocationPlan, ImportError> {
        let logging_config = self.distribution.logging_config_path();
        let properties = build_properties(
            &context.account,
            &context.environment,
            logging_config.as_deref(),
        )?;
        let classpath = self.distribution.jar_path()?;

        Ok(InvocationPlan::new(
            self.runtime.clone(),
            properties,
            classpath,
            subcommand,
            ArgumentTail::from_args(&context.args),
        ))
    }

    /// Run the delegate for `subcommand` and wait for it.
    ///
    /// Returns [`ImportError::Execution`] carrying the exit status when the delegate exits
    /// non-zero. A failed runtime probe returns [`ImportError::Preflight`] before anything
    /// else is launched.
    pub fn invoke(
        &self,
        subcommand: DelegateSubcommand,
        context: &InvocationContext,
    ) -> Result<(), ImportError> {
        let command = subcommand.command_name();

        debug!(
            command = %command,
            stage = %InvocationStage::EnsuringDelegatePresent,
            "Checking delegate installation"
        );
        self.distribution.ensure_current()?;

        debug!(command = %command, stage = %InvocationStage::PreflightChecking, "Checking runtime");
        check_runtime_present(&self.runner, &self.runtime)?;

        debug!(
            command = %command,
            stage = %InvocationStage::BuildingArgs,
            "Building delegate arguments"
        );
        let plan = self.plan(subcommand, context)?;
        let help = matches!(plan.tail(), ArgumentTail::Help);

        info!(
            command = %command,
            stage = %InvocationStage::Spawned,
            help,
            command_line = %plan,
            "Launching bulk import delegate"
        );
        let outcome = self
            .runner
            .run_inherited(plan.runtime(), &plan.arguments())
            .map_err(|source| ImportError::Spawn {
                program: plan.runtime().to_string(),
                source,
            })?;

        if outcome.success() {
            info!(command = %command, stage = %InvocationStage::Completed, "Delegate finished");
            Ok(())
        } else {
            warn!(
                command = %command,
                stage = %InvocationStage::Completed,
                status = outcome.code,
                "Delegate failed"
            );
            Err(DelegateExecutionError::new(outcome.code).into())
        }
    }
}
