//! Delegate process: where its jar lives and how it is invoked.

mod distribution;
mod plan;

pub use distribution::{
    DelegateDistribution, LocalDistribution, JAR_FILE_NAME, LOGGING_PROPERTIES_FILE,
};
pub use plan::{
    is_help_mode, ArgumentTail, DelegateSubcommand, InvocationPlan, COMMAND_FAMILY_PREFIX,
    ENTRY_POINT, HELP_FLAG, RUNTIME_FLAGS,
};
