//! td-import: Bulk Import Delegate Bridge
//!
//! Turns local td configuration and a command-line invocation into a launch of the Java
//! bulk import delegate, with endpoint/proxy resolution, a runtime preflight check, and
//! typed propagation of the delegate's exit status.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod delegate;
pub mod endpoint;
pub mod environment;
pub mod error;
pub mod logging;
pub mod preflight;
pub mod process;
pub mod sysprops;
