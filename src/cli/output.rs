//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::{ImportError, RuntimePreflightFailure};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Write};

/// Map domain/service errors to a string for CLI output.
pub fn map_error(e: &ImportError) -> String {
    match e {
        ImportError::Preflight(failure) => failure.guidance().join("\n"),
        other => format!("error: {}", other),
    }
}

/// Write the missing-runtime guidance to stderr, highlighted when stderr is a terminal.
pub fn print_preflight_guidance(failure: &RuntimePreflightFailure) {
    let mut stderr = std::io::stderr().lock();
    let colored = std::io::stderr().is_terminal();
    for (i, line) in failure.guidance().into_iter().enumerate() {
        let result = if i == 0 && colored {
            writeln!(stderr, "{}", line.red().bold())
        } else {
            writeln!(stderr, "{}", line)
        };
        if result.is_err() {
            break;
        }
    }
}
