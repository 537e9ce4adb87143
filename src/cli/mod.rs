//! CLI module for planfix
//!
//! Provides command-line interface for:
//! - check: Parse a forced_index value and print its directives
//! - filter: Apply directives to one relation's candidate indexes
//! - session: JSON-lines session with set/show/reset/check/plan/metrics

mod args;
mod commands;
mod config;
mod errors;
mod handler;
mod io;

pub use args::{Cli, Command};
pub use commands::{boot, check, filter, run, run_command, session};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use handler::{handle, handle_line, SessionRequest};
pub use io::{write_error, write_response};
