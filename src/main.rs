//! planfix CLI entry point
//!
//! Parses arguments, dispatches to the CLI module and exits non-zero on
//! failure. Config and catalog loading happen inside the commands.

use planfix::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
