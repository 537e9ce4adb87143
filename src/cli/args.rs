//! CLI argument definitions using clap
//!
//! Commands:
//! - planfix check --config <path> [--value <s>]
//! - planfix filter --config <path> --table <name> --candidates <a,b,...> [--value <s>]
//! - planfix session --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// planfix - session-scoped index whitelists for the query planner
#[derive(Parser, Debug)]
#[command(name = "planfix")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a forced_index value and print the resulting directives
    Check {
        /// Path to configuration file
        #[arg(long, default_value = "./planfix.json")]
        config: PathBuf,

        /// Value to parse instead of the configured forced_index
        #[arg(long)]
        value: Option<String>,
    },

    /// Show which candidate indexes survive for one relation
    Filter {
        /// Path to configuration file
        #[arg(long, default_value = "./planfix.json")]
        config: PathBuf,

        /// Relation being planned
        #[arg(long)]
        table: String,

        /// Candidate index names, comma separated
        #[arg(long, value_delimiter = ',')]
        candidates: Vec<String>,

        /// forced_index value to apply instead of the configured one
        #[arg(long)]
        value: Option<String>,

        /// Treat the relation as an inheritance parent
        #[arg(long)]
        inh_parent: bool,
    },

    /// Run a JSON-lines session on stdin/stdout
    Session {
        /// Path to configuration file
        #[arg(long, default_value = "./planfix.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
