//! CLI command implementations
//!
//! Every command boots the same way: load the config file, apply its log
//! level, load the catalog. Commands then either run one parse/filter pass
//! and exit, or serve a JSON-lines session.

use std::path::Path;

use serde_json::json;

use crate::catalog::MemoryCatalog;
use crate::directive::parse;
use crate::observability::{log_event_with_fields, Event, Logger};
use crate::session::{Session, FORCED_INDEX_SETTING};

use super::args::Command;
use super::config::Config;
use super::errors::CliResult;
use super::handler::{describe_directives, handle_line, plan};
use super::io::{read_lines, write_json, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Check { config, value } => check(&config, value.as_deref()),
        Command::Filter {
            config,
            table,
            candidates,
            value,
            inh_parent,
        } => filter(&config, &table, &candidates, value.as_deref(), inh_parent),
        Command::Session { config } => session(&config),
    }
}

/// Loads the config file and the catalog it points to
pub fn boot(config_path: &Path) -> CliResult<(Config, MemoryCatalog)> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_level()?);
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", &config_path.display().to_string())],
    );

    let catalog_path = config.catalog_path_from(config_path);
    let catalog = MemoryCatalog::load(&catalog_path)?;
    log_event_with_fields(
        Event::CatalogLoaded,
        &[
            ("path", &catalog_path.display().to_string()),
            ("objects", &catalog.len().to_string()),
        ],
    );

    Ok((config, catalog))
}

/// Parse a forced_index value and print its directives
pub fn check(config_path: &Path, value: Option<&str>) -> CliResult<()> {
    let (config, catalog) = boot(config_path)?;
    let raw = value.unwrap_or(&config.forced_index);

    let directives = parse(raw, &catalog)?;

    write_response(json!({
        "setting": FORCED_INDEX_SETTING,
        "value": raw,
        "directives": describe_directives(&catalog, &directives),
    }))
}

/// Apply a forced_index value to one relation's candidates and print the result
pub fn filter(
    config_path: &Path,
    table: &str,
    candidates: &[String],
    value: Option<&str>,
    inh_parent: bool,
) -> CliResult<()> {
    let (config, catalog) = boot(config_path)?;
    let mut session = Session::new(catalog);
    session.set_forced_index(value.unwrap_or(&config.forced_index))?;

    write_response(plan(&session, table, candidates, inh_parent)?)
}

/// Serve a JSON-lines session on stdin/stdout
///
/// The configured forced_index is applied first; a bad value fails the boot.
pub fn session(config_path: &Path) -> CliResult<()> {
    let (config, catalog) = boot(config_path)?;
    let mut session = Session::new(catalog);
    session.set_forced_index(&config.forced_index)?;

    for line in read_lines() {
        let line = line?;
        let response = handle_line(&mut session, &line);
        write_json(&response)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const CATALOG: &str = r#"{
        "database": "shop",
        "objects": [
            { "oid": 100, "name": "orders", "kind": "table" },
            { "oid": 101, "name": "idx_orders_gin", "kind": "index", "table": "orders" },
            { "oid": 102, "name": "idx_orders_btree", "kind": "index", "table": "orders" }
        ]
    }"#;

    fn create_config(temp_dir: &TempDir, forced_index: &str) -> PathBuf {
        fs::write(temp_dir.path().join("catalog.json"), CATALOG).unwrap();
        let config_path = temp_dir.path().join("planfix.json");
        let config = json!({
            "catalog_path": "catalog.json",
            "forced_index": forced_index,
            "log_level": "error",
        });
        fs::write(&config_path, config.to_string()).unwrap();
        config_path
    }

    #[test]
    fn test_boot_loads_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, "");
        let (config, catalog) = boot(&config_path).unwrap();
        assert_eq!(config.forced_index, "");
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_boot_missing_catalog() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("planfix.json");
        fs::write(&config_path, r#"{"catalog_path": "missing.json"}"#).unwrap();
        let err = boot(&config_path).unwrap_err();
        assert_eq!(err.code_str(), "PLANFIX_CLI_CATALOG_ERROR");
    }

    #[test]
    fn test_check_accepts_configured_value() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, "orders,idx_orders_gin");
        assert!(check(&config_path, None).is_ok());
    }

    #[test]
    fn test_check_rejects_bad_value() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, "");
        let err = check(&config_path, Some("nonexistent_table,idx1")).unwrap_err();
        assert_eq!(err.code_str(), "PLANFIX_UNRESOLVED_NAME");
    }

    #[test]
    fn test_filter_with_override_value() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = create_config(&temp_dir, "");
        let candidates = vec!["idx_orders_gin".to_string(), "idx_orders_btree".to_string()];
        assert!(filter(
            &config_path,
            "orders",
            &candidates,
            Some("orders,idx_orders_gin"),
            false
        )
        .is_ok());
    }
}
