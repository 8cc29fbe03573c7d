//! Job portal CLI
//!
//! Administrative entry point: creates the schema, verifies an existing
//! database against it, or prints the DDL.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, Database, init_tracing, persistence::schema};
use tracing::info;

/// Job portal CLI
#[derive(Parser)]
#[command(name = "jobportal-cli")]
#[command(author, version, about = "Job portal database administration", long_about = None)]
struct Cli {
    /// Verbosity level (overrides the configured log level)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./jobportal.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database URL, e.g. sqlite://data/job_portal.db
    #[arg(long, env = "JOBPORTAL_DATABASE_URL", global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create any missing tables
    ///
    /// Safe to run repeatedly; existing tables and rows are left untouched.
    Init,

    /// Check an existing database against the declared schema
    ///
    /// Exits non-zero when a table is missing or incompatible.
    Verify,

    /// Print the declared DDL without touching a database
    Tables,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::load_from(cli.config.as_deref())?;
    if let Some(url) = &cli.database_url {
        config.database.url.clone_from(url);
    }
    if let Some(level) = log_filter_from_verbosity(cli.verbose) {
        config.logging.level = level.to_string();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if matches!(cli.command, Commands::Tables) {
        for table in schema() {
            println!("{};\n", table.create_sql());
        }
        return Ok(());
    }

    let mut config = load_config(&cli)?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Init => {
            config.database.initialize_schema = true;
            let db = Database::connect(&config.database)?;
            let report = db.verify_schema()?;

            info!(location = %db.location(), "Schema ready");
            println!("✅ Schema ready at {}", db.location());
            for table in &report.present {
                println!("   {table}");
            }
        },
        Commands::Verify => {
            let db = Database::open_existing(&config.database)?;
            let report = db.verify_schema()?;

            println!("📋 Schema check for {}", db.location());
            for table in &report.present {
                println!("   ✅ {table}");
            }
            for table in &report.missing {
                println!("   ❌ {table} (missing)");
            }

            if !report.is_complete() {
                println!("\n{} table(s) missing; run `jobportal-cli init`", report.missing.len());
                std::process::exit(1);
            }
        },
        Commands::Tables => {},
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(7), Some("trace"));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn database_url_flag_overrides_config() {
        let cli = Cli::parse_from([
            "jobportal-cli",
            "--database-url",
            "sqlite::memory:",
            "-vv",
            "verify",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.logging.level, "debug");
    }
}
