//! dbstatus CLI
//!
//! Reports whether the locally managed database instance is running and how
//! to reach it. A record left behind by a dead instance is removed as a side
//! effect.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dbstatus::{Config, FileStore, InstanceInfoStore};

mod commands;
mod display;

/// Exit code reported when the instance is not running (LSB `status` convention).
const EXIT_NOT_RUNNING: u8 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the instance record (overrides the configured location)
    #[arg(long, global = true)]
    info_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show whether the database instance is running
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,

        /// Include the recorded password in the output
        #[arg(long)]
        show_password: bool,
    },

    /// Print the location of the instance record
    Path,
}

/// Initializes structured logging with tracing.
///
/// Supports two output formats via `DBSTATUS_LOG_FORMAT` environment variable:
/// - `json`: Machine-readable JSON logs
/// - `pretty`: Human-readable formatted logs (default)
///
/// Log level is controlled via `RUST_LOG`. Logs go to stderr so they never
/// mix with `--json` output.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let format = std::env::var("DBSTATUS_LOG_FORMAT")
        .unwrap_or_else(|_| "pretty".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dbstatus=warn"));

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(false)
                .with_line_number(false)
                .init();
        }
    }
}

fn resolve_store(info_file: Option<PathBuf>) -> Result<FileStore> {
    if let Some(path) = info_file {
        return Ok(FileStore::new(path));
    }

    let config = Config::load().with_context(|| {
        format!(
            "Failed to load configuration from {:?}",
            Config::config_path()
        )
    })?;
    FileStore::from_config(&config).context("Failed to locate instance record")
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_tracing();

    let store = resolve_store(args.info_file)?;
    tracing::debug!(path = %store.path().display(), "Using instance record");

    match args.command {
        Command::Status {
            json,
            show_password,
        } => {
            if commands::status(store, json, show_password)? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::from(EXIT_NOT_RUNNING))
            }
        }
        Command::Path => {
            commands::path(&store);
            Ok(ExitCode::SUCCESS)
        }
    }
}
