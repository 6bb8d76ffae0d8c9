//! # nimbus-cli: Nimbus ERP Command Line
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           nimbus (binary)                               │
//! │                                                                         │
//! │  main.rs ────► parse args, init tracing, run(), exit status             │
//! │                                                                         │
//! │  lib.rs ─────► config + database path + open database + dispatch        │
//! │                                                                         │
//! │  commands/ ──► dashboard · employees · products · invoices              │
//! │                                                                         │
//! │  render.rs ──► text tables / JSON                                       │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │                         SQLite Database                          │   │
//! │  │  nimbus.db (platform data dir, WAL mode, foreign keys on)        │   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use nimbus_db::{Database, DbConfig};

use crate::cli::Cli;
use crate::commands::Context;
use crate::config::AppConfig;

/// Sets up logging to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` selects debug output.
pub fn init_tracing(verbose: bool) {
    let default = if verbose {
        "info,nimbus=debug,sqlx=warn"
    } else {
        "warn,nimbus=info,sqlx=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Determines the database file path.
///
/// ## Priority
/// 1. `--db PATH`
/// 2. `NIMBUS_DB_PATH`
/// 3. Platform data directory:
///    - **macOS**: `~/Library/Application Support/com.nimbus.erp/nimbus.db`
///    - **Windows**: `%APPDATA%\nimbus\erp\data\nimbus.db`
///    - **Linux**: `~/.local/share/erp/nimbus.db`
pub fn get_database_path(cli_db: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf> {
    let path = match cli_db.or_else(|| config.db_path.clone()) {
        Some(path) => path,
        None => {
            let proj_dirs = ProjectDirs::from("com", "nimbus", "erp")
                .context("Could not determine app data directory")?;
            proj_dirs.data_dir().join("nimbus.db")
        }
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create directory {}", parent.display()))?;
    }

    Ok(path)
}

/// Runs the parsed command line and prints the result to stdout.
pub async fn run(cli: Cli) -> Result<()> {
    let config = AppConfig::from_env();
    debug!(?config, "Configuration loaded");

    let db_path = get_database_path(cli.db, &config)?;
    info!(path = %db_path.display(), "Opening database");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("Could not open database {}", db_path.display()))?;

    let ctx = Context::new(db, config, cli.format);
    let result = commands::execute(&ctx, cli.command).await;
    ctx.db.close().await;

    let output = result?;
    println!("{}", output);
    Ok(())
}
