//! Create the local babylog database.
//!
//! The database lives at `~/.babylog/data/babylog.db` unless `--db` or
//! `BABYLOG_DB` points elsewhere; with `BABYLOG_TEST_DB=1` it goes to
//! `~/.babylog/test/babylog.db`. A default `settings.json` is written next
//! to it.

use crate::config::{resolve_db_path, save_settings, settings_path, Settings};
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    database: PathBuf,
    settings: PathBuf,
}

/// Execute the init command.
///
/// # Errors
///
/// Returns an error if the database already exists (without `--force`) or
/// cannot be created.
pub fn execute(db_path: Option<&PathBuf>, force: bool, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine the babylog data directory".to_string())
    })?;

    if db_path.exists() && !force {
        return Err(Error::AlreadyInitialized { path: db_path });
    }

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if force && db_path.exists() {
        fs::remove_file(&db_path)?;
    }

    // Opening applies the schema.
    SqliteStorage::open(&db_path)?;

    let settings = settings_path(&db_path);
    if !settings.exists() || force {
        save_settings(&settings, &Settings::default())?;
    }

    if json {
        let output = InitOutput {
            database: db_path,
            settings,
        };
        let payload = serde_json::to_string(&output)?;
        println!("{payload}");
    } else {
        println!("Initialized babylog database");
        println!("  Database: {}", db_path.display());
        println!("  Settings: {}", settings.display());
        println!();
        println!("Next: add a profile with 'babylog profile add <NAME> --birth-date YYYY-MM-DD'.");
    }

    Ok(())
}
