//! Command implementations.

pub mod backup;
pub mod completions;
pub mod init;
pub mod profile;
pub mod record;
pub mod report;
pub mod settings;
pub mod version;

use crate::config::resolve_db_path;
use crate::error::{Error, Result};
use crate::storage::SqliteStorage;
use std::path::PathBuf;

/// Resolve and open an existing database.
fn open_storage(db_path: Option<&PathBuf>) -> Result<(PathBuf, SqliteStorage)> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or(Error::NotInitialized)?;

    if !db_path.exists() {
        return Err(Error::NotInitialized);
    }

    let storage = SqliteStorage::open(&db_path)?;
    Ok((db_path, storage))
}

/// Error for a type name that did not resolve.
fn unknown_name(what: &str, (input, suggestion): (String, Option<String>)) -> Error {
    match suggestion {
        Some(s) => Error::InvalidArgument(format!("unknown {what} '{input}', did you mean '{s}'?")),
        None => Error::InvalidArgument(format!("unknown {what} '{input}'")),
    }
}
