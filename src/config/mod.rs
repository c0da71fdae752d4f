//! Configuration management.
//!
//! This module provides functions for locating the babylog directories,
//! resolving the database and report paths, and loading settings.
//!
//! # Layout
//!
//! Everything lives under one global directory, `~/.babylog/`:
//! - **Database**: `~/.babylog/data/babylog.db`
//! - **Settings**: `settings.json` next to the database
//! - **Reports**: `~/.babylog/reports/`, one JSON file per saved import report

mod settings;

pub use settings::{
    bucket_minutes, load_settings, save_settings, DedupWindow, Settings, SettingsSource,
    DEDUP_ENV,
};

use std::path::{Path, PathBuf};

/// Environment variable naming the database file.
pub const DB_ENV: &str = "BABYLOG_DB";
/// Environment variable naming the report directory.
pub const REPORTS_ENV: &str = "BABYLOG_REPORTS";
/// Environment variable redirecting to the isolated test database.
pub const TEST_DB_ENV: &str = "BABYLOG_TEST_DB";

/// Get the global babylog directory location (`~/.babylog/`).
#[must_use]
pub fn global_babylog_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".babylog"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `BABYLOG_TEST_DB=1` (or any non-empty value
/// other than `0`/`false`).
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var(TEST_DB_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Get the test database path (`~/.babylog/test/babylog.db`).
#[must_use]
pub fn test_db_path() -> Option<PathBuf> {
    global_babylog_dir().map(|dir| dir.join("test").join("babylog.db"))
}

/// Resolve the database path.
///
/// Priority:
/// 1. If `explicit_path` is provided (`--db` or `BABYLOG_DB`), use it directly
/// 2. `BABYLOG_TEST_DB` environment variable → uses test database
/// 3. Global location: `~/.babylog/data/babylog.db`
#[must_use]
pub fn resolve_db_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    if is_test_mode() {
        return test_db_path();
    }

    global_babylog_dir().map(|dir| dir.join("data").join("babylog.db"))
}

/// Resolve the report directory.
///
/// An explicit path (`--reports-dir` or `BABYLOG_REPORTS`) wins; otherwise
/// reports live in `~/.babylog/reports/`.
#[must_use]
pub fn resolve_reports_dir(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }
    global_babylog_dir().map(|dir| dir.join("reports"))
}

/// Settings file belonging to a database.
#[must_use]
pub fn settings_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("settings.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_db_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/babylog.db");
        let result = resolve_db_path(Some(&explicit));
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_resolve_db_path_default_name() {
        let path = resolve_db_path(None).unwrap();
        assert!(path.ends_with("babylog.db"));
    }

    #[test]
    fn test_test_db_path_is_separate() {
        let global = global_babylog_dir().unwrap();
        let test = test_db_path().unwrap();

        assert!(test.to_string_lossy().contains("test"));
        assert_ne!(global.join("data").join("babylog.db"), test);
    }

    #[test]
    fn test_reports_dir() {
        let explicit = PathBuf::from("/tmp/r");
        assert_eq!(resolve_reports_dir(Some(&explicit)), Some(explicit));
        assert!(resolve_reports_dir(None).unwrap().ends_with("reports"));
    }

    #[test]
    fn test_settings_next_to_db() {
        assert_eq!(
            settings_path(Path::new("/data/babylog.db")),
            PathBuf::from("/data/settings.json")
        );
        assert_eq!(
            settings_path(Path::new("babylog.db")),
            PathBuf::from("settings.json")
        );
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(""));
        assert!(!is_truthy("0"));
        assert!(!is_truthy("FALSE"));
        assert!(is_truthy("1"));
        assert!(is_truthy("yes"));
    }
}
