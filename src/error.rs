//! Error types for babylog.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=db, 3=not_found, 4=validation, 6=backup, ...)
//! - Retryability flags
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

use crate::backup::{BackupError, ImportErrorKind};

/// Result type alias for babylog operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Database (exit 2)
    NotInitialized,
    AlreadyInitialized,
    DatabaseError,

    // Not Found (exit 3)
    ProfileNotFound,
    ReportNotFound,

    // Validation (exit 4)
    InvalidArgument,

    // Backup (exit 6)
    InvalidBackup,
    UnsupportedVersion,
    EmptyBackup,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::ReportNotFound => "REPORT_NOT_FOUND",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidBackup => "INVALID_BACKUP",
            Self::UnsupportedVersion => "UNSUPPORTED_VERSION",
            Self::EmptyBackup => "EMPTY_BACKUP",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotInitialized | Self::AlreadyInitialized | Self::DatabaseError => 2,
            Self::ProfileNotFound | Self::ReportNotFound => 3,
            Self::InvalidArgument => 4,
            Self::InvalidBackup | Self::UnsupportedVersion | Self::EmptyBackup => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether retrying with corrected input can succeed.
    ///
    /// Backup errors are not retryable: the same file will fail the same way.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::InvalidArgument | Self::DatabaseError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in babylog operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `babylog init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Profile not found: {id}")]
    ProfileNotFound { id: i64 },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Backup(#[from] BackupError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::ProfileNotFound { .. } => ErrorCode::ProfileNotFound,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
            Self::Backup(e) => match e.kind() {
                Some(ImportErrorKind::InvalidJson) => ErrorCode::InvalidBackup,
                Some(ImportErrorKind::UnsupportedVersion) => ErrorCode::UnsupportedVersion,
                Some(ImportErrorKind::EmptyData) => ErrorCode::EmptyBackup,
                None => match e {
                    BackupError::ReportNotFound { .. } => ErrorCode::ReportNotFound,
                    BackupError::Database(_) => ErrorCode::DatabaseError,
                    BackupError::Io(_) => ErrorCode::IoError,
                    _ => ErrorCode::JsonError,
                },
            },
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => {
                Some("Run `babylog init` to create the local database".to_string())
            }

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),

            Self::ProfileNotFound { id } => Some(format!(
                "No profile with id {id}. Use `babylog profile list` to see available profiles."
            )),

            Self::Backup(e) => match e {
                BackupError::InvalidJson { .. } => Some(
                    "The file is not a babylog backup, or its records reference missing profiles."
                        .to_string(),
                ),
                BackupError::UnsupportedVersion { .. } => {
                    Some("Upgrade babylog to read backups from newer versions.".to_string())
                }
                BackupError::EmptyData => Some("The backup contains no profiles or records.".to_string()),
                BackupError::ReportNotFound { .. } => {
                    Some("Use `babylog report list` to see saved reports.".to_string())
                }
                _ => None,
            },

            Self::InvalidArgument(msg) => {
                if msg.contains("dedup") || msg.contains("bucket") {
                    Some("Valid dedup windows (minutes): 0, 1, 5, 10".to_string())
                } else if msg.contains("time") {
                    Some(
                        "Times accept Unix milliseconds, RFC 3339, or local `YYYY-MM-DD HH:MM`"
                            .to_string(),
                    )
                } else {
                    None
                }
            }

            Self::Database(_) | Self::Io(_) | Self::Json(_) | Self::Config(_) | Self::Other(_) => {
                None
            }
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backup_errors_map_to_backup_category() {
        let invalid = Error::from(BackupError::InvalidJson {
            reason: "bad".into(),
        });
        assert_eq!(invalid.error_code(), ErrorCode::InvalidBackup);
        assert_eq!(invalid.exit_code(), 6);

        let version = Error::from(BackupError::UnsupportedVersion {
            found: 9,
            supported: 1,
        });
        assert_eq!(version.error_code(), ErrorCode::UnsupportedVersion);

        let empty = Error::from(BackupError::EmptyData);
        assert_eq!(empty.error_code(), ErrorCode::EmptyBackup);
        assert!(!empty.error_code().is_retryable());
    }

    #[test]
    fn test_report_not_found_is_not_found_category() {
        let err = Error::from(BackupError::ReportNotFound { id: "x".into() });
        assert_eq!(err.exit_code(), 3);
        assert!(err.hint().is_some());
    }

    #[test]
    fn test_structured_json() {
        let err = Error::ProfileNotFound { id: 7 };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "PROFILE_NOT_FOUND");
        assert_eq!(json["error"]["exit_code"], 3);
        assert!(json["error"]["hint"].as_str().unwrap().contains("profile list"));
    }
}
