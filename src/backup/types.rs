//! Backup error, strategy and report types.
//!
//! The report structs are what an import returns and what the report store
//! persists, so they round-trip through serde in camelCase.

use serde::{Deserialize, Serialize};

/// The three domain failures an import can surface before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportErrorKind {
    /// Malformed text, or records referencing a profile missing from the envelope.
    InvalidJson,
    /// The envelope was written by a newer format than this build reads.
    UnsupportedVersion,
    /// Structurally valid but every collection is empty.
    EmptyData,
}

/// Backup-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    /// Malformed or referentially invalid envelope.
    #[error("Invalid backup: {reason}")]
    InvalidJson {
        /// What was wrong with it.
        reason: String,
    },

    /// Envelope version newer than supported.
    #[error("Unsupported backup version {found} (this build reads up to {supported})")]
    UnsupportedVersion {
        /// Version found in the envelope.
        found: i32,
        /// Highest version this build understands.
        supported: i32,
    },

    /// Nothing to import.
    #[error("Backup contains no data")]
    EmptyData,

    /// No saved report under this handle.
    #[error("Report not found: {id}")]
    ReportNotFound {
        /// The requested report handle.
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error during report persistence.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BackupError {
    /// Build an `InvalidJson` error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidJson {
            reason: reason.into(),
        }
    }

    /// The domain kind, or `None` for storage/IO failures.
    #[must_use]
    pub const fn kind(&self) -> Option<ImportErrorKind> {
        match self {
            Self::InvalidJson { .. } => Some(ImportErrorKind::InvalidJson),
            Self::UnsupportedVersion { .. } => Some(ImportErrorKind::UnsupportedVersion),
            Self::EmptyData => Some(ImportErrorKind::EmptyData),
            Self::ReportNotFound { .. } | Self::Database(_) | Self::Io(_) | Self::Json(_) => None,
        }
    }
}

/// Result type for backup operations.
pub type BackupResult<T> = std::result::Result<T, BackupError>;

/// Which import strategy produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportMode {
    /// Destructive full replacement.
    Overwrite,
    /// Incremental deduplicating merge.
    Merge,
}

impl std::fmt::Display for ImportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Merge => write!(f, "merge"),
        }
    }
}

impl std::str::FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "merge" => Ok(Self::Merge),
            _ => Err(format!("Unknown import mode: {s}")),
        }
    }
}

/// Profile counters for one import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProfileStats {
    /// Profiles created locally.
    pub inserted: usize,
    /// Profiles resolved to an existing local profile.
    pub matched: usize,
    /// Identity keys that appeared more than once in the envelope.
    pub duplicate_in_backup: usize,
}

/// Counters for feeding, sleep and event records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecordStats {
    /// Records written.
    pub inserted: usize,
    /// Records already present (by dedup key).
    pub skipped: usize,
}

/// Counters for daily snapshots, where a same-date record replaces the old one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyStats {
    /// New snapshots.
    pub inserted: usize,
    /// Existing snapshots overwritten.
    pub updated: usize,
}

/// Auditable summary of one import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    /// Strategy that ran.
    pub strategy: ImportMode,
    /// When the import committed (Unix milliseconds).
    #[serde(default)]
    pub imported_at: i64,
    /// Dedup bucket used (always 0 for overwrite).
    #[serde(default)]
    pub bucket_minutes: u32,
    #[serde(default)]
    pub profiles: ProfileStats,
    #[serde(default)]
    pub feedings: RecordStats,
    #[serde(default)]
    pub sleeps: RecordStats,
    #[serde(default)]
    pub events: RecordStats,
    #[serde(default)]
    pub dailies: DailyStats,
}

impl ImportReport {
    /// An all-zero report for `strategy`.
    #[must_use]
    pub fn new(strategy: ImportMode, bucket_minutes: u32) -> Self {
        Self {
            strategy,
            imported_at: 0,
            bucket_minutes,
            profiles: ProfileStats::default(),
            feedings: RecordStats::default(),
            sleeps: RecordStats::default(),
            events: RecordStats::default(),
            dailies: DailyStats::default(),
        }
    }

    /// Rows written, counting profiles and daily inserts but not daily updates.
    #[must_use]
    pub fn total_inserted(&self) -> usize {
        self.profiles.inserted
            + self.feedings.inserted
            + self.sleeps.inserted
            + self.events.inserted
            + self.dailies.inserted
    }

    /// Child records recognised as already present.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.feedings.skipped + self.sleeps.skipped + self.events.skipped
    }
}
