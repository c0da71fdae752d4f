//! Persistence of import reports.
//!
//! Reports are audit records: each import can save its summary, and the
//! saved set can be listed, reloaded, exported or pruned later. The
//! [`ReportStore`] trait is what import callers depend on;
//! [`FsReportStore`] keeps one JSON file per report in a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::debug;

use crate::backup::file::atomic_write;
use crate::backup::types::{BackupError, BackupResult, ImportReport};

/// A saved report without its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMeta {
    /// Handle accepted by `load`/`delete`.
    pub id: String,
    pub file_name: String,
    /// Unix milliseconds.
    pub saved_at: i64,
}

/// Store of import reports.
pub trait ReportStore {
    /// Persist a report and return its metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be written.
    fn save(&self, report: &ImportReport) -> BackupResult<ReportMeta>;

    /// Saved reports, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> BackupResult<Vec<ReportMeta>>;

    /// Load one report.
    ///
    /// # Errors
    ///
    /// `ReportNotFound` for an unknown handle, `InvalidJson` for a corrupt one.
    fn load(&self, id: &str) -> BackupResult<ImportReport>;

    /// Delete one report.
    ///
    /// # Errors
    ///
    /// `ReportNotFound` for an unknown handle.
    fn delete(&self, id: &str) -> BackupResult<()>;

    /// Delete every report and return how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be removed.
    fn clear_all(&self) -> BackupResult<usize>;
}

/// Directory-backed report store.
#[derive(Debug, Clone)]
pub struct FsReportStore {
    dir: PathBuf,
}

impl FsReportStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Raw JSON text of a saved report, for sharing outside the tool.
    ///
    /// # Errors
    ///
    /// `ReportNotFound` for an unknown handle.
    pub fn export_raw(&self, id: &str) -> BackupResult<String> {
        let path = self.path_for(id)?;
        fs::read_to_string(&path).map_err(|e| not_found_or(e, id))
    }

    fn path_for(&self, id: &str) -> BackupResult<PathBuf> {
        // Handles are bare file stems; anything path-like is unknown.
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            return Err(BackupError::ReportNotFound { id: id.to_string() });
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    fn entries(&self) -> BackupResult<Vec<fs::DirEntry>> {
        let read = match fs::read_dir(&self.dir) {
            Ok(read) => read,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut entries = Vec::new();
        for entry in read {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                entries.push(entry);
            }
        }
        Ok(entries)
    }
}

impl ReportStore for FsReportStore {
    fn save(&self, report: &ImportReport) -> BackupResult<ReportMeta> {
        let now = Local::now();
        let short = uuid::Uuid::new_v4().simple().to_string();
        let id = format!("import_report_{}_{}", now.format("%Y%m%d_%H%M%S"), &short[..8]);
        let file_name = format!("{id}.json");

        let json = serde_json::to_string_pretty(report)?;
        atomic_write(&self.dir.join(&file_name), &json)?;
        debug!(id = %id, "Saved import report");

        Ok(ReportMeta {
            id,
            file_name,
            saved_at: now.timestamp_millis(),
        })
    }

    fn list(&self) -> BackupResult<Vec<ReportMeta>> {
        let mut metas = Vec::new();
        for entry in self.entries()? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let saved_at = entry
                .metadata()?
                .modified()
                .map(|t| DateTime::<Utc>::from(t).timestamp_millis())
                .unwrap_or(0);
            metas.push(ReportMeta {
                id: id.to_string(),
                file_name: format!("{id}.json"),
                saved_at,
            });
        }

        metas.sort_by(|a, b| {
            b.saved_at
                .cmp(&a.saved_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(metas)
    }

    fn load(&self, id: &str) -> BackupResult<ImportReport> {
        let path = self.path_for(id)?;
        let text = fs::read_to_string(&path).map_err(|e| not_found_or(e, id))?;
        serde_json::from_str(&text)
            .map_err(|e| BackupError::invalid(format!("report {id}: {e}")))
    }

    fn delete(&self, id: &str) -> BackupResult<()> {
        let path = self.path_for(id)?;
        fs::remove_file(&path).map_err(|e| not_found_or(e, id))?;
        debug!(id, "Deleted import report");
        Ok(())
    }

    fn clear_all(&self) -> BackupResult<usize> {
        let mut removed = 0;
        for entry in self.entries()? {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
        debug!(removed, "Cleared import reports");
        Ok(removed)
    }
}

fn not_found_or(e: std::io::Error, id: &str) -> BackupError {
    if e.kind() == ErrorKind::NotFound {
        BackupError::ReportNotFound { id: id.to_string() }
    } else {
        e.into()
    }
}
