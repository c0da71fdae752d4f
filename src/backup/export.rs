//! Snapshot export.
//!
//! The exporter reads every profile and its four child collections inside
//! one read transaction and hands back the envelope as text. Writing the
//! text anywhere is the caller's business.

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use tracing::debug;

use crate::backup::envelope::{Envelope, EnvelopeCounts, EnvelopeData, SUPPORTED_VERSION};
use crate::backup::parse::check_references;
use crate::backup::types::{BackupError, BackupResult};
use crate::storage::records;
use crate::storage::sqlite::SqliteStorage;

/// Serialized snapshot ready to be written by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct ExportPayload {
    /// Suggested file name, `babylog_backup_<yyyyMMdd_HHmm>.json`.
    pub file_name: String,
    /// Pretty-printed envelope.
    pub json: String,
    pub counts: EnvelopeCounts,
}

/// Builds envelopes from a store.
pub struct Exporter<'a> {
    storage: &'a SqliteStorage,
    app_version: Option<String>,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(storage: &'a SqliteStorage) -> Self {
        Self {
            storage,
            app_version: None,
        }
    }

    /// Stamp exported envelopes with the producing application's version.
    #[must_use]
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Read the whole store into an envelope.
    ///
    /// # Errors
    ///
    /// Returns the store-read error unchanged.
    pub fn build_envelope(&self) -> BackupResult<Envelope> {
        let data = self.storage.read(|conn| {
            let mut data = EnvelopeData {
                babies: records::list_profiles(conn)?,
                ..EnvelopeData::default()
            };
            for profile in &data.babies {
                data.feeding_records
                    .extend(records::list_feedings(conn, profile.id)?);
                data.sleep_records
                    .extend(records::list_sleeps(conn, profile.id)?);
                data.event_records
                    .extend(records::list_events(conn, profile.id)?);
                data.child_daily_records
                    .extend(records::list_dailies(conn, profile.id)?);
            }
            Ok::<_, BackupError>(data)
        })?;

        check_references(&data)?;
        debug!(profiles = data.babies.len(), "Built export envelope");

        Ok(Envelope {
            version: SUPPORTED_VERSION,
            created_at: Utc::now().timestamp_millis(),
            app_version: self.app_version.clone(),
            data,
        })
    }

    /// Serialize an envelope as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(envelope: &Envelope) -> BackupResult<String> {
        Ok(serde_json::to_string_pretty(envelope)?)
    }

    /// Build, serialize and name a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if reading the store or serializing fails.
    pub fn export(&self) -> BackupResult<ExportPayload> {
        let envelope = self.build_envelope()?;
        let json = Self::to_json(&envelope)?;
        Ok(ExportPayload {
            file_name: backup_file_name(Local::now()),
            json,
            counts: envelope.data.counts(),
        })
    }
}

/// Default file name for a snapshot taken at `at`.
#[must_use]
pub fn backup_file_name<Tz: chrono::TimeZone>(at: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("babylog_backup_{}.json", at.format("%Y%m%d_%H%M"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::parse::parse_envelope;
    use crate::model::{FeedingRecord, Profile};
    use chrono::TimeZone;

    #[test]
    fn test_export_empty_store() {
        let storage = SqliteStorage::open_memory().unwrap();
        let envelope = Exporter::new(&storage).build_envelope().unwrap();
        assert_eq!(envelope.version, SUPPORTED_VERSION);
        assert!(envelope.data.is_empty());
        assert!(envelope.app_version.is_none());
    }

    #[test]
    fn test_export_payload_parses_back() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let pid = storage.add_profile(&Profile::new("Alice", "girl", 1)).unwrap();
        storage
            .add_feeding(&FeedingRecord {
                profile_id: pid,
                feeding_type: 2,
                feeding_start: 1_000,
                ..FeedingRecord::default()
            })
            .unwrap();

        let payload = Exporter::new(&storage)
            .with_app_version("9.9.9")
            .export()
            .unwrap();
        assert!(payload.file_name.starts_with("babylog_backup_"));
        assert!(payload.file_name.ends_with(".json"));
        assert_eq!(payload.counts.feedings, 1);

        let envelope = parse_envelope(&payload.json).unwrap();
        assert_eq!(envelope.app_version.as_deref(), Some("9.9.9"));
        assert_eq!(envelope.data.feeding_records[0].profile_id, pid);
        assert_eq!(envelope.data.babies[0].id, pid);
    }

    #[test]
    fn test_backup_file_name_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 42).unwrap();
        assert_eq!(backup_file_name(at), "babylog_backup_20240307_0905.json");
    }
}
