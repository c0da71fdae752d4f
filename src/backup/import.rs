//! Backup import strategies.
//!
//! Both strategies validate the envelope first and then run their whole body
//! in one IMMEDIATE transaction. Any failure rolls everything back, so the
//! store either holds the complete result or is exactly as it was.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::backup::dedup::{Bucketing, DedupIndex};
use crate::backup::envelope::Envelope;
use crate::backup::identity::{IdentityPlan, ProfileMap};
use crate::backup::parse::validate;
use crate::backup::types::{BackupError, BackupResult, ImportMode, ImportReport};
use crate::model::{DailyRecord, EventRecord, FeedingRecord, SleepRecord};
use crate::storage::records;
use crate::storage::sqlite::SqliteStorage;

/// Applies an envelope to a store.
///
/// Holding `&mut SqliteStorage` for the importer's lifetime means nothing
/// else in this process can write or export through the same handle while
/// an import runs.
pub struct Importer<'a> {
    storage: &'a mut SqliteStorage,
}

impl<'a> Importer<'a> {
    #[must_use]
    pub fn new(storage: &'a mut SqliteStorage) -> Self {
        Self { storage }
    }

    /// Run `mode` against the store.
    ///
    /// # Errors
    ///
    /// See [`Self::overwrite`] and [`Self::merge`].
    pub fn import(
        &mut self,
        envelope: &Envelope,
        mode: ImportMode,
        bucket_minutes: u32,
    ) -> BackupResult<ImportReport> {
        match mode {
            ImportMode::Overwrite => self.overwrite(envelope),
            ImportMode::Merge => self.merge(envelope, bucket_minutes),
        }
    }

    /// Replace every local profile and record with the envelope's content.
    ///
    /// Profiles get fresh local ids; child records are rewritten through the
    /// resulting id map. Daily snapshots sharing a profile and date collapse
    /// to the last one, counted as `updated`.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, or the
    /// database error that aborted the transaction.
    pub fn overwrite(&mut self, envelope: &Envelope) -> BackupResult<ImportReport> {
        validate(envelope)?;
        let data = &envelope.data;

        let mut report = self.storage.mutate("import_overwrite", |tx| {
            let removed = records::delete_all(tx)?;
            debug!(removed, "Cleared local data");

            let mut report = ImportReport::new(ImportMode::Overwrite, 0);
            let mut ids = ProfileMap::default();
            for profile in &data.babies {
                let local = records::insert_profile(tx, profile)?;
                ids.insert(profile.id, local);
                report.profiles.inserted += 1;
            }

            for record in &data.feeding_records {
                let profile_id = require(&ids, "feeding", record.profile_id)?;
                records::insert_feeding(
                    tx,
                    &FeedingRecord {
                        profile_id,
                        ..record.clone()
                    },
                )?;
                report.feedings.inserted += 1;
            }

            for record in &data.sleep_records {
                let profile_id = require(&ids, "sleep", record.profile_id)?;
                records::insert_sleep(
                    tx,
                    &SleepRecord {
                        profile_id,
                        ..record.clone()
                    },
                )?;
                report.sleeps.inserted += 1;
            }

            for record in &data.event_records {
                let profile_id = require(&ids, "event", record.profile_id)?;
                records::insert_event(
                    tx,
                    &EventRecord {
                        profile_id,
                        ..record.clone()
                    },
                )?;
                report.events.inserted += 1;
            }

            // Same-date snapshots inside one backup: the later one wins.
            let mut dailies: HashMap<(i64, i64), i64> = HashMap::new();
            for record in &data.child_daily_records {
                let profile_id = require(&ids, "daily", record.profile_id)?;
                let record = DailyRecord {
                    profile_id,
                    ..record.clone()
                };
                match dailies.entry((profile_id, record.record_date)) {
                    Entry::Occupied(slot) => {
                        records::update_daily(tx, *slot.get(), &record)?;
                        report.dailies.updated += 1;
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(records::insert_daily(tx, &record)?);
                        report.dailies.inserted += 1;
                    }
                }
            }

            Ok::<_, BackupError>(report)
        })?;

        report.imported_at = Utc::now().timestamp_millis();
        info!(
            profiles = report.profiles.inserted,
            records = report.total_inserted() - report.profiles.inserted,
            "Overwrite import committed"
        );
        Ok(report)
    }

    /// Append what the store does not already have.
    ///
    /// Profiles are matched by identity key; feedings, sleeps and events are
    /// skipped when an equal dedup key (timestamps bucketed to
    /// `bucket_minutes`) already exists for the same local profile; daily
    /// snapshots replace the local one for the same date.
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, or the
    /// database error that aborted the transaction.
    pub fn merge(&mut self, envelope: &Envelope, bucket_minutes: u32) -> BackupResult<ImportReport> {
        validate(envelope)?;
        let data = &envelope.data;
        let bucketing = Bucketing::from_minutes(bucket_minutes);

        let mut report = self.storage.mutate("import_merge", |tx| {
            let mut report = ImportReport::new(ImportMode::Merge, bucket_minutes);

            // Identity resolution is planned from a read before any write.
            let local = records::list_profiles(tx)?;
            let plan = IdentityPlan::resolve(&local, &data.babies);
            report.profiles = plan.stats();
            let ids = plan.commit(tx)?;

            let mut index = DedupIndex::load(tx, ids.local_ids(), bucketing)?;

            for record in &data.feeding_records {
                let Some(profile_id) = remap(&ids, "feeding", record.profile_id) else {
                    continue;
                };
                let record = FeedingRecord {
                    profile_id,
                    ..record.clone()
                };
                if index.claim_feeding(&record) {
                    records::insert_feeding(tx, &record)?;
                    report.feedings.inserted += 1;
                } else {
                    report.feedings.skipped += 1;
                }
            }

            for record in &data.sleep_records {
                let Some(profile_id) = remap(&ids, "sleep", record.profile_id) else {
                    continue;
                };
                let record = SleepRecord {
                    profile_id,
                    ..record.clone()
                };
                if index.claim_sleep(&record) {
                    records::insert_sleep(tx, &record)?;
                    report.sleeps.inserted += 1;
                } else {
                    report.sleeps.skipped += 1;
                }
            }

            for record in &data.event_records {
                let Some(profile_id) = remap(&ids, "event", record.profile_id) else {
                    continue;
                };
                let record = EventRecord {
                    profile_id,
                    ..record.clone()
                };
                if index.claim_event(&record) {
                    records::insert_event(tx, &record)?;
                    report.events.inserted += 1;
                } else {
                    report.events.skipped += 1;
                }
            }

            for record in &data.child_daily_records {
                let Some(profile_id) = remap(&ids, "daily", record.profile_id) else {
                    continue;
                };
                let record = DailyRecord {
                    profile_id,
                    ..record.clone()
                };
                if let Some(existing) = index.daily_id(&record) {
                    records::update_daily(tx, existing, &record)?;
                    report.dailies.updated += 1;
                } else {
                    let local = records::insert_daily(tx, &record)?;
                    index.remember_daily(&record, local);
                    report.dailies.inserted += 1;
                }
            }

            Ok::<_, BackupError>(report)
        })?;

        report.imported_at = Utc::now().timestamp_millis();
        info!(
            bucket_minutes,
            inserted = report.total_inserted(),
            skipped = report.total_skipped(),
            matched = report.profiles.matched,
            "Merge import committed"
        );
        Ok(report)
    }
}

fn require(ids: &ProfileMap, kind: &str, incoming: i64) -> BackupResult<i64> {
    ids.get(incoming).ok_or_else(|| {
        BackupError::invalid(format!("{kind} record references unknown profile {incoming}"))
    })
}

fn remap(ids: &ProfileMap, kind: &str, incoming: i64) -> Option<i64> {
    let local = ids.get(incoming);
    if local.is_none() {
        warn!(kind, incoming, "Skipping record with unmapped profile");
    }
    local
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backup::envelope::{EnvelopeData, SUPPORTED_VERSION};
    use crate::backup::export::Exporter;
    use crate::backup::types::ImportErrorKind;
    use crate::model::Profile;

    const MINUTE: i64 = 60_000;

    fn envelope(data: EnvelopeData) -> Envelope {
        Envelope {
            version: SUPPORTED_VERSION,
            created_at: 1_700_000_000_000,
            app_version: None,
            data,
        }
    }

    fn alice(id: i64) -> Profile {
        Profile {
            id,
            birth_weight: 3.2,
            ..Profile::new("Alice", "girl", 1_690_000_000_000)
        }
    }

    fn feeding(profile_id: i64, start: i64) -> FeedingRecord {
        FeedingRecord {
            profile_id,
            feeding_type: 1,
            feeding_start: start,
            feeding_end: start + 15 * MINUTE,
            feeding_duration: 15 * MINUTE,
            ..FeedingRecord::default()
        }
    }

    fn alice_envelope() -> Envelope {
        let base = 1_700_000_000_000;
        envelope(EnvelopeData {
            babies: vec![alice(7)],
            feeding_records: vec![
                feeding(7, base),
                feeding(7, base + 180 * MINUTE),
                feeding(7, base + 360 * MINUTE),
            ],
            ..EnvelopeData::default()
        })
    }

    fn full_envelope() -> Envelope {
        let base = 1_700_000_000_000;
        envelope(EnvelopeData {
            babies: vec![alice(1), Profile { id: 2, ..Profile::new("Bob", "boy", 5) }],
            feeding_records: vec![feeding(1, base), feeding(2, base)],
            sleep_records: vec![SleepRecord {
                profile_id: 2,
                sleep_start: base,
                sleep_end: base + 60 * MINUTE,
                sleep_duration: 60 * MINUTE,
                ..SleepRecord::default()
            }],
            event_records: vec![EventRecord {
                profile_id: 1,
                event_type: 101,
                time: base,
                extra_data: r#"{"color":1}"#.into(),
                ..EventRecord::default()
            }],
            child_daily_records: vec![DailyRecord {
                profile_id: 1,
                record_date: 1_699_920_000_000,
                weight: 4.1,
                ..DailyRecord::default()
            }],
        })
    }

    fn snapshot(storage: &SqliteStorage) -> EnvelopeData {
        Exporter::new(storage).build_envelope().unwrap().data
    }

    #[test]
    fn test_alice_merge_then_reimport() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let env = alice_envelope();

        let first = Importer::new(&mut storage).merge(&env, 5).unwrap();
        assert_eq!(first.profiles.inserted, 1);
        assert_eq!(first.profiles.matched, 0);
        assert_eq!(first.feedings.inserted, 3);
        assert_eq!(first.feedings.skipped, 0);

        let second = Importer::new(&mut storage).merge(&env, 5).unwrap();
        assert_eq!(second.profiles.inserted, 0);
        assert_eq!(second.profiles.matched, 1);
        assert_eq!(second.feedings.inserted, 0);
        assert_eq!(second.feedings.skipped, 3);

        assert_eq!(storage.counts().unwrap().feedings, 3);
    }

    #[test]
    fn test_merge_idempotent_exact() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let env = full_envelope();

        Importer::new(&mut storage).merge(&env, 0).unwrap();
        let before = storage.counts().unwrap();
        let again = Importer::new(&mut storage).merge(&env, 0).unwrap();

        assert_eq!(again.total_inserted(), 0);
        assert_eq!(again.total_skipped(), 4);
        assert_eq!(again.dailies.updated, 1);
        assert_eq!(again.profiles.matched, 2);
        assert_eq!(storage.counts().unwrap(), before);
    }

    /// Every column set, so a dropped or mis-mapped field shows up.
    fn detailed_envelope() -> Envelope {
        let base = 1_700_000_000_000;
        let bob = Profile {
            id: 2,
            birth_height: 51.5,
            blood_type: "O+".into(),
            extra: r#"{"nickname":"B"}"#.into(),
            ..Profile::new("Bob", "boy", 1_680_000_000_000)
        };
        envelope(EnvelopeData {
            babies: vec![alice(1), bob],
            feeding_records: vec![
                FeedingRecord {
                    profile_id: 1,
                    feeding_type: 3,
                    feeding_start: base,
                    feeding_end: base + 10 * MINUTE,
                    feeding_duration: 10 * MINUTE,
                    note: "carrot".into(),
                    created_at: base + 11 * MINUTE,
                    feeding_amount: Some(40),
                    baby_mood: Some(2),
                    feeding_location: Some(1),
                    solid_food_type: Some(4),
                    food_name: Some("carrot puree".into()),
                    is_first_time: true,
                    ..FeedingRecord::default()
                },
                FeedingRecord {
                    profile_id: 2,
                    feeding_type: 0,
                    feeding_start: base + 60 * MINUTE,
                    feeding_end: base + 80 * MINUTE,
                    feeding_duration: 20 * MINUTE,
                    feeding_duration_breast_left: 8 * MINUTE,
                    feeding_duration_breast_right: 12 * MINUTE,
                    ..FeedingRecord::default()
                },
            ],
            sleep_records: vec![SleepRecord {
                profile_id: 2,
                sleep_start: base,
                sleep_end: base + 90 * MINUTE,
                sleep_duration: 90 * MINUTE,
                note: "nap".into(),
                created_at: base + 91 * MINUTE,
                ..SleepRecord::default()
            }],
            event_records: vec![EventRecord {
                profile_id: 1,
                event_type: 401,
                time: base + 30 * MINUTE,
                end_time: base + 31 * MINUTE,
                extra_data: r#"{"value":37.9,"location":"ear"}"#.into(),
                note: "after bath".into(),
                created_at: base + 32 * MINUTE,
                ..EventRecord::default()
            }],
            child_daily_records: vec![DailyRecord {
                profile_id: 2,
                record_date: 1_699_920_000_000,
                weight: 4.1,
                height: 55.2,
                head_circumference: 37.4,
                pic: "photos/d1.jpg".into(),
                extra: r#"{"mood":"calm"}"#.into(),
                ..DailyRecord::default()
            }],
        })
    }

    /// Replace record and profile ids with the owning profile's position so
    /// two stores with different id spaces compare equal.
    fn without_ids(mut data: EnvelopeData) -> EnvelopeData {
        let position = |ids: &[i64], id: i64| {
            i64::try_from(ids.iter().position(|p| *p == id).unwrap()).unwrap()
        };
        let ids: Vec<i64> = data.babies.iter().map(|p| p.id).collect();
        for p in &mut data.babies {
            p.id = 0;
        }
        for r in &mut data.feeding_records {
            r.id = 0;
            r.profile_id = position(&ids, r.profile_id);
        }
        for r in &mut data.sleep_records {
            r.id = 0;
            r.profile_id = position(&ids, r.profile_id);
        }
        for r in &mut data.event_records {
            r.id = 0;
            r.profile_id = position(&ids, r.profile_id);
        }
        for r in &mut data.child_daily_records {
            r.id = 0;
            r.profile_id = position(&ids, r.profile_id);
        }
        data
    }

    fn assert_references_resolve(data: &EnvelopeData) {
        let ids = data.profile_ids();
        assert!(data.feeding_records.iter().all(|r| ids.contains(&r.profile_id)));
        assert!(data.sleep_records.iter().all(|r| ids.contains(&r.profile_id)));
        assert!(data.event_records.iter().all(|r| ids.contains(&r.profile_id)));
        assert!(data.child_daily_records.iter().all(|r| ids.contains(&r.profile_id)));
    }

    #[test]
    fn test_round_trip_through_overwrite() {
        let mut source = SqliteStorage::open_memory().unwrap();
        Importer::new(&mut source).overwrite(&detailed_envelope()).unwrap();
        let exported = Exporter::new(&source).build_envelope().unwrap();

        let mut target = SqliteStorage::open_memory().unwrap();
        // Seed unrelated data that overwrite must remove.
        let stale = target.add_profile(&Profile::new("Stale", "x", 9)).unwrap();
        target.add_sleep(&SleepRecord {
            profile_id: stale,
            sleep_start: 1,
            ..SleepRecord::default()
        })
        .unwrap();
        let report = Importer::new(&mut target).overwrite(&exported).unwrap();

        assert_eq!(report.profiles.inserted, 2);
        assert_eq!(report.total_skipped(), 0);
        assert_eq!(report.profiles.matched, 0);
        assert_eq!(report.profiles.duplicate_in_backup, 0);

        let restored = snapshot(&target);
        assert_references_resolve(&restored);
        assert_eq!(without_ids(restored), without_ids(snapshot(&source)));
        assert_eq!(
            without_ids(snapshot(&source)),
            without_ids(detailed_envelope().data)
        );
    }

    #[test]
    fn test_overwrite_collapses_same_date_dailies() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let daily = |weight: f64| DailyRecord {
            profile_id: 7,
            record_date: 100,
            weight,
            ..DailyRecord::default()
        };
        let env = envelope(EnvelopeData {
            babies: vec![alice(7)],
            child_daily_records: vec![daily(4.0), daily(4.3)],
            ..EnvelopeData::default()
        });
        let env = crate::backup::parse::parse_envelope(&serde_json::to_string(&env).unwrap())
            .unwrap();

        let report = Importer::new(&mut storage).overwrite(&env).unwrap();
        assert_eq!(report.dailies.inserted, 1);
        assert_eq!(report.dailies.updated, 1);

        let merged = Importer::new(&mut SqliteStorage::open_memory().unwrap())
            .merge(&env, 1)
            .unwrap();
        assert_eq!(merged.dailies, report.dailies);

        let stored = snapshot(&storage).child_daily_records;
        assert_eq!(stored.len(), 1);
        assert!((stored[0].weight - 4.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_referential_integrity_after_merge() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        storage.add_profile(&Profile::new("Other", "boy", 3)).unwrap();
        Importer::new(&mut storage).merge(&full_envelope(), 1).unwrap();

        assert_references_resolve(&snapshot(&storage));
    }

    #[test]
    fn test_referential_integrity_after_overwrite() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        Importer::new(&mut storage).merge(&alice_envelope(), 1).unwrap();
        Importer::new(&mut storage).overwrite(&full_envelope()).unwrap();

        let data = snapshot(&storage);
        assert_eq!(data.babies.len(), 2);
        assert_eq!(data.feeding_records.len(), 2);
        assert_references_resolve(&data);
    }

    #[test]
    fn test_overwrite_failure_leaves_store_untouched() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        Importer::new(&mut storage).merge(&full_envelope(), 0).unwrap();
        let before = snapshot(&storage);

        // Dailies are written last, after the wipe and every other insert.
        storage
            .conn()
            .execute_batch(
                "CREATE TRIGGER fail_dailies BEFORE INSERT ON daily_records
                 BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
            .unwrap();

        let err = Importer::new(&mut storage)
            .overwrite(&full_envelope())
            .unwrap_err();
        assert!(matches!(err, BackupError::Database(_)));
        assert_eq!(snapshot(&storage), before);
    }

    #[test]
    fn test_merge_failure_leaves_store_untouched() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        Importer::new(&mut storage).merge(&alice_envelope(), 0).unwrap();
        let before = snapshot(&storage);

        storage
            .conn()
            .execute_batch(
                "CREATE TRIGGER fail_events BEFORE INSERT ON event_records
                 BEGIN SELECT RAISE(ABORT, 'injected failure'); END;",
            )
            .unwrap();

        let err = Importer::new(&mut storage)
            .merge(&full_envelope(), 0)
            .unwrap_err();
        assert!(matches!(err, BackupError::Database(_)));
        assert_eq!(snapshot(&storage), before);
    }

    #[test]
    fn test_version_gate_mutates_nothing() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let mut env = alice_envelope();
        env.version = SUPPORTED_VERSION + 1;

        let err = Importer::new(&mut storage).merge(&env, 1).unwrap_err();
        assert_eq!(err.kind(), Some(ImportErrorKind::UnsupportedVersion));
        let err = Importer::new(&mut storage).overwrite(&env).unwrap_err();
        assert_eq!(err.kind(), Some(ImportErrorKind::UnsupportedVersion));
        assert_eq!(storage.counts().unwrap().total(), 0);
    }

    #[test]
    fn test_bucket_boundary_straddle_inserts_both() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let aligned = 5_666_666 * 5 * MINUTE;
        let mut first = feeding(7, aligned - MINUTE / 60);
        first.feeding_end = 0;
        first.feeding_duration = 0;
        let mut second = feeding(7, aligned + MINUTE);
        second.feeding_end = 0;
        second.feeding_duration = 0;
        let env = envelope(EnvelopeData {
            babies: vec![alice(7)],
            feeding_records: vec![first.clone()],
            ..EnvelopeData::default()
        });
        Importer::new(&mut storage).merge(&env, 5).unwrap();

        let env = envelope(EnvelopeData {
            babies: vec![alice(7)],
            feeding_records: vec![second, first],
            ..EnvelopeData::default()
        });
        let report = Importer::new(&mut storage).merge(&env, 5).unwrap();
        assert_eq!(report.feedings.inserted, 1);
        assert_eq!(report.feedings.skipped, 1);
    }

    #[test]
    fn test_daily_latest_wins() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let daily = |weight: f64| DailyRecord {
            profile_id: 7,
            record_date: 1_699_920_000_000,
            weight,
            ..DailyRecord::default()
        };
        let with_daily = |weight: f64| {
            envelope(EnvelopeData {
                babies: vec![alice(7)],
                child_daily_records: vec![daily(weight)],
                ..EnvelopeData::default()
            })
        };

        let first = Importer::new(&mut storage).merge(&with_daily(4.0), 1).unwrap();
        assert_eq!(first.dailies.inserted, 1);
        let second = Importer::new(&mut storage).merge(&with_daily(4.4), 1).unwrap();
        assert_eq!(second.dailies.updated, 1);
        assert_eq!(second.dailies.inserted, 0);

        let stored = snapshot(&storage).child_daily_records;
        assert_eq!(stored.len(), 1);
        assert!((stored[0].weight - 4.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duplicate_profile_identity_in_backup() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let env = envelope(EnvelopeData {
            babies: vec![alice(1), alice(2)],
            sleep_records: vec![SleepRecord {
                profile_id: 2,
                sleep_start: 10,
                ..SleepRecord::default()
            }],
            ..EnvelopeData::default()
        });

        let report = Importer::new(&mut storage).merge(&env, 0).unwrap();
        assert_eq!(report.profiles.inserted, 1);
        assert_eq!(report.profiles.matched, 1);
        assert_eq!(report.profiles.duplicate_in_backup, 1);
        assert_eq!(storage.counts().unwrap().profiles, 1);
        assert_eq!(storage.counts().unwrap().sleeps, 1);
    }

    #[test]
    fn test_merge_dedupes_within_envelope() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let rec = feeding(7, 1_700_000_000_000);
        let env = envelope(EnvelopeData {
            babies: vec![alice(7)],
            feeding_records: vec![rec.clone(), rec],
            ..EnvelopeData::default()
        });

        let report = Importer::new(&mut storage).merge(&env, 1).unwrap();
        assert_eq!(report.feedings.inserted, 1);
        assert_eq!(report.feedings.skipped, 1);
    }

    #[test]
    fn test_empty_envelope_rejected() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let err = Importer::new(&mut storage)
            .import(&envelope(EnvelopeData::default()), ImportMode::Merge, 1)
            .unwrap_err();
        assert_eq!(err.kind(), Some(ImportErrorKind::EmptyData));
    }

    #[test]
    fn test_report_metadata() {
        let mut storage = SqliteStorage::open_memory().unwrap();
        let report = Importer::new(&mut storage)
            .import(&alice_envelope(), ImportMode::Merge, 10)
            .unwrap();
        assert_eq!(report.strategy, ImportMode::Merge);
        assert_eq!(report.bucket_minutes, 10);
        assert!(report.imported_at > 0);
    }
}
