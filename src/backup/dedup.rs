//! Dedup keys and the per-profile index used by merge imports.
//!
//! A dedup key is a canonical tuple of a record's comparable fields with
//! every timestamp-like value floor-divided into a bucket. Two records with
//! equal keys are the same record for merge purposes. Buckets are aligned to
//! the epoch, not to each other: `04:59` and `05:01` fall into different
//! 5-minute buckets even though they are two minutes apart.

use std::collections::{HashMap, HashSet};

use rusqlite::Connection;

use crate::model::{DailyRecord, EventRecord, FeedingRecord, SleepRecord};
use crate::storage::records;

/// Floor-divide `value` into a bucket of `bucket_millis`.
///
/// Non-positive values (unset timestamps) collapse to 0. A non-positive
/// bucket means exact matching.
#[must_use]
pub const fn bucket(value: i64, bucket_millis: i64) -> i64 {
    if value <= 0 {
        0
    } else if bucket_millis <= 0 {
        value
    } else {
        value / bucket_millis
    }
}

/// Bucket size for one merge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucketing {
    millis: i64,
}

impl Bucketing {
    /// Exact matching.
    pub const EXACT: Self = Self { millis: 0 };

    #[must_use]
    pub fn from_minutes(minutes: u32) -> Self {
        Self {
            millis: i64::from(minutes) * 60_000,
        }
    }

    #[must_use]
    pub const fn millis(self) -> i64 {
        self.millis
    }

    #[must_use]
    pub const fn apply(self, value: i64) -> i64 {
        bucket(value, self.millis)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeedingKey {
    feeding_type: i32,
    start: i64,
    end: i64,
    duration: i64,
    breast_left: i64,
    breast_right: i64,
    amount: Option<i32>,
    mood: Option<i32>,
    location: Option<i32>,
    solid_food_type: Option<i32>,
    // Missing and empty food names compare equal.
    food_name: String,
    is_first_time: bool,
}

impl FeedingKey {
    #[must_use]
    pub fn of(record: &FeedingRecord, b: Bucketing) -> Self {
        Self {
            feeding_type: record.feeding_type,
            start: b.apply(record.feeding_start),
            end: b.apply(record.feeding_end),
            duration: b.apply(record.feeding_duration),
            breast_left: b.apply(record.feeding_duration_breast_left),
            breast_right: b.apply(record.feeding_duration_breast_right),
            amount: record.feeding_amount,
            mood: record.baby_mood,
            location: record.feeding_location,
            solid_food_type: record.solid_food_type,
            food_name: record.food_name.clone().unwrap_or_default(),
            is_first_time: record.is_first_time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SleepKey {
    start: i64,
    end: i64,
    duration: i64,
}

impl SleepKey {
    #[must_use]
    pub const fn of(record: &SleepRecord, b: Bucketing) -> Self {
        Self {
            start: b.apply(record.sleep_start),
            end: b.apply(record.sleep_end),
            duration: b.apply(record.sleep_duration),
        }
    }
}

/// Event key. The payload is compared as an opaque string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventKey {
    event_type: i32,
    time: i64,
    end_time: i64,
    extra_data: String,
}

impl EventKey {
    #[must_use]
    pub fn of(record: &EventRecord, b: Bucketing) -> Self {
        Self {
            event_type: record.event_type,
            time: b.apply(record.time),
            end_time: b.apply(record.end_time),
            extra_data: record.extra_data.clone(),
        }
    }
}

/// Existing-record keys for a set of local profiles.
///
/// Built once per merge from the store, then updated as records are
/// appended so duplicates inside the same envelope are caught too.
#[derive(Debug)]
pub struct DedupIndex {
    bucketing: Bucketing,
    feedings: HashMap<i64, HashSet<FeedingKey>>,
    sleeps: HashMap<i64, HashSet<SleepKey>>,
    events: HashMap<i64, HashSet<EventKey>>,
    dailies: HashMap<(i64, i64), i64>,
}

impl DedupIndex {
    /// Load the keys of every record owned by `profile_ids`.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load(
        conn: &Connection,
        profile_ids: impl IntoIterator<Item = i64>,
        bucketing: Bucketing,
    ) -> rusqlite::Result<Self> {
        let mut index = Self {
            bucketing,
            feedings: HashMap::new(),
            sleeps: HashMap::new(),
            events: HashMap::new(),
            dailies: HashMap::new(),
        };

        for profile_id in profile_ids {
            if index.feedings.contains_key(&profile_id) {
                continue;
            }
            index.feedings.insert(
                profile_id,
                records::list_feedings(conn, profile_id)?
                    .iter()
                    .map(|r| FeedingKey::of(r, bucketing))
                    .collect(),
            );
            index.sleeps.insert(
                profile_id,
                records::list_sleeps(conn, profile_id)?
                    .iter()
                    .map(|r| SleepKey::of(r, bucketing))
                    .collect(),
            );
            index.events.insert(
                profile_id,
                records::list_events(conn, profile_id)?
                    .iter()
                    .map(|r| EventKey::of(r, bucketing))
                    .collect(),
            );
            for daily in records::list_dailies(conn, profile_id)? {
                index
                    .dailies
                    .insert((profile_id, daily.record_date), daily.id);
            }
        }

        Ok(index)
    }

    /// Claim the key of `record` (already remapped to its local profile).
    /// Returns `false` if an equal key was already present.
    pub fn claim_feeding(&mut self, record: &FeedingRecord) -> bool {
        let key = FeedingKey::of(record, self.bucketing);
        self.feedings.entry(record.profile_id).or_default().insert(key)
    }

    /// See [`Self::claim_feeding`].
    pub fn claim_sleep(&mut self, record: &SleepRecord) -> bool {
        let key = SleepKey::of(record, self.bucketing);
        self.sleeps.entry(record.profile_id).or_default().insert(key)
    }

    /// See [`Self::claim_feeding`].
    pub fn claim_event(&mut self, record: &EventRecord) -> bool {
        let key = EventKey::of(record, self.bucketing);
        self.events.entry(record.profile_id).or_default().insert(key)
    }

    /// Local id of the daily snapshot for the record's `(profile, date)`.
    #[must_use]
    pub fn daily_id(&self, record: &DailyRecord) -> Option<i64> {
        self.dailies
            .get(&(record.profile_id, record.record_date))
            .copied()
    }

    /// Remember a freshly inserted daily snapshot.
    pub fn remember_daily(&mut self, record: &DailyRecord, local_id: i64) {
        self.dailies
            .insert((record.profile_id, record.record_date), local_id);
    }
}
