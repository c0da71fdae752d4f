//! The portable snapshot format.
//!
//! ```json
//! {
//!   "version": 1,
//!   "createdAt": 1700000000000,
//!   "appVersion": "0.1.0",
//!   "data": {
//!     "babies": [...],
//!     "feedingRecords": [...],
//!     "sleepRecords": [...],
//!     "eventRecords": [...],
//!     "childDailyRecords": [...]
//!   }
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::{DailyRecord, EventRecord, FeedingRecord, Profile, SleepRecord};

/// Highest envelope version this build reads and the one it writes.
pub const SUPPORTED_VERSION: i32 = 1;

/// A complete, self-contained snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    pub version: i32,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub app_version: Option<String>,
    pub data: EnvelopeData,
}

/// The five collections of an envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeData {
    pub babies: Vec<Profile>,
    pub feeding_records: Vec<FeedingRecord>,
    pub sleep_records: Vec<SleepRecord>,
    pub event_records: Vec<EventRecord>,
    pub child_daily_records: Vec<DailyRecord>,
}

impl EnvelopeData {
    /// True when any of the four child collections is non-empty.
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.feeding_records.is_empty()
            || !self.sleep_records.is_empty()
            || !self.event_records.is_empty()
            || !self.child_daily_records.is_empty()
    }

    /// True when all five collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.babies.is_empty() && !self.has_records()
    }

    /// Ids of every profile in the envelope.
    #[must_use]
    pub fn profile_ids(&self) -> HashSet<i64> {
        self.babies.iter().map(|p| p.id).collect()
    }

    /// Collection sizes.
    #[must_use]
    pub fn counts(&self) -> EnvelopeCounts {
        EnvelopeCounts {
            profiles: self.babies.len(),
            feedings: self.feeding_records.len(),
            sleeps: self.sleep_records.len(),
            events: self.event_records.len(),
            dailies: self.child_daily_records.len(),
        }
    }
}

/// Number of entries per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EnvelopeCounts {
    pub profiles: usize,
    pub feedings: usize,
    pub sleeps: usize,
    pub events: usize,
    pub dailies: usize,
}

impl EnvelopeCounts {
    /// Total entries across all collections.
    #[must_use]
    pub fn total(&self) -> usize {
        self.profiles + self.feedings + self.sleeps + self.events + self.dailies
    }
}

/// What a parsed envelope would bring in, shown before choosing a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    pub version: i32,
    pub created_at: i64,
    pub app_version: Option<String>,
    pub counts: EnvelopeCounts,
}

impl ImportPreview {
    #[must_use]
    pub fn from_envelope(envelope: &Envelope) -> Self {
        Self {
            version: envelope.version,
            created_at: envelope.created_at,
            app_version: envelope.app_version.clone(),
            counts: envelope.data.counts(),
        }
    }
}
