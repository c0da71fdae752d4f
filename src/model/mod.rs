//! Data models for babylog.
//!
//! This module contains all domain models:
//! - Profile
//! - FeedingRecord
//! - SleepRecord
//! - EventRecord
//! - DailyRecord

pub mod profile;
pub mod record;

pub use profile::Profile;
pub use record::{DailyRecord, EventRecord, FeedingRecord, SleepRecord};
