//! Child record models: feedings, sleeps, events and daily growth snapshots.
//!
//! Every record carries the `profile_id` of its owner. All timestamps and
//! durations are Unix milliseconds. Serde names match the backup envelope.

use serde::{Deserialize, Serialize};

/// A feeding interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeedingRecord {
    #[serde(rename = "feedingId")]
    pub id: i64,
    #[serde(rename = "babyId")]
    pub profile_id: i64,
    /// Feeding type code (breast, bottle, formula, solid food, ...)
    pub feeding_type: i32,
    pub feeding_start: i64,
    pub feeding_end: i64,
    pub feeding_duration: i64,
    pub feeding_duration_breast_left: i64,
    pub feeding_duration_breast_right: i64,
    pub note: String,
    pub created_at: i64,
    /// Amount in ml or g
    pub feeding_amount: Option<i32>,
    pub baby_mood: Option<i32>,
    pub feeding_location: Option<i32>,
    pub solid_food_type: Option<i32>,
    pub food_name: Option<String>,
    pub is_first_time: bool,
}

/// A sleep interval.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SleepRecord {
    #[serde(rename = "sleepId")]
    pub id: i64,
    #[serde(rename = "babyId")]
    pub profile_id: i64,
    pub sleep_start: i64,
    pub sleep_end: i64,
    pub sleep_duration: i64,
    pub note: String,
    pub created_at: i64,
}

/// A discrete (or bounded) event such as a diaper change or a vaccine.
///
/// `event_type` encodes category in the hundreds digit and subtype below it
/// (101 = wet diaper, 401 = temperature). `extra_data` is an opaque JSON
/// payload whose shape depends on the type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventRecord {
    #[serde(rename = "eventId")]
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: i32,
    #[serde(rename = "babyId")]
    pub profile_id: i64,
    pub time: i64,
    /// 0 for instantaneous events
    pub end_time: i64,
    pub extra_data: String,
    pub note: String,
    pub created_at: i64,
}

impl EventRecord {
    /// Category part of the type code (101 -> 100).
    #[must_use]
    pub const fn category(&self) -> i32 {
        self.event_type / 100 * 100
    }
}

/// Daily growth snapshot. Unique per `(profile_id, record_date)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DailyRecord {
    #[serde(rename = "recordId")]
    pub id: i64,
    #[serde(rename = "babyId")]
    pub profile_id: i64,
    pub record_date: i64,
    pub weight: f64,
    pub height: f64,
    pub head_circumference: f64,
    /// Picture reference
    pub pic: String,
    pub extra: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feeding_wire_names() {
        let rec = FeedingRecord {
            id: 3,
            profile_id: 1,
            feeding_duration_breast_left: 60_000,
            food_name: Some("carrot".into()),
            ..FeedingRecord::default()
        };
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["feedingId"], 3);
        assert_eq!(json["babyId"], 1);
        assert_eq!(json["feedingDurationBreastLeft"], 60_000);
        assert_eq!(json["foodName"], "carrot");
        assert!(json["feedingAmount"].is_null());
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let rec: FeedingRecord =
            serde_json::from_str(r#"{"feedingId":1,"babyId":2,"feedingType":1}"#).unwrap();
        assert_eq!(rec.profile_id, 2);
        assert_eq!(rec.feeding_amount, None);
        assert!(!rec.is_first_time);
        assert!(rec.note.is_empty());
    }

    #[test]
    fn test_event_type_field_is_named_type() {
        let ev: EventRecord =
            serde_json::from_str(r#"{"eventId":1,"type":102,"babyId":1,"time":5}"#).unwrap();
        assert_eq!(ev.event_type, 102);
        assert_eq!(ev.category(), 100);
    }
}
