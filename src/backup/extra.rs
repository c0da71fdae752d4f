//! Typed views of an event's `extra_data` payload.
//!
//! Import and dedup never look inside the payload; this decoder exists for
//! display. A payload that does not fit its type's shape is reported as
//! [`ExtraDecode::Malformed`] rather than dropped.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const CATEGORY_DIAPER: i32 = 100;
pub const CATEGORY_GROWTH: i32 = 300;
pub const CATEGORY_HEALTH: i32 = 400;
pub const HEALTH_TEMPERATURE: i32 = 401;
pub const HEALTH_MEDICINE: i32 = 402;
pub const HEALTH_VACCINE: i32 = 403;
pub const CATEGORY_MILESTONE: i32 = 500;
pub const CATEGORY_CARE: i32 = 600;
pub const CATEGORY_ACTIVITY: i32 = 700;
pub const CATEGORY_OTHER: i32 = 900;

/// Human label for an event type's category.
#[must_use]
pub const fn category_label(event_type: i32) -> &'static str {
    match event_type / 100 * 100 {
        CATEGORY_DIAPER => "diaper",
        CATEGORY_GROWTH => "growth",
        CATEGORY_HEALTH => "health",
        CATEGORY_MILESTONE => "milestone",
        CATEGORY_CARE => "care",
        CATEGORY_ACTIVITY => "activity",
        CATEGORY_OTHER => "other",
        _ => "event",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaperData {
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub consistency: Option<String>,
    #[serde(default)]
    pub abnormal: bool,
    #[serde(default)]
    pub abnormal_desc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthData {
    pub value: f64,
    /// kg, g, cm or mm
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureData {
    /// Degrees Celsius.
    pub value: f64,
    #[serde(default = "default_temperature_location")]
    pub location: String,
}

fn default_temperature_location() -> String {
    "ear".to_string()
}

impl TemperatureData {
    /// Fever threshold depends on where the reading was taken.
    #[must_use]
    pub fn is_fever(&self) -> bool {
        let threshold = match self.location.as_str() {
            "rectal" | "ear" => 38.0,
            "oral" => 37.8,
            "armpit" => 37.3,
            _ => 37.5,
        };
        self.value >= threshold
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicineData {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaccineData {
    pub name: String,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub batch_number: Option<String>,
    #[serde(default)]
    pub clinic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneData {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_first: bool,
}

const fn default_true() -> bool {
    true
}

/// A decoded payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventExtra {
    Diaper(DiaperData),
    Growth(GrowthData),
    Temperature(TemperatureData),
    Medicine(MedicineData),
    Vaccine(VaccineData),
    Milestone(MilestoneData),
    /// Any other type: the payload as plain JSON.
    Generic { data: Value },
}

/// Outcome of decoding a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtraDecode {
    /// Blank payload.
    Empty,
    Decoded(EventExtra),
    /// Payload present but not valid for the type.
    Malformed { reason: String },
}

impl EventExtra {
    /// Decode `payload` according to `event_type`.
    #[must_use]
    pub fn decode(event_type: i32, payload: &str) -> ExtraDecode {
        if payload.trim().is_empty() {
            return ExtraDecode::Empty;
        }

        let decoded = match (event_type / 100 * 100, event_type) {
            (CATEGORY_DIAPER, _) => serde_json::from_str(payload).map(Self::Diaper),
            (CATEGORY_GROWTH, _) => serde_json::from_str(payload).map(Self::Growth),
            (_, HEALTH_TEMPERATURE) => serde_json::from_str(payload).map(Self::Temperature),
            (_, HEALTH_MEDICINE) => serde_json::from_str(payload).map(Self::Medicine),
            (_, HEALTH_VACCINE) => serde_json::from_str(payload).map(Self::Vaccine),
            (CATEGORY_MILESTONE, _) => serde_json::from_str(payload).map(Self::Milestone),
            _ => serde_json::from_str(payload).map(|data| Self::Generic { data }),
        };

        match decoded {
            Ok(extra) => ExtraDecode::Decoded(extra),
            Err(e) => ExtraDecode::Malformed {
                reason: e.to_string(),
            },
        }
    }

    /// One-line description for listings.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Diaper(d) => {
                let mut parts: Vec<&str> = [d.color.as_deref(), d.consistency.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect();
                if d.abnormal {
                    parts.push(d.abnormal_desc.as_deref().unwrap_or("abnormal"));
                }
                parts.join(", ")
            }
            Self::Growth(g) => format!("{} {}", g.value, g.unit),
            Self::Temperature(t) => {
                let fever = if t.is_fever() { " (fever)" } else { "" };
                format!("{:.1}°C {}{fever}", t.value, t.location)
            }
            Self::Medicine(m) => match (&m.dosage, &m.unit) {
                (Some(dosage), Some(unit)) => format!("{} {dosage}{unit}", m.name),
                (Some(dosage), None) => format!("{} {dosage}", m.name),
                _ => m.name.clone(),
            },
            Self::Vaccine(v) => match &v.site {
                Some(site) => format!("{} ({site})", v.name),
                None => v.name.clone(),
            },
            Self::Milestone(m) => m
                .name
                .clone()
                .or_else(|| m.description.clone())
                .unwrap_or_default(),
            Self::Generic { data } => data.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_payload_is_empty() {
        assert_eq!(EventExtra::decode(101, ""), ExtraDecode::Empty);
        assert_eq!(EventExtra::decode(401, "  "), ExtraDecode::Empty);
    }

    #[test]
    fn test_decode_diaper() {
        let decoded = EventExtra::decode(
            102,
            r#"{"color":"yellow","consistency":"loose","abnormal":true,"abnormalDesc":"mucus"}"#,
        );
        let ExtraDecode::Decoded(EventExtra::Diaper(d)) = decoded else {
            panic!("expected diaper, got {decoded:?}");
        };
        assert_eq!(d.color.as_deref(), Some("yellow"));
        assert!(d.abnormal);
        assert_eq!(
            EventExtra::Diaper(d).summary(),
            "yellow, loose, mucus"
        );
    }

    #[test]
    fn test_decode_temperature_fever() {
        let ExtraDecode::Decoded(EventExtra::Temperature(t)) =
            EventExtra::decode(401, r#"{"value":37.5,"location":"armpit"}"#)
        else {
            panic!("expected temperature");
        };
        assert!(t.is_fever());

        let ExtraDecode::Decoded(EventExtra::Temperature(t)) =
            EventExtra::decode(401, r#"{"value":37.5}"#)
        else {
            panic!("expected temperature");
        };
        assert_eq!(t.location, "ear");
        assert!(!t.is_fever());
    }

    #[test]
    fn test_decode_vaccine_and_milestone() {
        assert!(matches!(
            EventExtra::decode(403, r#"{"name":"BCG","batchNumber":"A1"}"#),
            ExtraDecode::Decoded(EventExtra::Vaccine(VaccineData { ref batch_number, .. }))
                if batch_number.as_deref() == Some("A1")
        ));

        let ExtraDecode::Decoded(EventExtra::Milestone(m)) =
            EventExtra::decode(505, r#"{"name":"First steps"}"#)
        else {
            panic!("expected milestone");
        };
        assert!(m.is_first);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        assert!(matches!(
            EventExtra::decode(301, r#"{"unit":"kg"}"#),
            ExtraDecode::Malformed { .. }
        ));
        assert!(matches!(
            EventExtra::decode(402, "not json"),
            ExtraDecode::Malformed { .. }
        ));
    }

    #[test]
    fn test_other_types_are_generic() {
        let decoded = EventExtra::decode(601, r#"{"water":"warm"}"#);
        let ExtraDecode::Decoded(EventExtra::Generic { data }) = decoded else {
            panic!("expected generic");
        };
        assert_eq!(data["water"], "warm");
        // Health types without a dedicated shape also fall through.
        assert!(matches!(
            EventExtra::decode(404, "{}"),
            ExtraDecode::Decoded(EventExtra::Generic { .. })
        ));
    }

    #[test]
    fn test_category_label() {
        assert_eq!(category_label(103), "diaper");
        assert_eq!(category_label(550), "milestone");
        assert_eq!(category_label(42), "event");
    }
}
