//! Input normalization for record commands.
//!
//! Feeding and event types are stored as numeric codes, but people type
//! names. Resolution is three-tier: numeric code → name or synonym → error
//! with the closest suggestion. Times accept Unix milliseconds, RFC 3339,
//! or local `YYYY-MM-DD HH:MM`.

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

// ── Type code tables ─────────────────────────────────────────

pub static FEEDING_TYPES: LazyLock<HashMap<&str, i32>> = LazyLock::new(|| {
    [
        ("breast", 0),
        ("formula", 1),
        ("mixed", 2),
        ("solid", 3),
        ("other", 4),
    ]
    .into_iter()
    .collect()
});

pub static FEEDING_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("nursing", "breast"),
        ("breastfeeding", "breast"),
        ("bottle", "formula"),
        ("combo", "mixed"),
        ("food", "solid"),
        ("puree", "solid"),
        ("snack", "solid"),
    ]
    .into_iter()
    .collect()
});

pub static EVENT_TYPES: LazyLock<HashMap<&str, i32>> = LazyLock::new(|| {
    [
        ("wet", 101),
        ("dirty", 102),
        ("diaper_mixed", 103),
        ("dry", 104),
        ("weight", 301),
        ("height", 302),
        ("head", 303),
        ("temperature", 401),
        ("medicine", 402),
        ("vaccine", 403),
        ("doctor", 404),
        ("symptom", 405),
        ("roll", 501),
        ("sit", 502),
        ("crawl", 503),
        ("stand", 504),
        ("walk", 505),
        ("first_word", 506),
        ("first_tooth", 507),
        ("milestone", 550),
        ("bath", 601),
        ("nail", 602),
        ("skincare", 603),
        ("massage", 604),
        ("nose", 605),
        ("ear", 606),
        ("outdoor", 701),
        ("tummy_time", 702),
        ("swimming", 703),
        ("play", 704),
        ("burp", 901),
        ("cry", 902),
        ("spit_up", 903),
        ("custom", 999),
    ]
    .into_iter()
    .collect()
});

pub static EVENT_SYNONYMS: LazyLock<HashMap<&str, &str>> = LazyLock::new(|| {
    [
        ("pee", "wet"),
        ("poop", "dirty"),
        ("poo", "dirty"),
        ("temp", "temperature"),
        ("fever", "temperature"),
        ("med", "medicine"),
        ("meds", "medicine"),
        ("shot", "vaccine"),
        ("vaccination", "vaccine"),
        ("checkup", "doctor"),
        ("tooth", "first_tooth"),
        ("word", "first_word"),
        ("walking", "walk"),
        ("crawling", "crawl"),
        ("swim", "swimming"),
        ("outside", "outdoor"),
        ("tummy", "tummy_time"),
        ("spitup", "spit_up"),
        ("crying", "cry"),
    ]
    .into_iter()
    .collect()
});

/// Normalize a feeding type from its code, name or synonym.
///
/// Returns the code, or an error with the original input and an optional
/// suggestion.
pub fn normalize_feeding_type(input: &str) -> Result<i32, (String, Option<String>)> {
    normalize_code(input, &FEEDING_TYPES, &FEEDING_SYNONYMS)
}

/// Normalize an event type from its code, name or synonym.
pub fn normalize_event_type(input: &str) -> Result<i32, (String, Option<String>)> {
    normalize_code(input, &EVENT_TYPES, &EVENT_SYNONYMS)
}

fn normalize_code(
    input: &str,
    codes: &HashMap<&str, i32>,
    synonyms: &HashMap<&str, &str>,
) -> Result<i32, (String, Option<String>)> {
    let lower = input.trim().to_lowercase().replace('-', "_");

    // Tier 1: numeric code
    if let Ok(n) = lower.parse::<i32>() {
        if n >= 0 {
            return Ok(n);
        }
        return Err((input.to_string(), None));
    }

    // Tier 2: name or synonym
    if let Some(&code) = codes.get(lower.as_str()) {
        return Ok(code);
    }
    if let Some(code) = synonyms.get(lower.as_str()).and_then(|c| codes.get(c)) {
        return Ok(*code);
    }

    // Tier 3: closest suggestion
    let suggestion = find_closest_match(&lower, codes, synonyms);
    Err((input.to_string(), suggestion))
}

/// Find the closest matching name across codes and synonyms.
fn find_closest_match(
    input: &str,
    codes: &HashMap<&str, i32>,
    synonyms: &HashMap<&str, &str>,
) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;

    for &v in codes.keys().chain(synonyms.keys()) {
        let dist = levenshtein_distance(input, v);
        if dist <= 3 && best.is_none_or(|(_, d)| dist < d) {
            // For synonyms, show what it maps to
            let shown = synonyms.get(v).copied().unwrap_or(v);
            best = Some((shown, dist));
        }
    }

    best.map(|(v, _)| v.to_string())
}

// ── Levenshtein distance ─────────────────────────────────────

/// Compute the Levenshtein edit distance between two strings.
#[must_use]
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let a_len = a.len();
    let b_len = b.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    // Use single-row optimization (O(min(m,n)) space)
    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for i in 1..=a_len {
        curr[0] = i;
        for j in 1..=b_len {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

// ── Times ────────────────────────────────────────────────────

/// Parse a point in time to Unix milliseconds.
///
/// Accepts `now`, an integer (already milliseconds), RFC 3339, or local
/// `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_timestamp(input: &str) -> Result<i64, String> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("now") {
        return Ok(Utc::now().timestamp_millis());
    }
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return local_millis(naive, input);
        }
    }
    Err(format!("invalid time: {input}"))
}

/// Parse a calendar date to local midnight in Unix milliseconds.
///
/// Accepts `YYYY-MM-DD` or an integer (already milliseconds).
pub fn parse_date(input: &str) -> Result<i64, String> {
    let s = input.trim();
    if let Ok(ms) = s.parse::<i64>() {
        return Ok(ms);
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date (time expected as YYYY-MM-DD): {input}"))?;
    local_millis(date.and_time(chrono::NaiveTime::MIN), input)
}

fn local_millis(naive: NaiveDateTime, input: &str) -> Result<i64, String> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| format!("invalid local time: {input}"))
}

/// Render Unix milliseconds as local `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_timestamp(ms: i64) -> String {
    if ms <= 0 {
        return "-".to_string();
    }
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}

/// Render Unix milliseconds as a local date.
#[must_use]
pub fn format_date(ms: i64) -> String {
    Local
        .timestamp_millis_opt(ms)
        .single()
        .map_or_else(|| ms.to_string(), |dt| dt.format("%Y-%m-%d").to_string())
}
