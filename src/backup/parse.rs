//! Parsing and validation of backup text.
//!
//! Checks run in a fixed order so the reported error is deterministic:
//! blank text, JSON shape, version gate, referential integrity, emptiness.
//! Nothing here touches the store.

use crate::backup::envelope::{Envelope, EnvelopeData, SUPPORTED_VERSION};
use crate::backup::types::{BackupError, BackupResult};
use tracing::warn;

/// Parse and validate backup text.
///
/// # Errors
///
/// - `InvalidJson` for blank or malformed text, or a record whose owner
///   profile is not in the envelope
/// - `UnsupportedVersion` when the envelope is newer than this build
/// - `EmptyData` when every collection is empty
pub fn parse_envelope(text: &str) -> BackupResult<Envelope> {
    if text.trim().is_empty() {
        return Err(BackupError::invalid("backup text is empty"));
    }

    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| BackupError::invalid(e.to_string()))?;

    validate(&envelope)?;
    Ok(envelope)
}

/// Validate an already-deserialized envelope.
///
/// # Errors
///
/// Same as [`parse_envelope`], minus the JSON shape checks.
pub fn validate(envelope: &Envelope) -> BackupResult<()> {
    if envelope.version > SUPPORTED_VERSION {
        return Err(BackupError::UnsupportedVersion {
            found: envelope.version,
            supported: SUPPORTED_VERSION,
        });
    }

    check_references(&envelope.data)?;

    if envelope.data.is_empty() {
        return Err(BackupError::EmptyData);
    }

    Ok(())
}

/// Every child record must name a profile present in `data.babies`.
///
/// # Errors
///
/// Returns `InvalidJson` naming the first offending record.
pub fn check_references(data: &EnvelopeData) -> BackupResult<()> {
    let ids = data.profile_ids();
    let missing = |kind: &str, record_id: i64, profile_id: i64| {
        warn!(kind, record_id, profile_id, "Record references a profile missing from the backup");
        BackupError::invalid(format!(
            "{kind} record {record_id} references unknown profile {profile_id}"
        ))
    };

    if let Some(r) = data
        .feeding_records
        .iter()
        .find(|r| !ids.contains(&r.profile_id))
    {
        return Err(missing("feeding", r.id, r.profile_id));
    }
    if let Some(r) = data
        .sleep_records
        .iter()
        .find(|r| !ids.contains(&r.profile_id))
    {
        return Err(missing("sleep", r.id, r.profile_id));
    }
    if let Some(r) = data
        .event_records
        .iter()
        .find(|r| !ids.contains(&r.profile_id))
    {
        return Err(missing("event", r.id, r.profile_id));
    }
    if let Some(r) = data
        .child_daily_records
        .iter()
        .find(|r| !ids.contains(&r.profile_id))
    {
        return Err(missing("daily", r.id, r.profile_id));
    }

    Ok(())
}
