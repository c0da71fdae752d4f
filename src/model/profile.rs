//! Profile model for babylog.
//!
//! A profile is the root every other record hangs off. Its local `id` is
//! assigned by the store and never survives an import; the
//! `(name, gender, birth_date)` triple is what identifies the same child
//! across two independently generated id spaces.

use serde::{Deserialize, Serialize};

/// A tracked child.
///
/// Field names on the wire follow the backup envelope format
/// (`babyId`, `birthDate`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    /// Local auto-generated id
    #[serde(rename = "babyId")]
    pub id: i64,

    /// Display name
    pub name: String,

    /// Free-form gender label
    pub gender: String,

    /// Birth date (Unix milliseconds)
    pub birth_date: i64,

    /// Birth weight (kg)
    pub birth_weight: f64,

    /// Birth height (cm)
    pub birth_height: f64,

    /// Blood type label
    pub blood_type: String,

    /// Free-form extra payload
    pub extra: String,
}

impl Profile {
    /// Create a profile that has not been stored yet.
    #[must_use]
    pub fn new(name: impl Into<String>, gender: impl Into<String>, birth_date: i64) -> Self {
        Self {
            id: 0,
            name: name.into(),
            gender: gender.into(),
            birth_date,
            ..Self::default()
        }
    }

    /// Cross-store identity of this profile.
    ///
    /// Name and gender are trimmed so that stray whitespace from manual entry
    /// does not split one child into two.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name.trim(),
            self.gender.trim(),
            self.birth_date
        )
    }
}
