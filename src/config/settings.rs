//! User settings.
//!
//! Stored as `settings.json` next to the database:
//!
//! ```json
//! { "dedupMinutes": 1 }
//! ```
//!
//! The merge importer reads the dedup window through [`SettingsSource`].

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::backup::atomic_write;
use crate::error::{Error, Result};

/// Environment variable overriding the stored dedup window.
pub const DEDUP_ENV: &str = "BABYLOG_DEDUP_MINUTES";

/// Time bucket used to match near-identical records during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupWindow {
    /// Timestamps must match exactly.
    Exact,
    #[default]
    OneMinute,
    FiveMinutes,
    TenMinutes,
}

impl DedupWindow {
    /// Accepted minute values.
    pub const ALLOWED: [u32; 4] = [0, 1, 5, 10];

    #[must_use]
    pub const fn minutes(self) -> u32 {
        match self {
            Self::Exact => 0,
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::TenMinutes => 10,
        }
    }

    #[must_use]
    pub const fn from_minutes(minutes: u32) -> Option<Self> {
        match minutes {
            0 => Some(Self::Exact),
            1 => Some(Self::OneMinute),
            5 => Some(Self::FiveMinutes),
            10 => Some(Self::TenMinutes),
            _ => None,
        }
    }

    /// Parse a user-supplied value.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for anything outside [`Self::ALLOWED`].
    pub fn parse(raw: &str) -> Result<Self> {
        raw.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::from_minutes)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid dedup window: {raw}")))
    }
}

impl std::fmt::Display for DedupWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            _ => write!(f, "{} min", self.minutes()),
        }
    }
}

/// Anything that can tell the importer which dedup window to use.
pub trait SettingsSource {
    fn dedup_window(&self) -> DedupWindow;
}

/// Merge bucket size, in minutes, from any settings source.
#[must_use]
pub fn bucket_minutes<S: SettingsSource + ?Sized>(source: &S) -> u32 {
    source.dedup_window().minutes()
}

impl SettingsSource for DedupWindow {
    fn dedup_window(&self) -> DedupWindow {
        *self
    }
}

/// Persisted settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Raw stored value; out-of-range values read as the default window.
    #[serde(default = "default_dedup_minutes")]
    pub dedup_minutes: u32,
}

const fn default_dedup_minutes() -> u32 {
    DedupWindow::OneMinute.minutes()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dedup_minutes: default_dedup_minutes(),
        }
    }
}

impl Settings {
    /// Apply an environment override such as `BABYLOG_DEDUP_MINUTES`.
    /// Invalid overrides are ignored.
    #[must_use]
    pub fn with_override(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match DedupWindow::parse(raw) {
                Ok(window) => self.dedup_minutes = window.minutes(),
                Err(_) => warn!(value = raw, "Ignoring invalid {DEDUP_ENV}"),
            }
        }
        self
    }

    /// Set the dedup window.
    pub fn set_dedup_window(&mut self, window: DedupWindow) {
        self.dedup_minutes = window.minutes();
    }
}

impl SettingsSource for Settings {
    fn dedup_window(&self) -> DedupWindow {
        DedupWindow::from_minutes(self.dedup_minutes).unwrap_or_default()
    }
}

/// Load settings from `path`, then apply the environment override.
///
/// A missing file yields defaults.
///
/// # Errors
///
/// Returns `Config` if the file exists but cannot be read or parsed.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let settings = match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str::<Settings>(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file, using defaults");
            Settings::default()
        }
        Err(e) => return Err(Error::Config(format!("{}: {e}", path.display()))),
    };

    let env = std::env::var(DEDUP_ENV).ok();
    Ok(settings.with_override(env.as_deref()))
}

/// Write settings to `path` atomically.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_settings(path: &Path, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)?;
    Ok(())
}
