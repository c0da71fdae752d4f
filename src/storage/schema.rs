//! Database schema definitions.
//!
//! Timestamps are stored as INTEGER (Unix milliseconds), matching the
//! backup envelope so export and import never convert units.

use rusqlite::{Connection, Result};

/// Current schema version for migration tracking.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// The complete SQL schema for the babylog database.
pub const SCHEMA_SQL: &str = r"
-- ====================
-- Schema Version Tracking
-- ====================

CREATE TABLE IF NOT EXISTS schema_migrations (
    version TEXT PRIMARY KEY,
    applied_at INTEGER NOT NULL
);

-- ====================
-- Profiles
-- ====================

CREATE TABLE IF NOT EXISTS profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    gender TEXT NOT NULL DEFAULT '',
    birth_date INTEGER NOT NULL DEFAULT 0,
    birth_weight REAL NOT NULL DEFAULT 0,
    birth_height REAL NOT NULL DEFAULT 0,
    blood_type TEXT NOT NULL DEFAULT '',
    extra TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS idx_profiles_identity ON profiles(name, gender, birth_date);

-- ====================
-- Child Records
-- ====================

CREATE TABLE IF NOT EXISTS feeding_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id INTEGER NOT NULL,
    feeding_type INTEGER NOT NULL DEFAULT 0,
    feeding_start INTEGER NOT NULL DEFAULT 0,
    feeding_end INTEGER NOT NULL DEFAULT 0,
    feeding_duration INTEGER NOT NULL DEFAULT 0,
    duration_breast_left INTEGER NOT NULL DEFAULT 0,
    duration_breast_right INTEGER NOT NULL DEFAULT 0,
    note TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL DEFAULT 0,
    feeding_amount INTEGER,
    baby_mood INTEGER,
    feeding_location INTEGER,
    solid_food_type INTEGER,
    food_name TEXT,
    is_first_time INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (profile_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_feeding_profile ON feeding_records(profile_id);

CREATE TABLE IF NOT EXISTS sleep_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id INTEGER NOT NULL,
    sleep_start INTEGER NOT NULL DEFAULT 0,
    sleep_end INTEGER NOT NULL DEFAULT 0,
    sleep_duration INTEGER NOT NULL DEFAULT 0,
    note TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (profile_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_sleep_profile ON sleep_records(profile_id);

CREATE TABLE IF NOT EXISTS event_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_type INTEGER NOT NULL DEFAULT 0,
    profile_id INTEGER NOT NULL,
    time INTEGER NOT NULL DEFAULT 0,
    end_time INTEGER NOT NULL DEFAULT 0,
    extra_data TEXT NOT NULL DEFAULT '',
    note TEXT NOT NULL DEFAULT '',
    created_at INTEGER NOT NULL DEFAULT 0,
    FOREIGN KEY (profile_id) REFERENCES profiles(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_event_profile ON event_records(profile_id);
CREATE INDEX IF NOT EXISTS idx_event_type ON event_records(event_type);

CREATE TABLE IF NOT EXISTS daily_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id INTEGER NOT NULL,
    record_date INTEGER NOT NULL,
    weight REAL NOT NULL DEFAULT 0,
    height REAL NOT NULL DEFAULT 0,
    head_circumference REAL NOT NULL DEFAULT 0,
    pic TEXT NOT NULL DEFAULT '',
    extra TEXT NOT NULL DEFAULT '',
    FOREIGN KEY (profile_id) REFERENCES profiles(id) ON DELETE CASCADE,
    UNIQUE(profile_id, record_date)
);

CREATE INDEX IF NOT EXISTS idx_daily_profile ON daily_records(profile_id);
";

/// Apply pragmas and the schema to a connection.
///
/// Safe to call on every open; all statements are idempotent.
///
/// # Errors
///
/// Returns an error if a pragma or DDL statement fails.
pub fn apply_schema(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "temp_store", "MEMORY")?;

    conn.execute_batch(SCHEMA_SQL)?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        rusqlite::params![
            format!("v{CURRENT_SCHEMA_VERSION}"),
            chrono::Utc::now().timestamp_millis()
        ],
    )?;

    Ok(())
}
