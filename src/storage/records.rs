//! Row-level access for profiles and their child collections.
//!
//! These functions take a plain `&Connection` so they can run either on the
//! storage connection or inside a `Transaction` (which derefs to one). The
//! backup importer composes them inside a single transaction.

use rusqlite::{Connection, OptionalExtension, Result, Row, params};

use crate::model::{DailyRecord, EventRecord, FeedingRecord, Profile, SleepRecord};

// ==================
// Profiles
// ==================

const PROFILE_COLUMNS: &str =
    "id, name, gender, birth_date, birth_weight, birth_height, blood_type, extra";

fn map_profile(row: &Row<'_>) -> Result<Profile> {
    Ok(Profile {
        id: row.get(0)?,
        name: row.get(1)?,
        gender: row.get(2)?,
        birth_date: row.get(3)?,
        birth_weight: row.get(4)?,
        birth_height: row.get(5)?,
        blood_type: row.get(6)?,
        extra: row.get(7)?,
    })
}

/// Insert a profile, ignoring `profile.id`. Returns the newly assigned id.
pub fn insert_profile(conn: &Connection, profile: &Profile) -> Result<i64> {
    conn.execute(
        "INSERT INTO profiles (name, gender, birth_date, birth_weight, birth_height, blood_type, extra)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            profile.name,
            profile.gender,
            profile.birth_date,
            profile.birth_weight,
            profile.birth_height,
            profile.blood_type,
            profile.extra,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// All profiles in id order.
pub fn list_profiles(conn: &Connection) -> Result<Vec<Profile>> {
    let mut stmt = conn.prepare(&format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY id"))?;
    let rows = stmt.query_map([], map_profile)?;
    rows.collect()
}

/// Get a profile by local id.
pub fn get_profile(conn: &Connection, id: i64) -> Result<Option<Profile>> {
    conn.query_row(
        &format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = ?1"),
        [id],
        map_profile,
    )
    .optional()
}

// ==================
// Feeding
// ==================

const FEEDING_COLUMNS: &str = "id, profile_id, feeding_type, feeding_start, feeding_end, feeding_duration,
     duration_breast_left, duration_breast_right, note, created_at, feeding_amount, baby_mood,
     feeding_location, solid_food_type, food_name, is_first_time";

fn map_feeding(row: &Row<'_>) -> Result<FeedingRecord> {
    Ok(FeedingRecord {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        feeding_type: row.get(2)?,
        feeding_start: row.get(3)?,
        feeding_end: row.get(4)?,
        feeding_duration: row.get(5)?,
        feeding_duration_breast_left: row.get(6)?,
        feeding_duration_breast_right: row.get(7)?,
        note: row.get(8)?,
        created_at: row.get(9)?,
        feeding_amount: row.get(10)?,
        baby_mood: row.get(11)?,
        feeding_location: row.get(12)?,
        solid_food_type: row.get(13)?,
        food_name: row.get(14)?,
        is_first_time: row.get(15)?,
    })
}

/// Insert a feeding record, ignoring `record.id`.
pub fn insert_feeding(conn: &Connection, record: &FeedingRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO feeding_records (profile_id, feeding_type, feeding_start, feeding_end,
            feeding_duration, duration_breast_left, duration_breast_right, note, created_at,
            feeding_amount, baby_mood, feeding_location, solid_food_type, food_name, is_first_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
        params![
            record.profile_id,
            record.feeding_type,
            record.feeding_start,
            record.feeding_end,
            record.feeding_duration,
            record.feeding_duration_breast_left,
            record.feeding_duration_breast_right,
            record.note,
            record.created_at,
            record.feeding_amount,
            record.baby_mood,
            record.feeding_location,
            record.solid_food_type,
            record.food_name,
            record.is_first_time,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Feeding records for one profile, oldest first.
pub fn list_feedings(conn: &Connection, profile_id: i64) -> Result<Vec<FeedingRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {FEEDING_COLUMNS} FROM feeding_records WHERE profile_id = ?1 ORDER BY id"
    ))?;
    let rows = stmt.query_map([profile_id], map_feeding)?;
    rows.collect()
}

// ==================
// Sleep
// ==================

fn map_sleep(row: &Row<'_>) -> Result<SleepRecord> {
    Ok(SleepRecord {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        sleep_start: row.get(2)?,
        sleep_end: row.get(3)?,
        sleep_duration: row.get(4)?,
        note: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Insert a sleep record, ignoring `record.id`.
pub fn insert_sleep(conn: &Connection, record: &SleepRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO sleep_records (profile_id, sleep_start, sleep_end, sleep_duration, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            record.profile_id,
            record.sleep_start,
            record.sleep_end,
            record.sleep_duration,
            record.note,
            record.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Sleep records for one profile, oldest first.
pub fn list_sleeps(conn: &Connection, profile_id: i64) -> Result<Vec<SleepRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, profile_id, sleep_start, sleep_end, sleep_duration, note, created_at
         FROM sleep_records WHERE profile_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map([profile_id], map_sleep)?;
    rows.collect()
}

// ==================
// Events
// ==================

fn map_event(row: &Row<'_>) -> Result<EventRecord> {
    Ok(EventRecord {
        id: row.get(0)?,
        event_type: row.get(1)?,
        profile_id: row.get(2)?,
        time: row.get(3)?,
        end_time: row.get(4)?,
        extra_data: row.get(5)?,
        note: row.get(6)?,
        created_at: row.get(7)?,
    })
}

/// Insert an event record, ignoring `record.id`.
pub fn insert_event(conn: &Connection, record: &EventRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO event_records (event_type, profile_id, time, end_time, extra_data, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.event_type,
            record.profile_id,
            record.time,
            record.end_time,
            record.extra_data,
            record.note,
            record.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Event records for one profile, oldest first.
pub fn list_events(conn: &Connection, profile_id: i64) -> Result<Vec<EventRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, event_type, profile_id, time, end_time, extra_data, note, created_at
         FROM event_records WHERE profile_id = ?1 ORDER BY id",
    )?;
    let rows = stmt.query_map([profile_id], map_event)?;
    rows.collect()
}

// ==================
// Daily snapshots
// ==================

const DAILY_COLUMNS: &str =
    "id, profile_id, record_date, weight, height, head_circumference, pic, extra";

fn map_daily(row: &Row<'_>) -> Result<DailyRecord> {
    Ok(DailyRecord {
        id: row.get(0)?,
        profile_id: row.get(1)?,
        record_date: row.get(2)?,
        weight: row.get(3)?,
        height: row.get(4)?,
        head_circumference: row.get(5)?,
        pic: row.get(6)?,
        extra: row.get(7)?,
    })
}

/// Insert a daily snapshot, ignoring `record.id`.
///
/// Fails with a constraint error if `(profile_id, record_date)` already exists.
pub fn insert_daily(conn: &Connection, record: &DailyRecord) -> Result<i64> {
    conn.execute(
        "INSERT INTO daily_records (profile_id, record_date, weight, height, head_circumference, pic, extra)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.profile_id,
            record.record_date,
            record.weight,
            record.height,
            record.head_circumference,
            record.pic,
            record.extra,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every field of the daily snapshot with local id `id`.
pub fn update_daily(conn: &Connection, id: i64, record: &DailyRecord) -> Result<()> {
    conn.execute(
        "UPDATE daily_records
         SET profile_id = ?1, record_date = ?2, weight = ?3, height = ?4,
             head_circumference = ?5, pic = ?6, extra = ?7
         WHERE id = ?8",
        params![
            record.profile_id,
            record.record_date,
            record.weight,
            record.height,
            record.head_circumference,
            record.pic,
            record.extra,
            id,
        ],
    )?;
    Ok(())
}

/// Daily snapshots for one profile, ordered by date.
pub fn list_dailies(conn: &Connection, profile_id: i64) -> Result<Vec<DailyRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {DAILY_COLUMNS} FROM daily_records WHERE profile_id = ?1 ORDER BY record_date, id"
    ))?;
    let rows = stmt.query_map([profile_id], map_daily)?;
    rows.collect()
}

/// The daily snapshot for `(profile_id, record_date)`, if any.
pub fn find_daily(conn: &Connection, profile_id: i64, record_date: i64) -> Result<Option<DailyRecord>> {
    conn.query_row(
        &format!(
            "SELECT {DAILY_COLUMNS} FROM daily_records WHERE profile_id = ?1 AND record_date = ?2"
        ),
        params![profile_id, record_date],
        map_daily,
    )
    .optional()
}

// ==================
// Bulk
// ==================

/// Delete every row of the five collections. Children go first so the
/// statement order does not depend on cascade support.
pub fn delete_all(conn: &Connection) -> Result<usize> {
    let mut removed = 0;
    for table in [
        "feeding_records",
        "sleep_records",
        "event_records",
        "daily_records",
        "profiles",
    ] {
        removed += conn.execute(&format!("DELETE FROM {table}"), [])?;
    }
    Ok(removed)
}
