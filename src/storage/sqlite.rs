//! SQLite storage implementation.
//!
//! This module provides the main storage backend for babylog using SQLite.
//! Every write goes through [`SqliteStorage::mutate`], which wraps the work in
//! an IMMEDIATE transaction: the database-level write lock is taken up front,
//! so a second writer (another process running an import) blocks instead of
//! interleaving, and any error rolls the whole operation back.

use crate::error::Result;
use crate::model::{DailyRecord, EventRecord, FeedingRecord, Profile, SleepRecord};
use crate::storage::records;
use crate::storage::schema::apply_schema;
use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// SQLite-based storage backend.
#[derive(Debug)]
pub struct SqliteStorage {
    conn: Connection,
}

/// Row counts across the five collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoreCounts {
    pub profiles: usize,
    pub feedings: usize,
    pub sleeps: usize,
    pub events: usize,
    pub dailies: usize,
}

impl StoreCounts {
    /// Returns total number of rows.
    #[must_use]
    pub fn total(&self) -> usize {
        self.profiles + self.feedings + self.sleeps + self.events + self.dailies
    }
}

impl SqliteStorage {
    /// Open a database at the given path.
    ///
    /// Creates the database and applies schema if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open(path: &Path) -> Result<Self> {
        Self::open_with_timeout(path, None)
    }

    /// Open a database with an optional busy timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or schema fails.
    pub fn open_with_timeout(path: &Path, timeout_ms: Option<u64>) -> Result<Self> {
        let conn = Connection::open(path)?;

        if let Some(timeout) = timeout_ms {
            conn.busy_timeout(Duration::from_millis(timeout))?;
        } else {
            // Default 5 second timeout
            conn.busy_timeout(Duration::from_secs(5))?;
        }

        apply_schema(&conn)?;
        debug!(path = %path.display(), "Opened database");
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        apply_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Get a reference to the underlying connection (for read operations).
    #[must_use]
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Execute a mutation inside one IMMEDIATE transaction.
    ///
    /// The closure's error type only needs to absorb `rusqlite::Error`, so
    /// callers with their own error enum (the backup importer) can use this
    /// directly. Returning `Err` from the closure drops the transaction
    /// without committing, which rolls back every statement it ran.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a database error from begin/commit.
    pub fn mutate<F, R, E>(&mut self, op: &str, f: F) -> std::result::Result<R, E>
    where
        F: FnOnce(&Transaction) -> std::result::Result<R, E>,
        E: From<rusqlite::Error>,
    {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        debug!(op, "Begin write transaction");
        let result = f(&tx)?;
        tx.commit()?;
        debug!(op, "Committed write transaction");

        Ok(result)
    }

    /// Run a read-only closure inside one DEFERRED transaction.
    ///
    /// All queries inside the closure observe the same snapshot, so a
    /// multi-query read (an export) never mixes states of a concurrent writer.
    ///
    /// # Errors
    ///
    /// Returns the closure's error, or a database error from begin/finish.
    pub fn read<F, R, E>(&self, f: F) -> std::result::Result<R, E>
    where
        F: FnOnce(&Connection) -> std::result::Result<R, E>,
        E: From<rusqlite::Error>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let result = f(&tx)?;
        // Nothing was written; finishing releases the read snapshot.
        tx.finish()?;
        Ok(result)
    }

    // ==================
    // Profile Operations
    // ==================

    /// Create a new profile and return its local id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_profile(&mut self, profile: &Profile) -> Result<i64> {
        self.mutate("add_profile", |tx| Ok(records::insert_profile(tx, profile)?))
    }

    /// List all profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_profiles(&self) -> Result<Vec<Profile>> {
        Ok(records::list_profiles(&self.conn)?)
    }

    /// Get a profile by local id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_profile(&self, id: i64) -> Result<Option<Profile>> {
        Ok(records::get_profile(&self.conn, id)?)
    }

    // ==================
    // Record Operations
    // ==================

    /// Add a feeding record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails (e.g. unknown profile).
    pub fn add_feeding(&mut self, record: &FeedingRecord) -> Result<i64> {
        self.mutate("add_feeding", |tx| Ok(records::insert_feeding(tx, record)?))
    }

    /// Add a sleep record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_sleep(&mut self, record: &SleepRecord) -> Result<i64> {
        self.mutate("add_sleep", |tx| Ok(records::insert_sleep(tx, record)?))
    }

    /// Add an event record.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_event(&mut self, record: &EventRecord) -> Result<i64> {
        self.mutate("add_event", |tx| Ok(records::insert_event(tx, record)?))
    }

    /// Insert or replace the daily snapshot for `(profile_id, record_date)`.
    ///
    /// Returns the local id and whether an existing row was updated.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or write fails.
    pub fn upsert_daily(&mut self, record: &DailyRecord) -> Result<(i64, bool)> {
        self.mutate("upsert_daily", |tx| {
            match records::find_daily(tx, record.profile_id, record.record_date)? {
                Some(existing) => {
                    records::update_daily(tx, existing.id, record)?;
                    Ok((existing.id, true))
                }
                None => Ok((records::insert_daily(tx, record)?, false)),
            }
        })
    }

    /// Feeding records for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_feedings(&self, profile_id: i64) -> Result<Vec<FeedingRecord>> {
        Ok(records::list_feedings(&self.conn, profile_id)?)
    }

    /// Sleep records for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_sleeps(&self, profile_id: i64) -> Result<Vec<SleepRecord>> {
        Ok(records::list_sleeps(&self.conn, profile_id)?)
    }

    /// Event records for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_events(&self, profile_id: i64) -> Result<Vec<EventRecord>> {
        Ok(records::list_events(&self.conn, profile_id)?)
    }

    /// Daily snapshots for a profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_dailies(&self, profile_id: i64) -> Result<Vec<DailyRecord>> {
        Ok(records::list_dailies(&self.conn, profile_id)?)
    }

    /// Count rows in every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn counts(&self) -> Result<StoreCounts> {
        let count = |table: &str| -> rusqlite::Result<usize> {
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get::<_, i64>(0)
                })
                .map(|n| usize::try_from(n).unwrap_or(0))
        };

        Ok(StoreCounts {
            profiles: count("profiles")?,
            feedings: count("feeding_records")?,
            sleeps: count("sleep_records")?,
            events: count("event_records")?,
            dailies: count("daily_records")?,
        })
    }
}
