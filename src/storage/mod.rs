//! SQLite storage layer for babylog.
//!
//! This module provides the persistence layer using SQLite with:
//! - WAL mode for concurrent reads
//! - Transaction discipline for atomic writes
//! - Foreign keys from every child record to its profile
//!
//! # Submodules
//!
//! - [`records`] - Row-level access usable inside a transaction
//! - [`schema`] - Database schema definitions
//! - [`sqlite`] - Main SQLite storage implementation

pub mod records;
pub mod schema;
pub mod sqlite;

pub use sqlite::{SqliteStorage, StoreCounts};
