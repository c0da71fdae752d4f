//! babylog - local baby activity log with portable backups
//!
//! This crate provides the core functionality for the `babylog` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Profile, feeding/sleep/event/daily records)
//! - [`storage`] - SQLite database layer
//! - [`backup`] - JSON backup export, validation, overwrite and merge import, reports
//! - [`config`] - Paths and settings
//! - [`validate`] - Type-name normalization and time parsing for CLI input
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod validate;

pub use error::{Error, Result};
