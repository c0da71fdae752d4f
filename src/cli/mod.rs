//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::backup::ImportMode;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable table (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
}

pub mod commands;

/// babylog - local baby activity log with portable backups
#[derive(Parser, Debug)]
#[command(name = "babylog", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (default: ~/.babylog/data/babylog.db)
    #[arg(long, global = true, env = "BABYLOG_DB")]
    pub db: Option<PathBuf>,

    /// Directory for saved import reports (default: ~/.babylog/reports)
    #[arg(long, global = true, env = "BABYLOG_REPORTS")]
    pub reports_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the local database
    Init {
        /// Overwrite existing database
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Baby profiles
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },

    /// Add and list feeding, sleep, event and daily records
    Record {
        #[command(subcommand)]
        command: RecordCommands,
    },

    /// Export, preview and import backups
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// Saved import reports
    Report {
        #[command(subcommand)]
        command: ReportCommands,
    },

    /// Settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Profile Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Add a profile
    Add(ProfileAddArgs),

    /// List profiles
    List,
}

#[derive(Args, Debug)]
pub struct ProfileAddArgs {
    /// Baby's name
    pub name: String,

    /// Gender
    #[arg(long, default_value = "")]
    pub gender: String,

    /// Birth date (YYYY-MM-DD or Unix ms)
    #[arg(long)]
    pub birth_date: String,

    /// Birth weight (kg)
    #[arg(long, default_value_t = 0.0)]
    pub birth_weight: f64,

    /// Birth height (cm)
    #[arg(long, default_value_t = 0.0)]
    pub birth_height: f64,

    /// Blood type
    #[arg(long, default_value = "")]
    pub blood_type: String,
}

// ============================================================================
// Record Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum RecordCommands {
    /// Log a feeding
    Feeding(FeedingArgs),

    /// Log a sleep
    Sleep(SleepArgs),

    /// Log an event (diaper, temperature, milestone, ...)
    Event(EventArgs),

    /// Set the daily growth snapshot (replaces the same date)
    Daily(DailyArgs),

    /// List a profile's records
    List {
        /// Profile id
        #[arg(long)]
        profile: i64,

        /// Only this kind of record
        #[arg(long, value_enum)]
        kind: Option<RecordKind>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Feeding,
    Sleep,
    Event,
    Daily,
}

#[derive(Args, Debug)]
pub struct FeedingArgs {
    /// Profile id
    #[arg(long)]
    pub profile: i64,

    /// Feeding type (breast, formula, mixed, solid, other, or a code)
    #[arg(long = "type", default_value = "breast")]
    pub feeding_type: String,

    /// Start time
    #[arg(long)]
    pub start: String,

    /// End time
    #[arg(long)]
    pub end: Option<String>,

    /// Left breast duration in minutes
    #[arg(long)]
    pub left: Option<i64>,

    /// Right breast duration in minutes
    #[arg(long)]
    pub right: Option<i64>,

    /// Amount (ml or g)
    #[arg(long)]
    pub amount: Option<i32>,

    /// Food name (solid feedings)
    #[arg(long)]
    pub food: Option<String>,

    /// First time trying this food
    #[arg(long)]
    pub first_time: bool,

    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(Args, Debug)]
pub struct SleepArgs {
    /// Profile id
    #[arg(long)]
    pub profile: i64,

    /// Start time
    #[arg(long)]
    pub start: String,

    /// End time
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(Args, Debug)]
pub struct EventArgs {
    /// Profile id
    #[arg(long)]
    pub profile: i64,

    /// Event type (wet, dirty, temperature, vaccine, walk, ... or a code)
    #[arg(long = "type")]
    pub event_type: String,

    /// Event time
    #[arg(long, default_value = "now")]
    pub time: String,

    /// End time for events with a duration
    #[arg(long)]
    pub end: Option<String>,

    /// Extra data as JSON (e.g. '{"value":37.9,"location":"ear"}')
    #[arg(long, default_value = "")]
    pub extra: String,

    #[arg(long, default_value = "")]
    pub note: String,
}

#[derive(Args, Debug)]
pub struct DailyArgs {
    /// Profile id
    #[arg(long)]
    pub profile: i64,

    /// Date (YYYY-MM-DD)
    #[arg(long)]
    pub date: String,

    /// Weight (kg)
    #[arg(long, default_value_t = 0.0)]
    pub weight: f64,

    /// Height (cm)
    #[arg(long, default_value_t = 0.0)]
    pub height: f64,

    /// Head circumference (cm)
    #[arg(long, default_value_t = 0.0)]
    pub head: f64,
}

// ============================================================================
// Backup Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Export everything to a backup file
    Export {
        /// Output file or directory (default: print to stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Show what a backup file contains without importing it
    Preview {
        /// Backup file
        file: PathBuf,
    },

    /// Import a backup file
    Import {
        /// Backup file
        file: PathBuf,

        /// Import strategy
        #[arg(long, value_enum)]
        mode: ImportModeArg,

        /// Dedup window in minutes for merge (0, 1, 5, 10; default from settings)
        #[arg(long)]
        bucket: Option<u32>,

        /// Persist the import report
        #[arg(long)]
        save_report: bool,
    },
}

/// CLI spelling of [`ImportMode`].
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportModeArg {
    /// Replace all local data
    Overwrite,
    /// Add only what is new
    Merge,
}

impl From<ImportModeArg> for ImportMode {
    fn from(arg: ImportModeArg) -> Self {
        match arg {
            ImportModeArg::Overwrite => Self::Overwrite,
            ImportModeArg::Merge => Self::Merge,
        }
    }
}

// ============================================================================
// Report Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// List saved reports, newest first
    List,

    /// Show one report
    Show {
        /// Report id
        id: String,
    },

    /// Write a report's raw JSON to a file or stdout
    Export {
        /// Report id
        id: String,

        /// Output file (default: stdout)
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Delete one report
    Delete {
        /// Report id
        id: String,
    },

    /// Delete all reports
    Clear,
}

// ============================================================================
// Config Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current settings
    Get,

    /// Set the merge dedup window in minutes (0, 1, 5 or 10)
    SetDedup {
        minutes: String,
    },
}
