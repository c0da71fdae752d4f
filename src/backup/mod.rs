//! Backup export and import.
//!
//! - **Export**: store → [`Envelope`] → pretty JSON text
//! - **Parse**: text → validated [`Envelope`] or a typed [`BackupError`]
//! - **Import**: [`Envelope`] → store, by overwrite or deduplicating merge,
//!   inside one transaction, producing an [`ImportReport`]
//! - **Reports**: saved through a [`ReportStore`] for later audit
//!
//! # Example
//!
//! ```ignore
//! use babylog::backup::{parse_envelope, Exporter, Importer, ImportMode};
//!
//! let payload = Exporter::new(&storage).export()?;
//! let envelope = parse_envelope(&payload.json)?;
//! let report = Importer::new(&mut other).import(&envelope, ImportMode::Merge, 1)?;
//! ```

mod dedup;
mod envelope;
mod export;
mod extra;
mod file;
mod identity;
mod import;
mod parse;
mod report_store;
mod types;

pub use dedup::{bucket, Bucketing, DedupIndex};
pub use envelope::{Envelope, EnvelopeCounts, EnvelopeData, ImportPreview, SUPPORTED_VERSION};
pub use export::{backup_file_name, ExportPayload, Exporter};
pub use extra::{category_label, EventExtra, ExtraDecode};
pub use file::atomic_write;
pub use identity::{IdentityPlan, ProfileMap};
pub use import::Importer;
pub use parse::{check_references, parse_envelope, validate};
pub use report_store::{FsReportStore, ReportMeta, ReportStore};
pub use types::{
    BackupError, BackupResult, DailyStats, ImportErrorKind, ImportMode, ImportReport, ProfileStats,
    RecordStats,
};
