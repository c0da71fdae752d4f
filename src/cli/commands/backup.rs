//! Backup command implementations (export, preview, import).
//!
//! The backup core works on strings; this is the layer that reads and
//! writes files.

use crate::backup::{
    atomic_write, parse_envelope, Exporter, FsReportStore, ImportMode, ImportPreview,
    ImportReport, Importer, ReportMeta, ReportStore,
};
use crate::cli::commands::open_storage;
use crate::cli::commands::report::print_report;
use crate::cli::{BackupCommands, ImportModeArg};
use crate::config::{
    bucket_minutes, load_settings, resolve_reports_dir, settings_path, DedupWindow,
    SettingsSource,
};
use crate::error::{Error, Result};
use crate::validate::format_timestamp;
use colored::Colorize;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Serialize)]
struct ExportOutput {
    path: PathBuf,
    counts: crate::backup::EnvelopeCounts,
}

#[derive(Serialize)]
struct ImportOutput {
    report: ImportReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_report: Option<ReportMeta>,
}

/// Execute backup commands.
pub fn execute(
    command: &BackupCommands,
    db_path: Option<&PathBuf>,
    reports_dir: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    match command {
        BackupCommands::Export { out } => export(out.as_deref(), db_path, json),
        BackupCommands::Preview { file } => preview(file, json),
        BackupCommands::Import {
            file,
            mode,
            bucket,
            save_report,
        } => import(
            file,
            *mode,
            *bucket,
            *save_report,
            db_path,
            reports_dir,
            json,
        ),
    }
}

fn export(out: Option<&Path>, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (_, storage) = open_storage(db_path)?;
    let payload = Exporter::new(&storage)
        .with_app_version(env!("CARGO_PKG_VERSION"))
        .export()?;

    let Some(out) = out else {
        println!("{}", payload.json);
        return Ok(());
    };

    let path = if out.is_dir() {
        out.join(&payload.file_name)
    } else {
        out.to_path_buf()
    };
    atomic_write(&path, &payload.json)?;
    info!(path = %path.display(), total = payload.counts.total(), "Exported backup");

    if json {
        let output = ExportOutput {
            path,
            counts: payload.counts,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let c = payload.counts;
        println!("Exported backup to {}", path.display().to_string().bold());
        println!(
            "  {} profiles, {} feedings, {} sleeps, {} events, {} daily records",
            c.profiles, c.feedings, c.sleeps, c.events, c.dailies
        );
    }
    Ok(())
}

fn read_backup(file: &Path) -> Result<String> {
    fs::read_to_string(file).map_err(|e| {
        Error::InvalidArgument(format!("cannot read backup file {}: {e}", file.display()))
    })
}

fn preview(file: &Path, json: bool) -> Result<()> {
    let envelope = parse_envelope(&read_backup(file)?)?;
    let preview = ImportPreview::from_envelope(&envelope);

    if json {
        println!("{}", serde_json::to_string(&preview)?);
        return Ok(());
    }

    let c = preview.counts;
    println!("{}", "Backup".cyan().bold());
    println!("  Format:    v{}", preview.version);
    println!("  Created:   {}", format_timestamp(preview.created_at));
    println!(
        "  App:       {}",
        preview.app_version.as_deref().unwrap_or("unknown")
    );
    println!("  Profiles:  {}", c.profiles);
    println!("  Feedings:  {}", c.feedings);
    println!("  Sleeps:    {}", c.sleeps);
    println!("  Events:    {}", c.events);
    println!("  Daily:     {}", c.dailies);
    Ok(())
}

/// `--bucket` wins over the settings file (and its env override).
fn resolve_bucket(explicit: Option<u32>, db_path: &Path) -> Result<u32> {
    let source: Box<dyn SettingsSource> = match explicit {
        Some(minutes) => Box::new(DedupWindow::from_minutes(minutes).ok_or_else(|| {
            Error::InvalidArgument(format!("invalid dedup bucket: {minutes}"))
        })?),
        None => Box::new(load_settings(&settings_path(db_path))?),
    };
    Ok(bucket_minutes(source.as_ref()))
}

fn import(
    file: &Path,
    mode: ImportModeArg,
    bucket: Option<u32>,
    save_report: bool,
    db_path: Option<&PathBuf>,
    reports_dir: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    // Parse before opening the store so a bad file never touches it.
    let envelope = parse_envelope(&read_backup(file)?)?;
    let (db_path, mut storage) = open_storage(db_path)?;

    let mode = ImportMode::from(mode);
    let bucket = match mode {
        ImportMode::Merge => resolve_bucket(bucket, &db_path)?,
        ImportMode::Overwrite => 0,
    };

    let report = Importer::new(&mut storage).import(&envelope, mode, bucket)?;

    let saved_report = if save_report {
        let dir = resolve_reports_dir(reports_dir.map(PathBuf::as_path)).ok_or_else(|| {
            Error::Config("Could not determine the report directory".to_string())
        })?;
        Some(FsReportStore::new(dir).save(&report)?)
    } else {
        None
    };

    if json {
        let output = ImportOutput {
            report,
            saved_report,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    println!("{} {}", "Imported".green().bold(), file.display());
    print_report(&report);
    if let Some(meta) = saved_report {
        println!();
        println!("Report saved as {}", meta.id.cyan());
    }
    Ok(())
}
