//! Saved import report commands.

use crate::backup::{atomic_write, FsReportStore, ImportMode, ImportReport, ReportMeta, ReportStore};
use crate::cli::ReportCommands;
use crate::config::resolve_reports_dir;
use crate::error::{Error, Result};
use crate::validate::format_timestamp;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ReportListOutput {
    reports: Vec<ReportMeta>,
    count: usize,
}

#[derive(Serialize)]
struct ReportDeleteOutput {
    deleted: usize,
}

/// Execute report commands.
pub fn execute(command: &ReportCommands, reports_dir: Option<&PathBuf>, json: bool) -> Result<()> {
    let dir = resolve_reports_dir(reports_dir.map(PathBuf::as_path))
        .ok_or_else(|| Error::Config("Could not determine the report directory".to_string()))?;
    let store = FsReportStore::new(dir);

    match command {
        ReportCommands::List => list(&store, json),
        ReportCommands::Show { id } => show(&store, id, json),
        ReportCommands::Export { id, out } => export(&store, id, out.as_ref(), json),
        ReportCommands::Delete { id } => {
            store.delete(id)?;
            print_deleted(1, json)
        }
        ReportCommands::Clear => {
            let deleted = store.clear_all()?;
            print_deleted(deleted, json)
        }
    }
}

fn list(store: &FsReportStore, json: bool) -> Result<()> {
    let reports = store.list()?;

    if json {
        let output = ReportListOutput {
            count: reports.len(),
            reports,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("No saved reports.");
        return Ok(());
    }
    for meta in &reports {
        println!(
            "{}  {}",
            meta.id.cyan(),
            format_timestamp(meta.saved_at).dimmed()
        );
    }
    Ok(())
}

fn show(store: &FsReportStore, id: &str, json: bool) -> Result<()> {
    let report = store.load(id)?;
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!("{}", id.cyan().bold());
        print_report(&report);
    }
    Ok(())
}

fn export(store: &FsReportStore, id: &str, out: Option<&PathBuf>, json: bool) -> Result<()> {
    let raw = store.export_raw(id)?;
    match out {
        Some(path) => {
            atomic_write(path, &raw)?;
            if json {
                println!("{}", serde_json::json!({ "path": path }));
            } else {
                println!("Wrote {}", path.display());
            }
        }
        None => println!("{raw}"),
    }
    Ok(())
}

fn print_deleted(deleted: usize, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&ReportDeleteOutput { deleted })?);
    } else {
        println!("Deleted {deleted} report(s).");
    }
    Ok(())
}

/// Human-readable report body shared by `backup import` and `report show`.
pub(crate) fn print_report(report: &ImportReport) {
    println!(
        "  Strategy:  {}{}",
        report.strategy,
        if report.strategy == ImportMode::Merge {
            format!(" ({} min buckets)", report.bucket_minutes)
        } else {
            String::new()
        }
    );
    println!("  When:      {}", format_timestamp(report.imported_at));
    println!(
        "  Profiles:  {} inserted, {} matched{}",
        report.profiles.inserted,
        report.profiles.matched,
        if report.profiles.duplicate_in_backup > 0 {
            format!(
                ", {} duplicated in backup",
                report.profiles.duplicate_in_backup
            )
            .yellow()
            .to_string()
        } else {
            String::new()
        }
    );
    for (label, stats) in [
        ("Feedings", report.feedings),
        ("Sleeps", report.sleeps),
        ("Events", report.events),
    ] {
        println!(
            "  {:<10} {} inserted, {} skipped",
            format!("{label}:"),
            stats.inserted,
            stats.skipped
        );
    }
    println!(
        "  Daily:     {} inserted, {} updated",
        report.dailies.inserted, report.dailies.updated
    );
}
