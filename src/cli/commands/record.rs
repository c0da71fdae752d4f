//! Record command implementations (feedings, sleeps, events, daily snapshots).

use crate::backup::{category_label, EventExtra, ExtraDecode};
use crate::cli::commands::{open_storage, unknown_name};
use crate::cli::{DailyArgs, EventArgs, FeedingArgs, RecordCommands, RecordKind, SleepArgs};
use crate::error::{Error, Result};
use crate::model::{DailyRecord, EventRecord, FeedingRecord, SleepRecord};
use crate::storage::SqliteStorage;
use crate::validate::{
    format_date, format_timestamp, normalize_event_type, normalize_feeding_type, parse_date,
    parse_timestamp,
};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

const MINUTE_MS: i64 = 60_000;

#[derive(Serialize)]
struct AddOutput<'a> {
    kind: &'a str,
    id: i64,
    profile_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    updated: Option<bool>,
}

#[derive(Serialize, Default)]
struct RecordListOutput {
    profile_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    feedings: Option<Vec<FeedingRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sleeps: Option<Vec<SleepRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<Vec<EventRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dailies: Option<Vec<DailyRecord>>,
}

/// Execute record commands.
pub fn execute(command: &RecordCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        RecordCommands::Feeding(args) => feeding(args, db_path, json),
        RecordCommands::Sleep(args) => sleep(args, db_path, json),
        RecordCommands::Event(args) => event(args, db_path, json),
        RecordCommands::Daily(args) => daily(args, db_path, json),
        RecordCommands::List { profile, kind } => list(*profile, *kind, db_path, json),
    }
}

fn require_profile(storage: &SqliteStorage, id: i64) -> Result<()> {
    match storage.get_profile(id)? {
        Some(_) => Ok(()),
        None => Err(Error::ProfileNotFound { id }),
    }
}

fn time_arg(raw: &str) -> Result<i64> {
    parse_timestamp(raw).map_err(Error::InvalidArgument)
}

fn end_arg(raw: Option<&String>, start: i64) -> Result<(i64, i64)> {
    let Some(raw) = raw else {
        return Ok((0, 0));
    };
    let end = time_arg(raw)?;
    if end < start {
        return Err(Error::InvalidArgument(format!(
            "end time {raw} is before the start time"
        )));
    }
    Ok((end, end - start))
}

fn print_added(output: &AddOutput<'_>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(output)?);
    } else {
        let verb = if output.updated == Some(true) {
            "Updated"
        } else {
            "Added"
        };
        println!(
            "{verb} {} {} for profile {}",
            output.kind,
            output.id.to_string().cyan(),
            output.profile_id
        );
    }
    Ok(())
}

fn feeding(args: &FeedingArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let feeding_type =
        normalize_feeding_type(&args.feeding_type).map_err(|e| unknown_name("feeding type", e))?;
    let start = time_arg(&args.start)?;
    let (end, duration) = end_arg(args.end.as_ref(), start)?;

    let (_, mut storage) = open_storage(db_path)?;
    require_profile(&storage, args.profile)?;

    let record = FeedingRecord {
        profile_id: args.profile,
        feeding_type,
        feeding_start: start,
        feeding_end: end,
        feeding_duration: duration,
        feeding_duration_breast_left: args.left.unwrap_or(0) * MINUTE_MS,
        feeding_duration_breast_right: args.right.unwrap_or(0) * MINUTE_MS,
        note: args.note.clone(),
        created_at: Utc::now().timestamp_millis(),
        feeding_amount: args.amount,
        food_name: args.food.clone(),
        is_first_time: args.first_time,
        ..FeedingRecord::default()
    };
    let id = storage.add_feeding(&record)?;

    print_added(
        &AddOutput {
            kind: "feeding",
            id,
            profile_id: args.profile,
            updated: None,
        },
        json,
    )
}

fn sleep(args: &SleepArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let start = time_arg(&args.start)?;
    let (end, duration) = end_arg(args.end.as_ref(), start)?;

    let (_, mut storage) = open_storage(db_path)?;
    require_profile(&storage, args.profile)?;

    let id = storage.add_sleep(&SleepRecord {
        profile_id: args.profile,
        sleep_start: start,
        sleep_end: end,
        sleep_duration: duration,
        note: args.note.clone(),
        created_at: Utc::now().timestamp_millis(),
        ..SleepRecord::default()
    })?;

    print_added(
        &AddOutput {
            kind: "sleep",
            id,
            profile_id: args.profile,
            updated: None,
        },
        json,
    )
}

fn event(args: &EventArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let event_type =
        normalize_event_type(&args.event_type).map_err(|e| unknown_name("event type", e))?;
    let time = time_arg(&args.time)?;
    let (end_time, _) = end_arg(args.end.as_ref(), time)?;

    if let ExtraDecode::Malformed { reason } = EventExtra::decode(event_type, &args.extra) {
        return Err(Error::InvalidArgument(format!(
            "extra data does not fit a {} event: {reason}",
            category_label(event_type)
        )));
    }

    let (_, mut storage) = open_storage(db_path)?;
    require_profile(&storage, args.profile)?;

    let id = storage.add_event(&EventRecord {
        profile_id: args.profile,
        event_type,
        time,
        end_time,
        extra_data: args.extra.clone(),
        note: args.note.clone(),
        created_at: Utc::now().timestamp_millis(),
        ..EventRecord::default()
    })?;

    print_added(
        &AddOutput {
            kind: "event",
            id,
            profile_id: args.profile,
            updated: None,
        },
        json,
    )
}

fn daily(args: &DailyArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let record_date = parse_date(&args.date).map_err(Error::InvalidArgument)?;

    let (_, mut storage) = open_storage(db_path)?;
    require_profile(&storage, args.profile)?;

    let (id, updated) = storage.upsert_daily(&DailyRecord {
        profile_id: args.profile,
        record_date,
        weight: args.weight,
        height: args.height,
        head_circumference: args.head,
        ..DailyRecord::default()
    })?;

    print_added(
        &AddOutput {
            kind: "daily",
            id,
            profile_id: args.profile,
            updated: Some(updated),
        },
        json,
    )
}

fn list(
    profile_id: i64,
    kind: Option<RecordKind>,
    db_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    let (_, storage) = open_storage(db_path)?;
    require_profile(&storage, profile_id)?;

    let wants = |k: RecordKind| kind.is_none_or(|only| only == k);
    let mut output = RecordListOutput {
        profile_id,
        ..RecordListOutput::default()
    };
    if wants(RecordKind::Feeding) {
        output.feedings = Some(storage.list_feedings(profile_id)?);
    }
    if wants(RecordKind::Sleep) {
        output.sleeps = Some(storage.list_sleeps(profile_id)?);
    }
    if wants(RecordKind::Event) {
        output.events = Some(storage.list_events(profile_id)?);
    }
    if wants(RecordKind::Daily) {
        output.dailies = Some(storage.list_dailies(profile_id)?);
    }

    if json {
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if let Some(feedings) = &output.feedings {
        println!("{}", format!("Feedings ({})", feedings.len()).cyan().bold());
        for f in feedings {
            let minutes = f.feeding_duration / MINUTE_MS;
            let amount = f
                .feeding_amount
                .map(|a| format!(" {a}ml"))
                .unwrap_or_default();
            let food = f
                .food_name
                .as_deref()
                .map(|n| format!(" {n}"))
                .unwrap_or_default();
            println!(
                "  {}  {}  type {}{amount}{food}  {}",
                f.id.to_string().dimmed(),
                format_timestamp(f.feeding_start),
                f.feeding_type,
                format!("{minutes} min").dimmed()
            );
        }
    }

    if let Some(sleeps) = &output.sleeps {
        println!("{}", format!("Sleeps ({})", sleeps.len()).cyan().bold());
        for s in sleeps {
            println!(
                "  {}  {} → {}  {}",
                s.id.to_string().dimmed(),
                format_timestamp(s.sleep_start),
                format_timestamp(s.sleep_end),
                format!("{} min", s.sleep_duration / MINUTE_MS).dimmed()
            );
        }
    }

    if let Some(events) = &output.events {
        println!("{}", format!("Events ({})", events.len()).cyan().bold());
        for e in events {
            let detail = match EventExtra::decode(e.event_type, &e.extra_data) {
                ExtraDecode::Decoded(extra) => extra.summary(),
                ExtraDecode::Empty => String::new(),
                ExtraDecode::Malformed { .. } => "(unreadable extra data)".to_string(),
            };
            println!(
                "  {}  {}  {} {}  {}",
                e.id.to_string().dimmed(),
                format_timestamp(e.time),
                category_label(e.event_type),
                e.event_type,
                detail.dimmed()
            );
        }
    }

    if let Some(dailies) = &output.dailies {
        println!("{}", format!("Daily ({})", dailies.len()).cyan().bold());
        for d in dailies {
            println!(
                "  {}  {}  {:.2} kg  {:.1} cm  head {:.1} cm",
                d.id.to_string().dimmed(),
                format_date(d.record_date),
                d.weight,
                d.height,
                d.head_circumference
            );
        }
    }

    Ok(())
}
