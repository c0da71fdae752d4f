//! Profile command implementations.

use crate::cli::commands::open_storage;
use crate::cli::{ProfileAddArgs, ProfileCommands};
use crate::error::{Error, Result};
use crate::model::Profile;
use crate::validate::{format_date, parse_date};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct ProfileListOutput {
    profiles: Vec<Profile>,
    count: usize,
}

/// Execute profile commands.
pub fn execute(command: &ProfileCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        ProfileCommands::Add(args) => add(args, db_path, json),
        ProfileCommands::List => list(db_path, json),
    }
}

fn add(args: &ProfileAddArgs, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    if args.name.trim().is_empty() {
        return Err(Error::InvalidArgument("profile name must not be empty".into()));
    }
    let birth_date = parse_date(&args.birth_date).map_err(Error::InvalidArgument)?;

    let (_, mut storage) = open_storage(db_path)?;
    let mut profile = Profile {
        birth_weight: args.birth_weight,
        birth_height: args.birth_height,
        blood_type: args.blood_type.clone(),
        ..Profile::new(args.name.trim(), args.gender.trim(), birth_date)
    };
    profile.id = storage.add_profile(&profile)?;

    if json {
        println!("{}", serde_json::to_string(&profile)?);
    } else {
        println!(
            "Added profile {} {}",
            profile.id.to_string().cyan(),
            profile.name.bold()
        );
    }
    Ok(())
}

fn list(db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let (_, storage) = open_storage(db_path)?;
    let profiles = storage.list_profiles()?;

    if json {
        let output = ProfileListOutput {
            count: profiles.len(),
            profiles,
        };
        println!("{}", serde_json::to_string(&output)?);
        return Ok(());
    }

    if profiles.is_empty() {
        println!("No profiles.");
        return Ok(());
    }

    for p in &profiles {
        println!(
            "{:>4}  {}  {}",
            p.id.to_string().cyan(),
            p.name.bold(),
            format!("{} born {}", p.gender, format_date(p.birth_date)).dimmed()
        );
    }
    Ok(())
}
