//! `config` command implementations.

use crate::cli::ConfigCommands;
use crate::config::{
    load_settings, resolve_db_path, save_settings, settings_path, DedupWindow, SettingsSource,
    DEDUP_ENV,
};
use crate::error::{Error, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct SettingsOutput {
    dedup_minutes: u32,
    path: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    env_override: Option<String>,
}

/// Execute config commands.
pub fn execute(command: &ConfigCommands, db_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let db_path = resolve_db_path(db_path.map(PathBuf::as_path)).ok_or_else(|| {
        Error::Config("Could not determine the babylog data directory".to_string())
    })?;
    let path = settings_path(&db_path);

    match command {
        ConfigCommands::Get => {
            let settings = load_settings(&path)?;
            let window = settings.dedup_window();
            let output = SettingsOutput {
                dedup_minutes: window.minutes(),
                path,
                env_override: std::env::var(DEDUP_ENV).ok(),
            };

            if json {
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("dedup window: {window}");
                println!("settings:     {}", output.path.display());
                if let Some(raw) = output.env_override {
                    println!("override:     {DEDUP_ENV}={raw}");
                }
            }
        }
        ConfigCommands::SetDedup { minutes } => {
            let window = DedupWindow::parse(minutes)?;
            let mut settings = load_settings(&path)?;
            settings.set_dedup_window(window);
            save_settings(&path, &settings)?;

            if json {
                let output = SettingsOutput {
                    dedup_minutes: window.minutes(),
                    path,
                    env_override: None,
                };
                println!("{}", serde_json::to_string(&output)?);
            } else {
                println!("dedup window set to {window}");
            }
        }
    }
    Ok(())
}
