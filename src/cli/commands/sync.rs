//! Sync command implementations.
//!
//! `lab sync now` is the manual retry surfaced by the status banner.
//! Being offline is not an error here (there is simply nothing to do);
//! a failed attempt is, and exits with the sync error code so scripts
//! can tell the difference.

use crate::cli::SyncCommands;
use crate::config::{current_online, resolve_store_path};
use crate::error::{Error, Result};
use crate::storage::json_file::file_size;
use crate::storage::JsonFileStore;
use crate::sync::{drive_once, print_banner, SimulatedRemote, SyncCoordinator, SyncOutcome};
use colored::Colorize;
use std::path::PathBuf;

/// Execute sync commands.
pub fn execute(command: &SyncCommands, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        SyncCommands::Now => now(store_path, json),
        SyncCommands::Status => status(store_path, json),
    }
}

fn now(store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    let online = current_online(&store_path);
    let mut coordinator = SyncCoordinator::load(JsonFileStore::new(&store_path), online)?;

    if !coordinator.is_online() {
        let pending = coordinator.pending_count();
        if json {
            let output = serde_json::json!({
                "scheduled": false,
                "sync": coordinator.report(),
            });
            println!("{output}");
        } else {
            println!("Offline. Pending changes: {pending}");
            println!("Run 'lab net online' to reconnect, then 'lab sync now'.");
        }
        return Ok(());
    }

    let pending = coordinator.pending_count();
    if pending == 0 && coordinator.last_error().is_none() {
        if json {
            let output = serde_json::json!({
                "scheduled": false,
                "sync": coordinator.report(),
            });
            println!("{output}");
        } else {
            println!("Already up to date.");
        }
        return Ok(());
    }

    coordinator.retry_sync();
    if let Some(SyncOutcome::Failed { message }) =
        drive_once(&mut coordinator, &SimulatedRemote::from_env())?
    {
        return Err(Error::SyncFailed(message));
    }

    if json {
        let output = serde_json::json!({
            "scheduled": true,
            "synced": pending,
            "sync": coordinator.report(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Synced {pending} change(s). Up to date.");
    }
    Ok(())
}

fn status(store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    let online = current_online(&store_path);
    let coordinator = SyncCoordinator::load(JsonFileStore::new(&store_path), online)?;
    let report = coordinator.report();
    let pending: Vec<_> = coordinator
        .runs()
        .iter()
        .filter(|r| r.pending_sync)
        .collect();

    if json {
        let output = serde_json::json!({
            "sync": report,
            "pendingRuns": pending.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            "store": {
                "path": store_path,
                "sizeBytes": file_size(&store_path),
            },
        });
        println!("{output}");
    } else {
        print_banner(&report);
        println!();
        println!(
            "Store: {} ({} bytes)",
            store_path.display(),
            file_size(&store_path)
        );
        if !pending.is_empty() {
            println!("Pending runs:");
            for run in &pending {
                println!("  {} {}", run.id.dimmed(), run.name);
            }
        }
    }

    Ok(())
}
