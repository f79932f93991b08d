//! Connectivity command implementations.
//!
//! Connectivity is simulated: `lab net online|offline` flips a stored
//! toggle, and the transition is delivered to the coordinator as a
//! connectivity event so reconnection schedules a sync when changes
//! are queued. `LAB_NET` overrides the stored toggle per invocation.

use crate::cli::NetCommands;
use crate::config::{current_online, read_connectivity, resolve_store_path, write_connectivity};
use crate::error::{Error, Result};
use crate::storage::JsonFileStore;
use crate::sync::{drive_once, SimulatedRemote, SyncCoordinator, SyncEvent, SyncOutcome};
use std::path::PathBuf;

/// Execute net commands.
pub fn execute(command: &NetCommands, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        NetCommands::Online => transition(true, store_path, json),
        NetCommands::Offline => transition(false, store_path, json),
        NetCommands::Status => status(store_path, json),
    }
}

fn transition(online: bool, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    // Load with the previous connectivity so the flip arrives as an
    // event, which is what schedules a sync on reconnect.
    let was_online = read_connectivity(&store_path).online;
    write_connectivity(&store_path, online)?;

    let mut coordinator = SyncCoordinator::load(JsonFileStore::new(&store_path), was_online)?;
    coordinator.handle_event(SyncEvent::ConnectivityChanged { online })?;
    let outcome = drive_once(&mut coordinator, &SimulatedRemote::from_env())?;

    if json {
        let output = serde_json::json!({
            "online": online,
            "sync": coordinator.report(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "Connectivity: {}",
            if online { "online" } else { "offline" }
        );
        match outcome {
            Some(SyncOutcome::Completed) => {
                println!("Synced pending changes. Up to date.");
            }
            Some(SyncOutcome::Failed { message }) => {
                println!("⚠️  Sync failed: {message} (changes saved locally)");
                println!("    Run 'lab sync now' to retry.");
            }
            None => {
                let pending = coordinator.pending_count();
                if pending > 0 {
                    println!("Pending changes: {pending}");
                }
            }
        }
    }

    Ok(())
}

fn status(store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    let stored = read_connectivity(&store_path);
    let effective = current_online(&store_path);

    if json {
        let output = serde_json::json!({
            "online": effective,
            "stored": stored.online,
            "changedAt": stored.changed_at,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!(
            "Connectivity: {}",
            if effective { "online" } else { "offline" }
        );
        if effective != stored.online {
            println!(
                "  (LAB_NET override active; stored: {})",
                if stored.online { "online" } else { "offline" }
            );
        }
    }

    Ok(())
}
