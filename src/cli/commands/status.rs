//! Status command implementation.

use crate::config::{current_online, resolve_store_path};
use crate::error::{Error, Result};
use crate::model::RunStatus;
use crate::storage::JsonFileStore;
use crate::sync::{print_banner, StatusReport, SyncCoordinator};
use serde::Serialize;
use std::path::PathBuf;

/// Output for status command.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    store: PathBuf,
    runs: RunBreakdown,
    sync: StatusReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RunBreakdown {
    total: usize,
    in_progress: usize,
    complete: usize,
}

/// Execute status command.
///
/// Read-only: shows the store overview and the sync banner without
/// scheduling anything.
pub fn execute(store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    let online = current_online(&store_path);
    let coordinator = SyncCoordinator::load(JsonFileStore::new(&store_path), online)?;

    let runs = coordinator.runs();
    let in_progress = runs
        .iter()
        .filter(|r| r.status == RunStatus::InProgress)
        .count();
    let complete = runs
        .iter()
        .filter(|r| r.status == RunStatus::Complete)
        .count();

    if json {
        let output = StatusOutput {
            store: store_path,
            runs: RunBreakdown {
                total: runs.len(),
                in_progress,
                complete,
            },
            sync: coordinator.report(),
        };
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Lab Assistant Status");
        println!("====================");
        println!();
        println!("Store: {}", store_path.display());
        println!(
            "Runs:  {} ({in_progress} in progress, {complete} complete)",
            runs.len()
        );
        println!();
        print_banner(&coordinator.report());
    }

    Ok(())
}
