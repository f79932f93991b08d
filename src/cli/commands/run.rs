//! Run command implementations.
//!
//! Mutations go through the sync coordinator so the pending-sync flags
//! and the persisted document stay consistent, then any scheduled
//! attempt is driven to its outcome before the process exits. A failed
//! attempt is a warning, not an error: the mutation itself already
//! succeeded locally.

use crate::cli::{RunCommands, RunCreateArgs, RunListArgs, RunUpdateArgs};
use crate::config::{current_online, resolve_store_path};
use crate::error::{Error, Result};
use crate::model::{Run, RunPatch, RunStatus};
use crate::storage::JsonFileStore;
use crate::sync::{drive_once, SimulatedRemote, SyncCoordinator, SyncOutcome};
use serde::Serialize;
use std::path::PathBuf;

/// Execute run commands.
pub fn execute(command: &RunCommands, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    match command {
        RunCommands::Create(args) => create(args, store_path, json),
        RunCommands::List(args) => list(args, store_path, json),
        RunCommands::Show { id } => show(id, store_path, json),
        RunCommands::Update(args) => update(args, store_path, json),
        RunCommands::Complete { ids } => set_status(ids, RunStatus::Complete, store_path, json),
        RunCommands::Reopen { ids } => set_status(ids, RunStatus::InProgress, store_path, json),
    }
}

/// Open the coordinator against the resolved store.
fn open_coordinator(store_path: Option<&PathBuf>) -> Result<SyncCoordinator<JsonFileStore>> {
    let store_path =
        resolve_store_path(store_path.map(|p| p.as_path())).ok_or(Error::NotInitialized)?;

    if !store_path.exists() {
        return Err(Error::NotInitialized);
    }

    let online = current_online(&store_path);
    SyncCoordinator::load(JsonFileStore::new(store_path), online)
}

/// Parse a user-supplied status value, with suggestions on typos.
fn parse_status_arg(value: &str) -> Result<RunStatus> {
    match crate::validate::normalize_status(value) {
        Ok(canonical) => Ok(RunStatus::from_str(&canonical)),
        Err((value, suggestion)) => Err(Error::InvalidStatus { value, suggestion }),
    }
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}

/// One line about where sync landed after a mutation.
fn print_sync_note(coordinator: &SyncCoordinator<JsonFileStore>, outcome: Option<&SyncOutcome>) {
    match outcome {
        Some(SyncOutcome::Completed) => println!("  Sync: up to date"),
        Some(SyncOutcome::Failed { message }) => {
            println!("⚠️  Sync failed: {message} (changes saved locally)");
            println!("    Run 'lab sync now' to retry.");
        }
        None => {
            let pending = coordinator.pending_count();
            if pending > 0 {
                println!("  Sync: pending ({pending} queued, offline)");
            }
        }
    }
}

fn create(args: &RunCreateArgs, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let mut coordinator = open_coordinator(store_path)?;

    let run = coordinator.create_run(&args.name, args.sample.as_deref(), args.notes.as_deref())?;
    let outcome = drive_once(&mut coordinator, &SimulatedRemote::from_env())?;

    if json {
        let output = serde_json::json!({
            "run": run,
            "sync": coordinator.report(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Created run [{}] {}", run.id, run.name);
        println!("  Status: {}", run.status.as_str());
        if let Some(ref sample) = run.sample_id {
            println!("  Sample: {sample}");
        }
        print_sync_note(&coordinator, outcome.as_ref());
    }

    Ok(())
}

#[derive(Serialize)]
struct RunListOutput<'a> {
    count: usize,
    runs: Vec<&'a Run>,
}

fn list(args: &RunListArgs, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let coordinator = open_coordinator(store_path)?;

    let status_filter = if args.status == "all" {
        None
    } else {
        Some(parse_status_arg(&args.status)?)
    };

    let mut runs: Vec<&Run> = coordinator
        .recent()
        .into_iter()
        .filter(|r| status_filter.is_none_or(|s| r.status == s))
        .filter(|r| !args.pending || r.pending_sync)
        .collect();
    runs.truncate(args.limit);

    if json {
        let output = RunListOutput {
            count: runs.len(),
            runs,
        };
        println!("{}", serde_json::to_string(&output)?);
    } else if runs.is_empty() {
        println!("No runs found.");
    } else {
        print_run_list(&runs);
    }

    Ok(())
}

/// Print formatted run list to stdout.
fn print_run_list(runs: &[&Run]) {
    println!("Runs ({} found):", runs.len());
    println!();
    for run in runs {
        let status_icon = match run.status {
            RunStatus::InProgress => "●",
            RunStatus::Complete => "✓",
        };
        let pending = if run.pending_sync {
            " (pending sync)"
        } else {
            ""
        };
        println!("{} [{}] {}{}", status_icon, run.id, run.name, pending);
        if let Some(ref sample) = run.sample_id {
            println!("        Sample: {sample}");
        }
    }
}

fn show(id: &str, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let coordinator = open_coordinator(store_path)?;
    let run = coordinator.run(id)?;

    if json {
        println!("{}", serde_json::to_string(run)?);
    } else {
        println!("[{}] {}", run.id, run.name);
        println!();
        println!("Status:   {}", run.status.as_str());
        if let Some(ref sample) = run.sample_id {
            println!("Sample:   {sample}");
        }
        println!("Created:  {}", format_timestamp(run.created_at));
        if run.pending_sync {
            println!("Sync:     pending");
        }
        if let Some(ref notes) = run.notes {
            println!();
            println!("Notes:");
            println!("{notes}");
        }
    }

    Ok(())
}

fn update(args: &RunUpdateArgs, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let patch = RunPatch {
        name: args.name.clone(),
        sample_id: args.sample.clone(),
        notes: args.notes.clone(),
        status: args.status.as_deref().map(parse_status_arg).transpose()?,
    };

    if patch.is_empty() {
        return Err(Error::InvalidArgument(
            "nothing to update; pass at least one of --name, --sample, --notes, --status"
                .to_string(),
        ));
    }

    let mut coordinator = open_coordinator(store_path)?;
    let run = coordinator.update_run(&args.id, patch)?;
    let outcome = drive_once(&mut coordinator, &SimulatedRemote::from_env())?;

    if json {
        let output = serde_json::json!({
            "run": run,
            "sync": coordinator.report(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("Updated run [{}] {}", run.id, run.name);
        println!("  Status: {}", run.status.as_str());
        print_sync_note(&coordinator, outcome.as_ref());
    }

    Ok(())
}

fn set_status(
    ids: &[String],
    status: RunStatus,
    store_path: Option<&PathBuf>,
    json: bool,
) -> Result<()> {
    if ids.is_empty() {
        return Err(Error::InvalidArgument("no run IDs given".to_string()));
    }

    let mut coordinator = open_coordinator(store_path)?;

    let mut updated = Vec::new();
    for id in ids {
        let patch = RunPatch {
            status: Some(status),
            ..Default::default()
        };
        updated.push(coordinator.update_run(id, patch)?);
    }
    let outcome = drive_once(&mut coordinator, &SimulatedRemote::from_env())?;

    if json {
        let output = serde_json::json!({
            "runs": updated,
            "sync": coordinator.report(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let (icon, verb) = match status {
            RunStatus::Complete => ("✓", "Completed"),
            RunStatus::InProgress => ("○", "Reopened"),
        };
        for run in &updated {
            println!("{} {} run [{}] {}", icon, verb, run.id, run.name);
        }
        print_sync_note(&coordinator, outcome.as_ref());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status_arg() {
        assert_eq!(parse_status_arg("complete").unwrap(), RunStatus::Complete);
        assert_eq!(parse_status_arg("done").unwrap(), RunStatus::Complete);
        assert_eq!(parse_status_arg("wip").unwrap(), RunStatus::InProgress);

        let err = parse_status_arg("complet").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidStatus {
                suggestion: Some(_),
                ..
            }
        ));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0), "1970-01-01 00:00 UTC");
        // Out-of-range values fall back to the raw number.
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
    }
}
