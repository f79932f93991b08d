//! Simulated connectivity state.
//!
//! Connectivity lives in a small JSON sidecar next to the run store so
//! that `lab net online|offline` survives across invocations. The
//! `LAB_NET` environment variable overrides the stored value without
//! touching the file, which keeps tests and scripted demos isolated.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::storage::atomic_write;

/// Persisted connectivity toggle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityState {
    pub online: bool,
    /// Unix millis of the last transition.
    pub changed_at: i64,
}

impl ConnectivityState {
    #[must_use]
    pub fn new(online: bool) -> Self {
        Self {
            online,
            changed_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Sidecar file holding the connectivity toggle, next to the run store.
#[must_use]
pub fn connectivity_path(store_path: &Path) -> PathBuf {
    store_path.with_file_name("connectivity.json")
}

/// Read the stored connectivity state.
///
/// A missing or unreadable sidecar means online: a fresh install
/// starts connected.
#[must_use]
pub fn read_connectivity(store_path: &Path) -> ConnectivityState {
    let path = connectivity_path(store_path);
    if !path.exists() {
        return ConnectivityState::new(true);
    }
    fs::read_to_string(&path)
        .ok()
        .and_then(|content| serde_json::from_str(&content).ok())
        .unwrap_or_else(|| ConnectivityState::new(true))
}

/// Persist a connectivity transition.
///
/// # Errors
///
/// Returns an error if the sidecar cannot be written.
pub fn write_connectivity(store_path: &Path, online: bool) -> Result<ConnectivityState> {
    let state = ConnectivityState::new(online);
    let json = serde_json::to_string_pretty(&state)?;
    atomic_write(&connectivity_path(store_path), &json)?;
    Ok(state)
}

/// Effective connectivity for this invocation.
///
/// Priority:
/// 1. `LAB_NET` environment variable (`online`/`offline`, also accepts
///    `on`/`off`, `1`/`0`, `true`/`false`)
/// 2. Stored sidecar state
/// 3. Online (fresh install default)
#[must_use]
pub fn current_online(store_path: &Path) -> bool {
    if let Ok(value) = std::env::var("LAB_NET") {
        if let Some(online) = parse_net_override(&value) {
            return online;
        }
    }
    read_connectivity(store_path).online
}

fn parse_net_override(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "online" | "on" | "1" | "true" => Some(true),
        "offline" | "off" | "0" | "false" => Some(false),
        _ => None,
    }
}
