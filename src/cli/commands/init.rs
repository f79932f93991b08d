//! Initialize the Lab Assistant run store.
//!
//! # Architecture
//!
//! Lab Assistant uses a **global store** architecture:
//! - **Run store**: an empty JSON document at
//!   `~/.labassistant/data/runs.json`, shared by every invocation.
//! - **Connectivity**: a `connectivity.json` sidecar next to the store,
//!   initialized to online.
//!
//! Run this once per machine (or once per test cycle with
//! `LAB_TEST_STORE=1`).

use crate::config::{connectivity_path, resolve_store_path, write_connectivity};
use crate::error::{Error, Result};
use crate::storage::{JsonFileStore, RunStore};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Serialize)]
struct InitOutput {
    store: PathBuf,
    connectivity: PathBuf,
    online: bool,
}

/// Execute the init command.
///
/// Creates an empty run store and an online connectivity sidecar.
///
/// # Errors
///
/// Returns [`Error::AlreadyInitialized`] if the store exists and
/// `--force` was not given, or an error if the files cannot be written.
pub fn execute(force: bool, store_path: Option<&PathBuf>, json: bool) -> Result<()> {
    let store_path = resolve_store_path(store_path.map(|p| p.as_path())).ok_or_else(|| {
        Error::Config("Could not determine global Lab Assistant directory".to_string())
    })?;

    if store_path.exists() && !force {
        return Err(Error::AlreadyInitialized { path: store_path });
    }

    let mut store = JsonFileStore::new(&store_path);
    store.save(&[])?;
    let state = write_connectivity(&store_path, true)?;

    if json {
        let output = InitOutput {
            connectivity: connectivity_path(&store_path),
            store: store_path,
            online: state.online,
        };
        let payload = serde_json::to_string(&output)?;
        println!("{payload}");
    } else {
        println!("Initialized Lab Assistant store");
        println!("  Store: {}", store_path.display());
        println!("  Connectivity: online");
        println!();
        println!("Next: Run 'lab run create \"Run name\"' to record your first run.");
    }

    Ok(())
}
