//! Offline-first synchronization.
//!
//! This module owns everything between a local mutation and the "Up to
//! date" banner:
//!
//! - **Coordinator**: the state machine that owns the run list,
//!   connectivity, and the derived sync status
//! - **Events**: the explicit interface through which connectivity
//!   changes and attempt outcomes reach the coordinator
//! - **Remote**: the sync transport seam, with a simulated
//!   implementation standing in for a real backend
//! - **Driver**: runs a scheduled attempt against a remote and feeds
//!   the outcome back as an event
//! - **Status**: report types and the terminal banner
//!
//! # Architecture
//!
//! The coordinator uses a pending-flag pattern:
//! 1. Mutations while offline mark runs `pending_sync`; mutations
//!    while online schedule an attempt instead
//! 2. A scheduled attempt carries a ticket; outcomes with a stale
//!    ticket (cancelled by a connectivity drop) are ignored
//! 3. Success clears every flag and persists; failure preserves the
//!    flags and surfaces the error until a retry succeeds
//!
//! # Example
//!
//! ```ignore
//! use lab::storage::JsonFileStore;
//! use lab::sync::{drive_once, SimulatedRemote, SyncCoordinator};
//!
//! let store = JsonFileStore::new(path);
//! let mut coordinator = SyncCoordinator::load(store, true)?;
//!
//! coordinator.create_run("Titration 42", Some("SMP-7"), None)?;
//! drive_once(&mut coordinator, &SimulatedRemote::from_env())?;
//! assert_eq!(coordinator.pending_count(), 0);
//! ```

mod coordinator;
mod driver;
mod events;
mod remote;
mod status;

// Re-export main types and functions
pub use coordinator::SyncCoordinator;
pub use driver::{drive_once, SyncOutcome};
pub use events::{ScheduledSync, SyncEvent};
pub use remote::{RemoteSync, SimulatedRemote, SyncFailure};
pub use status::{print_banner, StatusReport, SyncStatus};
