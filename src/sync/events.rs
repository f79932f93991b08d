//! Events and scheduled-attempt types for the sync coordinator.
//!
//! Connectivity changes, user mutations, and attempt outcomes are
//! discrete events handled serially. Each sync attempt carries a ticket;
//! outcome events with a ticket that no longer matches the in-flight
//! attempt are stale and ignored.

use serde::Serialize;

/// An event delivered to the sync coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Network connectivity changed.
    ConnectivityChanged { online: bool },

    /// The attempt identified by `ticket` finished successfully.
    SyncCompleted { ticket: u64 },

    /// The attempt identified by `ticket` failed.
    SyncFailed { ticket: u64, message: String },
}

/// A scheduled sync attempt, owned by the coordinator.
///
/// Tickets increase monotonically. Cancelling an attempt (for instance
/// on a connectivity drop) simply forgets the ticket, which voids any
/// outcome event still carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSync {
    /// Identity of this attempt.
    pub ticket: u64,
    /// Snapshot of the pending-run count when the attempt was scheduled.
    pub pending: usize,
}
