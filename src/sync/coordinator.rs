//! Sync coordinator: owns the run list and the sync state machine.
//!
//! One owned instance per process, generic over the [`RunStore`] seam.
//! All mutations flow through the coordinator so the pending-sync flags,
//! the derived status, and the persisted document stay consistent.
//!
//! # Status transitions
//!
//! Starting from `UpToDate`:
//!
//! - offline mutation, or connectivity drop with queued runs → `Pending`
//! - attempt scheduled (requires online) → `Syncing`
//! - attempt succeeds → `UpToDate`; attempt fails → `Error`
//! - manual retry or a new trigger from `Error` → `Syncing`
//! - connectivity drop from any state → rederived from the queue
//!
//! A mutation performed while offline marks the run `pending_sync` and
//! schedules nothing. The same mutation while online leaves the flag
//! unset and immediately schedules an attempt.

use crate::error::{Error, Result};
use crate::model::{Run, RunPatch};
use crate::storage::RunStore;
use crate::sync::events::{ScheduledSync, SyncEvent};
use crate::sync::status::{StatusReport, SyncStatus};
use crate::validate;

/// Coordinates local runs, connectivity, and sync attempts.
pub struct SyncCoordinator<S: RunStore> {
    store: S,
    runs: Vec<Run>,
    online: bool,
    status: SyncStatus,
    in_flight: Option<ScheduledSync>,
    last_error: Option<String>,
    next_ticket: u64,
}

impl<S: RunStore> SyncCoordinator<S> {
    /// Load the run list from the store and derive the initial status.
    ///
    /// Loading is not a change event: a pending queue loaded while
    /// online shows `Pending` until an event (mutation, reconnect,
    /// manual retry) triggers an attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: S, online: bool) -> Result<Self> {
        let runs = store.load()?;
        let mut coordinator = Self {
            store,
            runs,
            online,
            status: SyncStatus::UpToDate,
            in_flight: None,
            last_error: None,
            next_ticket: 1,
        };
        coordinator.derive_status();
        tracing::debug!(
            runs = coordinator.runs.len(),
            pending = coordinator.pending_count(),
            online,
            "coordinator loaded"
        );
        Ok(coordinator)
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Create a run.
    ///
    /// Validates the name, applies the mutation-under-connectivity rule,
    /// and persists the full run list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RequiredField`] for an empty name (nothing is
    /// created), or a store error if persisting fails.
    pub fn create_run(
        &mut self,
        name: &str,
        sample_id: Option<&str>,
        notes: Option<&str>,
    ) -> Result<Run> {
        let name = validate::require_non_empty("name", name)?;

        let mut run = Run::new(name);
        if let Some(sample_id) = sample_id {
            run = run.with_sample_id(sample_id);
        }
        if let Some(notes) = notes {
            run = run.with_notes(notes);
        }
        if !self.online {
            run.pending_sync = true;
        }

        tracing::info!(id = %run.id, online = self.online, "run created");
        self.runs.push(run.clone());
        self.persist()?;
        self.after_mutation();
        Ok(run)
    }

    /// Apply a partial update to an existing run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RunNotFound`] for an unknown id and
    /// [`Error::RequiredField`] for a patch that would empty the name;
    /// in both cases the run set is left unchanged.
    pub fn update_run(&mut self, id: &str, patch: RunPatch) -> Result<Run> {
        // Validate before touching anything so a bad patch is a no-op.
        let name = match &patch.name {
            Some(name) => Some(validate::require_non_empty("name", name)?),
            None => None,
        };

        let Some(index) = self.runs.iter().position(|r| r.id == id) else {
            return Err(self.unknown_run(id));
        };

        let run = &mut self.runs[index];
        if let Some(name) = name {
            run.name = name;
        }
        if let Some(sample_id) = patch.sample_id {
            run.sample_id = Some(sample_id);
        }
        if let Some(notes) = patch.notes {
            run.notes = Some(notes);
        }
        if let Some(status) = patch.status {
            run.status = status;
        }
        if !self.online {
            run.pending_sync = true;
        }
        let updated = run.clone();

        tracing::info!(id = %updated.id, online = self.online, "run updated");
        self.persist()?;
        self.after_mutation();
        Ok(updated)
    }

    // ── Events ────────────────────────────────────────────────

    /// Deliver an event to the coordinator.
    ///
    /// # Errors
    ///
    /// Returns a store error if a completion cannot persist the cleared
    /// pending flags.
    pub fn handle_event(&mut self, event: SyncEvent) -> Result<()> {
        match event {
            SyncEvent::ConnectivityChanged { online } => {
                self.set_connectivity(online);
                Ok(())
            }
            SyncEvent::SyncCompleted { ticket } => self.complete_attempt(ticket),
            SyncEvent::SyncFailed { ticket, message } => {
                self.fail_attempt(ticket, &message);
                Ok(())
            }
        }
    }

    /// Handle a connectivity transition.
    ///
    /// Going offline cancels the in-flight attempt (its ticket is
    /// forgotten, so a late outcome is ignored) and rederives the status
    /// from the queue. Coming online with queued runs schedules an
    /// attempt.
    pub fn set_connectivity(&mut self, online: bool) {
        if self.online == online {
            return;
        }
        self.online = online;
        tracing::info!(online, "connectivity changed");

        if online {
            if self.pending_count() > 0 {
                self.begin_attempt();
            } else {
                self.derive_status();
            }
        } else {
            if let Some(attempt) = self.in_flight.take() {
                tracing::debug!(
                    ticket = attempt.ticket,
                    "sync attempt cancelled by connectivity drop"
                );
            }
            self.derive_status();
        }
    }

    /// Manually schedule a sync attempt (the banner's retry action).
    ///
    /// Requires connectivity: returns `None` while offline. If an
    /// attempt is already in flight it is returned unchanged rather
    /// than superseded.
    pub fn retry_sync(&mut self) -> Option<&ScheduledSync> {
        if !self.online {
            tracing::debug!("retry requested while offline, ignoring");
            return None;
        }
        if self.in_flight.is_none() {
            self.begin_attempt();
        }
        self.in_flight.as_ref()
    }

    // ── Read side ─────────────────────────────────────────────

    /// Displayed synchronization status.
    #[must_use]
    pub const fn status(&self) -> SyncStatus {
        self.status
    }

    /// Last-known connectivity.
    #[must_use]
    pub const fn is_online(&self) -> bool {
        self.online
    }

    /// Number of runs with local changes awaiting sync.
    ///
    /// Always derived from the run set, never cached.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.runs.iter().filter(|r| r.pending_sync).count()
    }

    /// All runs, in storage order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Runs ordered by creation time, most recent first.
    #[must_use]
    pub fn recent(&self) -> Vec<&Run> {
        let mut runs: Vec<&Run> = self.runs.iter().collect();
        runs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        runs
    }

    /// Look up one run by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RunNotFound`] (with similar-id suggestions when
    /// available) for an unknown id.
    pub fn run(&self, id: &str) -> Result<&Run> {
        self.runs
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| self.unknown_run(id))
    }

    /// Message of the most recent failed attempt, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The in-flight attempt, if one is scheduled.
    #[must_use]
    pub const fn scheduled_sync(&self) -> Option<&ScheduledSync> {
        self.in_flight.as_ref()
    }

    /// Banner-ready snapshot of the current state.
    #[must_use]
    pub fn report(&self) -> StatusReport {
        StatusReport::new(
            self.online,
            self.status,
            self.pending_count(),
            self.last_error.clone(),
        )
    }

    // ── Internals ─────────────────────────────────────────────

    fn persist(&mut self) -> Result<()> {
        self.store.save(&self.runs)
    }

    /// Rederive the status from connectivity and the queue.
    ///
    /// Not applicable to `Error`, which is set by `fail_attempt` and
    /// survives until the next derivation point.
    fn derive_status(&mut self) {
        self.status = if self.in_flight.is_some() {
            SyncStatus::Syncing
        } else if self.pending_count() > 0 {
            SyncStatus::Pending
        } else {
            SyncStatus::UpToDate
        };
    }

    fn after_mutation(&mut self) {
        if self.online {
            self.begin_attempt();
        } else {
            self.derive_status();
        }
    }

    fn begin_attempt(&mut self) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        let pending = self.pending_count();
        tracing::debug!(ticket, pending, "sync attempt scheduled");
        self.in_flight = Some(ScheduledSync { ticket, pending });
        self.status = SyncStatus::Syncing;
    }

    fn complete_attempt(&mut self, ticket: u64) -> Result<()> {
        match self.in_flight.as_ref().map(|a| a.ticket) {
            Some(current) if current == ticket => {}
            Some(current) => {
                tracing::debug!(ticket, current, "stale sync completion, ignoring");
                return Ok(());
            }
            None => {
                tracing::debug!(ticket, "sync completion with no attempt in flight, ignoring");
                return Ok(());
            }
        }

        if !self.online {
            // Connectivity dropped between scheduling and completion:
            // the attempt is void, the queue keeps its flags.
            tracing::debug!(ticket, "sync completed while offline, keeping pending flags");
            self.in_flight = None;
            self.derive_status();
            return Ok(());
        }

        let cleared = self.pending_count();
        for run in &mut self.runs {
            run.pending_sync = false;
        }
        self.persist()?;
        self.in_flight = None;
        self.last_error = None;
        self.status = SyncStatus::UpToDate;
        tracing::info!(ticket, cleared, "sync completed");
        Ok(())
    }

    fn fail_attempt(&mut self, ticket: u64, message: &str) {
        match self.in_flight.as_ref().map(|a| a.ticket) {
            Some(current) if current == ticket => {}
            _ => {
                tracing::debug!(ticket, "stale sync failure, ignoring");
                return;
            }
        }

        // Pending flags are untouched: nothing is discarded on failure.
        self.in_flight = None;
        self.last_error = Some(message.to_string());
        self.status = SyncStatus::Error;
        tracing::warn!(ticket, message, "sync failed, pending changes preserved");
    }

    fn unknown_run(&self, id: &str) -> Error {
        let ids: Vec<String> = self.runs.iter().map(|r| r.id.clone()).collect();
        let similar = validate::find_similar_ids(id, &ids, 3);
        if similar.is_empty() {
            Error::RunNotFound { id: id.to_string() }
        } else {
            Error::RunNotFoundSimilar {
                id: id.to_string(),
                similar,
            }
        }
    }
}
