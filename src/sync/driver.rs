//! Drives a scheduled sync attempt through a remote and feeds the
//! outcome back to the coordinator as an event.

use crate::error::Result;
use crate::storage::RunStore;
use crate::sync::coordinator::SyncCoordinator;
use crate::sync::events::SyncEvent;
use crate::sync::remote::RemoteSync;

/// What happened to the attempt that was driven.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed,
    Failed { message: String },
}

/// Run the coordinator's in-flight attempt to completion.
///
/// Returns `Ok(None)` when nothing is scheduled. The remote's outcome
/// is delivered back through [`SyncCoordinator::handle_event`] so the
/// usual staleness and connectivity checks apply.
///
/// # Errors
///
/// Returns a store error if a successful attempt cannot persist the
/// cleared pending flags.
pub fn drive_once<S: RunStore, R: RemoteSync>(
    coordinator: &mut SyncCoordinator<S>,
    remote: &R,
) -> Result<Option<SyncOutcome>> {
    let Some(attempt) = coordinator.scheduled_sync().cloned() else {
        return Ok(None);
    };

    match remote.perform(&attempt) {
        Ok(()) => {
            coordinator.handle_event(SyncEvent::SyncCompleted {
                ticket: attempt.ticket,
            })?;
            Ok(Some(SyncOutcome::Completed))
        }
        Err(failure) => {
            let message = failure.to_string();
            coordinator.handle_event(SyncEvent::SyncFailed {
                ticket: attempt.ticket,
                message: message.clone(),
            })?;
            Ok(Some(SyncOutcome::Failed { message }))
        }
    }
}
