//! Remote sync collaborator seam.
//!
//! The coordinator never performs the sync itself; the host runs a
//! [`RemoteSync`] implementation between coordinator calls and feeds the
//! outcome back as an event. [`SimulatedRemote`] is the stand-in used by
//! the CLI: a fixed delay, then a configurable outcome. A real API
//! client would implement the same trait without changing the
//! coordinator contract.

use std::time::Duration;

use crate::sync::events::ScheduledSync;

/// Failure reported by a remote sync collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct SyncFailure {
    /// Human-readable failure description.
    pub message: String,
}

impl SyncFailure {
    /// Create a failure with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Performs the synchronization work for scheduled attempts.
pub trait RemoteSync {
    /// Carry out one attempt. Blocks for the duration of the operation.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncFailure`] describing why the attempt failed.
    fn perform(&self, attempt: &ScheduledSync) -> std::result::Result<(), SyncFailure>;
}

/// Simulated remote with fixed latency and configurable outcome.
#[derive(Debug, Clone)]
pub struct SimulatedRemote {
    delay: Duration,
    fail_with: Option<String>,
}

impl SimulatedRemote {
    /// Default simulated latency in milliseconds.
    pub const DEFAULT_DELAY_MS: u64 = 750;

    /// Create a remote that succeeds after `delay`.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail_with: None,
        }
    }

    /// Make every attempt fail with `message`.
    #[must_use]
    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    /// Build from environment configuration.
    ///
    /// - `LAB_SYNC_DELAY_MS` overrides the simulated latency
    /// - `LAB_SYNC_FAIL` makes every attempt fail; any value other than
    ///   `1`/`true` is used as the failure message
    #[must_use]
    pub fn from_env() -> Self {
        let delay_ms = std::env::var("LAB_SYNC_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Self::DEFAULT_DELAY_MS);

        let fail_with = std::env::var("LAB_SYNC_FAIL")
            .ok()
            .filter(|v| !v.is_empty() && v != "0" && v.to_lowercase() != "false")
            .map(|v| {
                if v == "1" || v.to_lowercase() == "true" {
                    "simulated sync failure".to_string()
                } else {
                    v
                }
            });

        Self {
            delay: Duration::from_millis(delay_ms),
            fail_with,
        }
    }
}

impl RemoteSync for SimulatedRemote {
    fn perform(&self, attempt: &ScheduledSync) -> std::result::Result<(), SyncFailure> {
        tracing::debug!(
            ticket = attempt.ticket,
            pending = attempt.pending,
            delay_ms = self.delay.as_millis() as u64,
            "performing simulated sync"
        );

        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }

        match &self.fail_with {
            Some(message) => Err(SyncFailure::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulated_remote_succeeds() {
        let remote = SimulatedRemote::new(Duration::ZERO);
        let attempt = ScheduledSync {
            ticket: 1,
            pending: 2,
        };
        assert!(remote.perform(&attempt).is_ok());
    }

    #[test]
    fn test_simulated_remote_failure_carries_message() {
        let remote = SimulatedRemote::new(Duration::ZERO).failing("backend unreachable");
        let attempt = ScheduledSync {
            ticket: 1,
            pending: 0,
        };
        let err = remote.perform(&attempt).unwrap_err();
        assert_eq!(err.message, "backend unreachable");
    }
}
