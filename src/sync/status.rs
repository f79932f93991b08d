//! Sync status derivation and display.
//!
//! The displayed status is a pure function of connectivity, the pending
//! queue, and the in-flight attempt, with one exception: `Error` is set
//! by a failed attempt and sticks until a later event rederives it.

use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Displayed synchronization status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// No local changes awaiting sync.
    UpToDate,
    /// A sync attempt is in flight.
    Syncing,
    /// Local changes are queued and not yet synchronized.
    Pending,
    /// The most recent attempt failed; pending changes are preserved.
    Error,
}

impl SyncStatus {
    /// Get the string representation for storage and JSON output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UpToDate => "up_to_date",
            Self::Syncing => "syncing",
            Self::Pending => "pending",
            Self::Error => "error",
        }
    }

    /// Human-readable label for the status banner.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UpToDate => "Up to date",
            Self::Syncing => "Syncing",
            Self::Pending => "Pending",
            Self::Error => "Error",
        }
    }
}

/// Banner-ready snapshot of the coordinator state.
///
/// `retry_available` mirrors the banner rule: the retry action is shown
/// exactly when the status is `Pending` or `Error`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    /// Last-known connectivity.
    pub online: bool,
    /// Displayed status.
    pub status: SyncStatus,
    /// Number of runs with local changes awaiting sync (always derived).
    pub pending_count: usize,
    /// Message of the most recent failed attempt, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    /// Whether the manual retry action applies.
    pub retry_available: bool,
}

impl StatusReport {
    /// Build a report, deriving `retry_available` from the status.
    #[must_use]
    pub fn new(
        online: bool,
        status: SyncStatus,
        pending_count: usize,
        last_error: Option<String>,
    ) -> Self {
        let retry_available = matches!(status, SyncStatus::Pending | SyncStatus::Error);
        Self {
            online,
            status,
            pending_count,
            last_error,
            retry_available,
        }
    }
}

/// Print the status banner to stdout in a human-readable format.
pub fn print_banner(report: &StatusReport) {
    println!("{}", "Sync Status".bold().underline());
    println!();

    let connectivity = if report.online {
        "online".green()
    } else {
        "offline".red()
    };
    println!("  Connectivity: {connectivity}");

    let label = match report.status {
        SyncStatus::UpToDate => report.status.label().green(),
        SyncStatus::Syncing => report.status.label().blue(),
        SyncStatus::Pending => report.status.label().yellow(),
        SyncStatus::Error => report.status.label().red(),
    };
    println!("  Status:       {label}");
    println!("  Pending:      {}", report.pending_count);

    if let Some(ref message) = report.last_error {
        println!("  Last error:   {message}");
    }

    if report.retry_available {
        println!();
        println!("{}", "Run 'lab sync now' to retry pending changes.".dimmed());
    }
}
