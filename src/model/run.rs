//! Run model for Lab Assistant.
//!
//! Runs represent units of lab work such as an experiment pass or a
//! measurement series. Runs are created locally and carry a pending-sync
//! flag until a sync attempt confirms them synchronized.

use serde::{Deserialize, Serialize};

/// Run status values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    InProgress,
    Complete,
}

impl RunStatus {
    /// Get the string representation for storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }

    /// Parse from string.
    ///
    /// Lenient: unknown values fall back to `InProgress`. Use
    /// [`crate::validate::normalize_status`] for strict user input.
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "complete" | "completed" | "done" => Self::Complete,
            _ => Self::InProgress,
        }
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A run in Lab Assistant.
///
/// Runs are created and edited locally. The `pending_sync` flag marks
/// local changes that have not yet been confirmed synchronized; it is
/// set by the sync coordinator, never by callers directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Unique identifier (e.g., "run_a1b2c3d4e5f6")
    pub id: String,

    /// Display name (required, non-empty)
    pub name: String,

    /// Optional sample identifier this run processes
    pub sample_id: Option<String>,

    /// Optional free-form notes
    pub notes: Option<String>,

    /// Current status
    pub status: RunStatus,

    /// Creation timestamp (Unix milliseconds), used for display ordering
    pub created_at: i64,

    /// Whether local changes are awaiting sync confirmation
    #[serde(default)]
    pub pending_sync: bool,
}

impl Run {
    /// Create a new run with default values.
    ///
    /// New runs start `InProgress` with `pending_sync` unset; the sync
    /// coordinator decides the flag based on connectivity.
    pub fn new(name: String) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        let id = format!("run_{}", &uuid::Uuid::new_v4().to_string()[..12]);

        Self {
            id,
            name,
            sample_id: None,
            notes: None,
            status: RunStatus::InProgress,
            created_at: now,
            pending_sync: false,
        }
    }

    /// Set the sample identifier.
    #[must_use]
    pub fn with_sample_id(mut self, sample_id: &str) -> Self {
        self.sample_id = Some(sample_id.to_string());
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    /// Set the status.
    #[must_use]
    pub fn with_status(mut self, status: RunStatus) -> Self {
        self.status = status;
        self
    }
}

/// A partial update to an existing run.
///
/// `None` fields are left unchanged. Applied by the sync coordinator so
/// the pending-sync flag and persistence stay consistent.
#[derive(Debug, Clone, Default)]
pub struct RunPatch {
    /// New display name (validated non-empty before applying)
    pub name: Option<String>,

    /// New sample identifier
    pub sample_id: Option<String>,

    /// New notes
    pub notes: Option<String>,

    /// New status
    pub status: Option<RunStatus>,
}

impl RunPatch {
    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sample_id.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}
