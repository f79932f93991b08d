//! Error types for the Lab Assistant CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=store, 3=not_found, 4=validation, etc.)
//! - Retryability flags for scripted self-correction
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Lab Assistant operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string; shell pipelines on the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Store (exit 2)
    NotInitialized,
    AlreadyInitialized,
    StoreError,

    // Not Found (exit 3)
    RunNotFound,

    // Validation (exit 4)
    RequiredField,
    InvalidStatus,
    InvalidArgument,

    // Sync (exit 6)
    SyncError,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::StoreError => "STORE_ERROR",
            Self::RunNotFound => "RUN_NOT_FOUND",
            Self::RequiredField => "REQUIRED_FIELD",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::SyncError => "SYNC_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotInitialized | Self::AlreadyInitialized | Self::StoreError => 2,
            Self::RunNotFound => 3,
            Self::RequiredField | Self::InvalidStatus | Self::InvalidArgument => 4,
            Self::SyncError => 6,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether a caller should retry with corrected input or after a
    /// state change.
    ///
    /// True for validation errors and sync failures (pending changes are
    /// preserved, so a retry can succeed). False for not-found, I/O, or
    /// internal errors.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RequiredField
                | Self::InvalidStatus
                | Self::InvalidArgument
                | Self::SyncError
                | Self::StoreError
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Lab Assistant CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not initialized: run `lab init` first")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("Run not found: {id}")]
    RunNotFound { id: String },

    #[error("Run not found: {id} (did you mean: {}?)", similar.join(", "))]
    RunNotFoundSimilar { id: String, similar: Vec<String> },

    #[error("Required field is empty: {field}")]
    RequiredField { field: &'static str },

    #[error("Invalid status: {value}")]
    InvalidStatus {
        value: String,
        suggestion: Option<String>,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Sync failed: {0}")]
    SyncFailed(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::Store(_) => ErrorCode::StoreError,
            Self::RunNotFound { .. } | Self::RunNotFoundSimilar { .. } => ErrorCode::RunNotFound,
            Self::RequiredField { .. } => ErrorCode::RequiredField,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::SyncFailed(_) => ErrorCode::SyncError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for scripts and humans.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::NotInitialized => Some("Run `lab init` to create the run store".to_string()),

            Self::AlreadyInitialized { path } => Some(format!(
                "Run store already exists at {}. Use `--force` to reinitialize.",
                path.display()
            )),

            Self::RunNotFound { id } => Some(format!(
                "No run with ID '{id}'. Use `lab run list` to see recent runs."
            )),
            Self::RunNotFoundSimilar { similar, .. } => {
                Some(format!("Did you mean: {}?", similar.join(", ")))
            }

            Self::RequiredField { field } => {
                Some(format!("Provide a non-empty value for '{field}'."))
            }

            Self::InvalidStatus { suggestion, .. } => {
                let valid = "Valid statuses: in_progress, complete. \
                             Synonyms: done→complete, running→in_progress";
                match suggestion {
                    Some(s) => Some(format!("Did you mean '{s}'? {valid}")),
                    None => Some(valid.to_string()),
                }
            }

            Self::SyncFailed(_) => Some(
                "Pending changes are preserved locally. \
                 Run `lab sync now` to retry once connectivity is restored."
                    .to_string(),
            ),

            Self::InvalidArgument(_)
            | Self::Store(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, retryability, exit code, and
    /// optional recovery hint. Scripts parse this instead of stderr text.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
