//! Persistence layer for Lab Assistant.
//!
//! The entire run list is serialized as one JSON document under a single
//! store path on every mutation, and read back in full at startup. The
//! [`RunStore`] trait keeps the sync coordinator independent of the
//! backing medium:
//!
//! - [`json_file`] - JSON document on disk with atomic replace writes
//! - [`memory`] - in-memory store for tests, with a save counter

pub mod json_file;
pub mod memory;

pub use json_file::{atomic_write, JsonFileStore};
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::Run;

/// Persistence seam for the sync coordinator.
///
/// Implementations store the full run list as one logical document.
/// The coordinator calls [`save`](RunStore::save) after every mutation,
/// including the pending-flag clears that follow a successful sync.
pub trait RunStore {
    /// Read the full run list. A store that has never been written
    /// loads as empty.
    fn load(&self) -> Result<Vec<Run>>;

    /// Replace the stored run list with `runs`.
    fn save(&mut self, runs: &[Run]) -> Result<()>;
}
