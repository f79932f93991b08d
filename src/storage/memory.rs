//! In-memory run store.
//!
//! Used by coordinator tests to observe persistence behavior without
//! touching disk. Counts `save` calls so persistence-on-every-mutation
//! is assertable.

use crate::error::Result;
use crate::model::Run;
use crate::storage::RunStore;

/// Run store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    runs: Vec<Run>,
    saves: usize,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `runs`, as if a previous
    /// process had written them.
    #[must_use]
    pub fn with_runs(runs: Vec<Run>) -> Self {
        Self { runs, saves: 0 }
    }

    /// Number of times `save` has been called.
    #[must_use]
    pub const fn save_count(&self) -> usize {
        self.saves
    }

    /// The currently persisted run list.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }
}

impl RunStore for MemoryStore {
    fn load(&self) -> Result<Vec<Run>> {
        Ok(self.runs.clone())
    }

    fn save(&mut self, runs: &[Run]) -> Result<()> {
        self.runs = runs.to_vec();
        self.saves += 1;
        Ok(())
    }
}
