//! JSON document store backed by a single file.
//!
//! The run list lives in one JSON array document. Writes replace the
//! whole document atomically: write to a temp file, sync to disk, then
//! rename over the target. A reader never observes a partial write.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::model::Run;
use crate::storage::RunStore;

/// Write content to a file atomically.
///
/// This function:
/// 1. Writes content to a temporary file (same path with `.tmp` extension)
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Atomically renames the temp file to the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    let temp_path = path.with_extension("json.tmp");

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write to temp file
    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
        // Sync to disk before rename
        writer.get_ref().sync_all()?;
    }

    // Atomic rename
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Get the size of a file in bytes.
///
/// Returns 0 if the file doesn't exist.
#[must_use]
pub fn file_size(path: &Path) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// File-backed run store holding one JSON array document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given document path.
    ///
    /// The file is not touched until the first [`save`](RunStore::save);
    /// loading a path that does not exist yet yields an empty run list.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing document exists on disk.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Size of the backing document in bytes (0 if absent).
    #[must_use]
    pub fn size(&self) -> u64 {
        file_size(&self.path)
    }
}

impl RunStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Run>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::Store(format!(
                "invalid run store at {}: {e}",
                self.path.display()
            ))
        })
    }

    fn save(&mut self, runs: &[Run]) -> Result<()> {
        let json = serde_json::to_string_pretty(runs)?;
        atomic_write(&self.path, &json)
    }
}
