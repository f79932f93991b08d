//! Configuration management.
//!
//! This module resolves where Lab Assistant keeps its data and how the
//! current invocation sees connectivity.
//!
//! # Architecture
//!
//! Lab Assistant uses a **global store** architecture:
//! - **Run store**: single JSON document at `~/.labassistant/data/runs.json`
//! - **Connectivity**: a `connectivity.json` sidecar next to the store
//!
//! Every command resolves the same store, so the pending queue survives
//! across invocations regardless of the working directory.

mod connectivity;

pub use connectivity::{
    connectivity_path, current_online, read_connectivity, write_connectivity, ConnectivityState,
};

use std::path::{Path, PathBuf};

/// Get the global Lab Assistant directory location.
#[must_use]
pub fn global_labassistant_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".labassistant"))
}

/// Check if test mode is enabled.
///
/// Test mode is enabled by setting `LAB_TEST_STORE=1` (or any truthy
/// value). This redirects all store operations to an isolated test
/// store.
#[must_use]
pub fn is_test_mode() -> bool {
    std::env::var("LAB_TEST_STORE")
        .map(|v| truthy(&v))
        .unwrap_or(false)
}

/// Get the test store path.
///
/// Returns `~/.labassistant/test/runs.json` for isolated testing.
#[must_use]
pub fn test_store_path() -> Option<PathBuf> {
    global_labassistant_dir().map(|dir| dir.join("test").join("runs.json"))
}

/// Resolve the run store path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly
/// 2. `LAB_TEST_STORE` environment variable → uses the test store
/// 3. `LAB_STORE` environment variable
/// 4. Global location: `~/.labassistant/data/runs.json`
///
/// # Test Mode
///
/// Set `LAB_TEST_STORE=1` to use `~/.labassistant/test/runs.json`
/// instead. This keeps real data safe during development.
#[must_use]
pub fn resolve_store_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Explicit path from CLI flag
    if let Some(path) = explicit_path {
        return Some(path.to_path_buf());
    }

    // Priority 2: Test mode, isolated test store
    if is_test_mode() {
        return test_store_path();
    }

    // Priority 3: LAB_STORE environment variable
    if let Ok(store_path) = std::env::var("LAB_STORE") {
        if !store_path.trim().is_empty() {
            return Some(PathBuf::from(store_path));
        }
    }

    // Priority 4: Global store location
    global_labassistant_dir().map(|dir| dir.join("data").join("runs.json"))
}

fn truthy(value: &str) -> bool {
    !value.is_empty() && value != "0" && value.to_lowercase() != "false"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_store_path_with_explicit() {
        let explicit = PathBuf::from("/custom/path/runs.json");
        let result = resolve_store_path(Some(&explicit));
        assert_eq!(result, Some(explicit));
    }

    #[test]
    fn test_global_labassistant_dir_returns_some() {
        let result = global_labassistant_dir();
        assert!(result.is_some());
    }

    #[test]
    fn test_test_store_path_is_separate() {
        let global = global_labassistant_dir().unwrap();
        let test = test_store_path().unwrap();

        assert!(test.to_string_lossy().contains("/test/"));
        assert!(test.ends_with("runs.json"));
        assert_ne!(global.join("data").join("runs.json"), test);
    }

    #[test]
    fn test_truthy_parsing() {
        assert!(truthy("1"));
        assert!(truthy("true"));
        assert!(truthy("yes"));

        assert!(!truthy(""));
        assert!(!truthy("0"));
        assert!(!truthy("false"));
        assert!(!truthy("FALSE"));
    }
}
