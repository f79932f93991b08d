//! Data models for Lab Assistant.
//!
//! This module contains all domain models:
//! - Run
//! - RunStatus
//! - RunPatch

pub mod run;

pub use run::{Run, RunPatch, RunStatus};
