//! Lab Assistant CLI - Offline-first lab run tracking with sync status
//!
//! This crate provides the core functionality for the `lab` CLI tool.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`model`] - Data types (Run, RunPatch, RunStatus)
//! - [`storage`] - JSON document persistence layer
//! - [`sync`] - Sync coordinator, events, and status reporting
//! - [`config`] - Store resolution and simulated connectivity
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod sync;
pub mod validate;

pub use error::{Error, Result};
