//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for list/query commands.
#[derive(ValueEnum, Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Table,
    /// JSON (same as --json)
    Json,
}

pub mod commands;

/// Lab Assistant CLI - Offline-first lab run tracking with sync status
#[derive(Parser, Debug)]
#[command(name = "lab", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Run store path (default: ~/.labassistant/data/runs.json)
    #[arg(long, global = true, env = "LAB_STORE")]
    pub store: Option<PathBuf>,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Output format (table, json)
    #[arg(long, value_enum, global = true, default_value_t)]
    pub format: OutputFormat,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (no output except errors)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the run store
    Init {
        /// Overwrite an existing store
        #[arg(long)]
        force: bool,
    },

    /// Print version information
    Version,

    /// Run management
    Run {
        #[command(subcommand)]
        command: RunCommands,
    },

    /// Show store and sync overview
    Status,

    /// Sync with the (simulated) backend
    Sync {
        #[command(subcommand)]
        command: SyncCommands,
    },

    /// Simulated connectivity toggle
    Net {
        #[command(subcommand)]
        command: NetCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ============================================================================
// Run Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum RunCommands {
    /// Create a new run
    Create(RunCreateArgs),

    /// List runs
    List(RunListArgs),

    /// Show run details
    Show {
        /// Run ID
        id: String,
    },

    /// Update a run
    Update(RunUpdateArgs),

    /// Mark run(s) as complete
    Complete {
        /// Run IDs (one or more)
        ids: Vec<String>,
    },

    /// Reopen completed run(s)
    Reopen {
        /// Run IDs (one or more)
        ids: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct RunCreateArgs {
    /// Run name
    pub name: String,

    /// Sample identifier
    #[arg(short, long)]
    pub sample: Option<String>,

    /// Free-form notes
    #[arg(short, long)]
    pub notes: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct RunListArgs {
    /// Filter by status (in_progress, complete, all)
    #[arg(short, long, default_value = "all")]
    pub status: String,

    /// Only runs with local changes awaiting sync
    #[arg(long)]
    pub pending: bool,

    /// Maximum runs to return
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct RunUpdateArgs {
    /// Run ID
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New sample identifier
    #[arg(short, long)]
    pub sample: Option<String>,

    /// New notes
    #[arg(short = 'n', long)]
    pub notes: Option<String>,

    /// New status (in_progress, complete)
    #[arg(long)]
    pub status: Option<String>,
}

// ============================================================================
// Sync Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum SyncCommands {
    /// Sync pending changes now
    Now,

    /// Show sync status
    Status,
}

// ============================================================================
// Net Commands
// ============================================================================

#[derive(Subcommand, Debug)]
pub enum NetCommands {
    /// Go online (schedules a sync if changes are pending)
    Online,

    /// Go offline (mutations will queue locally)
    Offline,

    /// Show current connectivity
    Status,
}
