//! Lab Assistant CLI entry point.

use clap::Parser;
use lab::cli::commands;
use lab::cli::{Cli, Commands, OutputFormat};
use lab::error::Error;
use std::process::ExitCode;

/// Rewrite named flags to positional args for scripting ergonomics.
///
/// Wrappers and agents naturally generate `--id run_abc` instead of
/// positional `run_abc`. This preprocessor transparently converts the
/// flag form so both work.
fn preprocess_args(args: impl Iterator<Item = String>) -> Vec<String> {
    // Only --id shadows a positional arg (run show/update/complete/
    // reopen). Named flags like --name and --sample are real flags on
    // some subcommands and must not be stripped.
    const POSITIONAL_ALIASES: &[&str] = &["--id"];

    let mut result = Vec::new();
    let mut iter = args.peekable();

    while let Some(arg) = iter.next() {
        if POSITIONAL_ALIASES.contains(&arg.as_str()) {
            // Strip the flag, keep the value
            if let Some(value) = iter.next() {
                result.push(value);
            }
        } else if let Some(flag) = POSITIONAL_ALIASES
            .iter()
            .find(|f| arg.starts_with(&format!("{f}=")))
        {
            // Handle --flag=value form
            let value = arg[flag.len() + 1..].to_string();
            result.push(value);
        } else {
            result.push(arg);
        }
    }

    result
}

fn main() -> ExitCode {
    let args = preprocess_args(std::env::args());
    let cli = Cli::parse_from(args);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    // Resolve effective JSON mode: --json OR --format json OR non-TTY stdout
    let json = cli.json
        || cli.format == OutputFormat::Json
        || !std::io::IsTerminal::is_terminal(&std::io::stdout());

    // Run the command and handle errors
    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    match &cli.command {
        Commands::Init { force } => commands::init::execute(*force, cli.store.as_ref(), json),
        Commands::Version => commands::version::execute(json),

        // Runs
        Commands::Run { command } => commands::run::execute(command, cli.store.as_ref(), json),

        // Status overview
        Commands::Status => commands::status::execute(cli.store.as_ref(), json),

        // Sync
        Commands::Sync { command } => commands::sync::execute(command, cli.store.as_ref(), json),

        // Connectivity
        Commands::Net { command } => commands::net::execute(command, cli.store.as_ref(), json),

        // Shell completions
        Commands::Completions { shell } => commands::completions::execute(shell),
    }
}
