//! Herbarium - in-memory plant register
//!
//! CLI entry point with global panic handler.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use herbarium::config::{herbarium_home, Config};
use herbarium::error::exit_codes;
use herbarium::{DispatchOptions, Session};

// =============================================================================
// CLI Definition
// =============================================================================

/// Herbarium - in-memory plant register
#[derive(Parser)]
#[command(name = "herbarium")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read commands from the terminal until EXIT
    Repl {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Execute a command file
    Run {
        /// Script with one command per line
        script: PathBuf,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Show the effective configuration
    Config {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
    },
}

// =============================================================================
// Main Entry Point
// =============================================================================

fn main() -> ExitCode {
    setup_panic_handler();
    init_tracing();

    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("herbarium error: {}", e);
            ExitCode::from(exit_codes::COMMAND_FAILED as u8)
        }
    }
}

/// Install the stderr subscriber. `HERBARIUM_LOG` takes an `EnvFilter`
/// directive and defaults to `warn`.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("HERBARIUM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Set up the global panic handler.
///
/// On panic, logs to ~/.herbarium/crash.log and exits with code 3.
fn setup_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("herbarium panic: {}", info);

        if let Some(home) = herbarium_home() {
            let crash_log = home.join("crash.log");
            if std::fs::create_dir_all(&home).is_ok() {
                if let Ok(mut file) = std::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&crash_log)
                {
                    let timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
                    let _ = writeln!(file, "[{}] {}", timestamp, info);
                }
            }
        }

        std::process::exit(exit_codes::CRASH);
    }));
}

/// Run the CLI and return the exit code.
fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load();

    match cli.command {
        Commands::Repl { json, quiet } => run_repl(config, json, quiet),
        Commands::Run {
            script,
            json,
            quiet,
        } => run_script(config, &script, json, quiet),
        Commands::Config { json } => run_config(&config, json),
    }
}

// =============================================================================
// Command Implementations
// =============================================================================

fn dispatch_options(config: &Config, json: bool, quiet: bool) -> DispatchOptions {
    DispatchOptions {
        json: json || config.report.is_json(),
        quiet,
    }
}

fn run_repl(config: Config, json: bool, quiet: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = dispatch_options(&config, json, quiet);
    let stdout = io::stdout();
    let mut session = Session::new(config, options, stdout.lock());

    session.run(io::stdin().lock(), true)?;

    let summary = session.summary();
    tracing::info!(
        commands = summary.commands,
        failures = summary.failures,
        plants = summary.plants,
        "session ended"
    );

    Ok(ExitCode::from(exit_codes::OK as u8))
}

fn run_script(
    config: Config,
    script: &Path,
    json: bool,
    quiet: bool,
) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let options = dispatch_options(&config, json, quiet);
    let stdout = io::stdout();
    let mut session = Session::new(config, options, stdout.lock());

    session.read_script(script)?;

    let summary = session.summary();
    tracing::info!(
        commands = summary.commands,
        failures = summary.failures,
        plants = summary.plants,
        "script finished"
    );

    if summary.failures > 0 {
        Ok(ExitCode::from(exit_codes::COMMAND_FAILED as u8))
    } else {
        Ok(ExitCode::from(exit_codes::OK as u8))
    }
}

fn run_config(config: &Config, json: bool) -> Result<ExitCode, Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string_pretty(config)?);
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(ExitCode::from(exit_codes::OK as u8))
}
