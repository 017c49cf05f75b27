//! # ember-cli
//!
//! Command-line interface for the ember interpreter.
//!
//! ## Usage
//!
//! ```bash
//! # Execute bytecode
//! ember run 6001600101
//! ember run 0x5b600056 --step-limit 100
//!
//! # Run a fixture file (or a directory of them)
//! ember fixtures tests/fixtures/evm.json --filter SDIV --verbose
//!
//! # Disassemble
//! ember disasm 6001600101
//!
//! # Configuration (~/.ember/config.toml)
//! ember config --show
//! ember config --set-step-limit 5000 --set-log-level debug
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// ember CLI
#[derive(Parser, Debug)]
#[command(name = "ember")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter (overrides the configured level; RUST_LOG takes precedence)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute bytecode and print the result
    Run {
        /// Bytecode as hex, with or without 0x
        code: String,
        /// Maximum instructions to execute (0 = unlimited)
        #[arg(long)]
        step_limit: Option<u64>,
    },
    /// Run a JSON fixture file or a directory of them
    Fixtures {
        /// Fixture file or directory
        path: PathBuf,
        /// Only run fixtures whose name contains this
        #[arg(long)]
        filter: Option<String>,
        /// Report each fixture
        #[arg(long)]
        verbose: bool,
    },
    /// Disassemble bytecode
    Disasm {
        /// Bytecode as hex, with or without 0x
        code: String,
    },
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set the step limit (0 = unlimited)
        #[arg(long)]
        set_step_limit: Option<u64>,
        /// Set the log level
        #[arg(long)]
        set_log_level: Option<String>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = Config::load();

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = match cli.command {
        Commands::Run { code, step_limit } => {
            if let Some(limit) = step_limit {
                config.step_limit = limit;
            }
            commands::run::execute(&code, config.interpreter_config(), cli.json)
                .map(|()| ExitCode::SUCCESS)
        }
        Commands::Fixtures {
            path,
            filter,
            verbose,
        } => commands::fixtures::execute(
            &path,
            filter,
            verbose,
            config.interpreter_config(),
            cli.json,
        ),
        Commands::Disasm { code } => {
            commands::disasm::execute(&code, cli.json).map(|()| ExitCode::SUCCESS)
        }
        Commands::Config {
            show,
            set_step_limit,
            set_log_level,
        } => handle_config(&mut config, show, set_step_limit, set_log_level, cli.json)
            .map(|()| ExitCode::SUCCESS),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "error": e.to_string(),
                        "success": false
                    })
                );
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::FAILURE
        }
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_step_limit: Option<u64>,
    set_log_level: Option<String>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(limit) = set_step_limit {
        config.step_limit = limit;
        modified = true;
    }

    if let Some(level) = set_log_level {
        EnvFilter::try_new(&level)
            .map_err(|e| CliError::Config(format!("invalid log level {:?}: {}", level, e)))?;
        config.log_level = level;
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print()?;
    } else if show {
        Output::new(json)
            .field_u64("step_limit", config.step_limit)
            .field_u64("memory_limit", config.memory_limit as u64)
            .field("log_level", &config.log_level)
            .message(&format!(
                "Step Limit: {}\nMemory Limit: {}\nLog Level: {}",
                config.step_limit, config.memory_limit, config.log_level
            ))
            .print()?;
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-step-limit/--set-log-level to modify")
            .print()?;
    }

    Ok(())
}
