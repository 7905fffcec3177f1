//! Autoloader CLI - Command-line interface
//!
//! Inspects namespace mappings from an `autoload.ini` file and runs class
//! resolution against the real filesystem.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "autoloader", version, about = "Resolve namespaced class names to source files")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to ./autoload.ini)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve a class and load its file
    Resolve {
        /// Fully-qualified class name (e.g. blog\Controller\Home)
        class: String,

        /// Locate the file without reading it
        #[arg(long)]
        no_load: bool,
    },

    /// List every candidate path resolution would probe, in order
    Candidates {
        /// Fully-qualified class name
        class: String,
    },

    /// Show the registered namespace prefixes and directories
    Map {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Configuration file commands
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = autoloader::logging::init_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = commands::common::config_path(cli.config);

    match cli.command {
        Commands::Resolve { class, no_load } => {
            commands::resolve::run(&config_path, &class, no_load)
        }
        Commands::Candidates { class } => commands::resolve::run_candidates(&config_path, &class),
        Commands::Map { json } => commands::map::run(&config_path, json),
        Commands::Init { force } => commands::init::run(&config_path, force),
        Commands::Config(command) => commands::config::run(&config_path, command),
    }
}
