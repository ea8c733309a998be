mod commands;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use fieldfmt::logging;

#[derive(Parser)]
#[command(name = "fieldfmt", version, about = "Named, bidirectional field formatters")]
pub struct Cli {
    /// Config file (default: $FIELDFMT_CONFIG or ~/.fieldfmt/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Also write JSON logs to ~/.fieldfmt/logs/fieldfmt.jsonl
    #[arg(long, global = true)]
    pub log: bool,
    /// Write JSON logs to this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Format a value (reads one value per stdin line when TEXT is omitted)
    Format {
        /// Formatter name
        name: String,
        /// Value to transform
        #[arg(allow_hyphen_values = true)]
        text: Option<String>,
        /// Convert a display value back to its raw form
        #[arg(short, long)]
        reverse: bool,
    },
    /// Transform a value and back, and report whether it survived unchanged
    Check {
        /// Formatter name
        name: String,
        /// Value to check
        #[arg(allow_hyphen_values = true)]
        text: String,
        /// Start from a display value instead of a raw one
        #[arg(short, long)]
        reverse: bool,
    },
    /// List registered formatters
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the formatter class a name resolves to
    Show {
        /// Formatter name
        name: String,
    },
    /// Manage the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the config file path in use
    Path,
    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where JSON logs go: `--log-file` wins over `--log`
fn log_destination(log_file: Option<PathBuf>, log: bool) -> Option<PathBuf> {
    match (log_file, log) {
        (Some(path), _) => Some(path),
        (None, true) => Some(logging::log_file_path()),
        (None, false) => None,
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let log_file = log_destination(cli.log_file, cli.log);
    let _guard = logging::init_logging(cli.verbose, log_file.as_deref())?;

    let config = cli.config.as_deref();
    match cli.command {
        Command::Format {
            name,
            text,
            reverse,
        } => {
            commands::install_registry(config)?;
            commands::format(&name, text.as_deref(), reverse)
        }
        Command::Check {
            name,
            text,
            reverse,
        } => {
            commands::install_registry(config)?;
            commands::check(&name, &text, reverse)
        }
        Command::List { json } => {
            commands::install_registry(config)?;
            commands::list(json)
        }
        Command::Show { name } => {
            commands::install_registry(config)?;
            commands::show(&name)
        }
        Command::Config { action } => match action {
            ConfigAction::Path => commands::config_path(config),
            ConfigAction::Init { force } => commands::config_init(config, force),
        },
    }
}
