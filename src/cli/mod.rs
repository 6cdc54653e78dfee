//! Command-line interface for errcode
//!
//! Provides commands: add (default), list, next, init

mod add_cmd;
mod init_cmd;
mod list_cmd;
mod next_cmd;
pub mod output;
pub mod prompt;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::error::Result;
use crate::store::DefinitionFile;

use output::{Output, Verbosity};

/// errcode - register new error codes in an error definition file
#[derive(Parser, Debug)]
#[command(name = "errcode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Config file (JSON, or TOML when the name ends in .toml)
    #[arg(long, short, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Print command results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show verbose output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Register a new error code (default when no command is given)
    Add(AddArgs),

    /// List the error codes already defined
    List {
        /// Only show codes of this prefix (service + module digits)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Show the code the next entry would get
    Next {
        /// Service-level code
        #[arg(long)]
        service: String,

        /// Module-level code
        #[arg(long)]
        module: String,
    },

    /// Create the definition file if it does not exist
    Init,
}

/// Options for `errcode add`; anything missing is asked for interactively
#[derive(Args, Debug, Default)]
pub struct AddArgs {
    /// Service-level code
    #[arg(long)]
    pub service: Option<String>,

    /// Module-level code
    #[arg(long)]
    pub module: Option<String>,

    /// Constant key (normalized to UPPER_SNAKE_CASE)
    #[arg(long)]
    pub key: Option<String>,

    /// Message for a language, e.g. --message english="user is banned"
    #[arg(long = "message", value_name = "LANG=TEXT", value_parser = parse_message)]
    pub messages: Vec<(String, String)>,

    /// Show the entry that would be added without writing the file
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Run the CLI
    pub fn run(self) -> Result<()> {
        let verbosity = if self.quiet {
            Verbosity::Quiet
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        let output = Output::new(verbosity, self.json);

        let config = Config::load(&self.config)?;
        output.detail(format_args!("config: {}", self.config.display()));
        output.detail(format_args!("definition file: {}", config.file_path.display()));

        let file = DefinitionFile::new(&config.file_path, &config.message_option);

        match self.command.unwrap_or(Command::Add(AddArgs::default())) {
            Command::Add(args) => add_cmd::run_add(&config, file, args, &output),
            Command::List { prefix } => list_cmd::run_list(&file, prefix.as_deref(), &output),
            Command::Next { service, module } => {
                next_cmd::run_next(&file, &service, &module, &output)
            }
            Command::Init => init_cmd::run_init(&file, &output),
        }
    }
}

/// Split a `LANG=TEXT` argument
fn parse_message(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((lang, text)) if !lang.trim().is_empty() => {
            Ok((lang.trim().to_string(), text.to_string()))
        }
        _ => Err(format!("expected LANG=TEXT, got `{}`", raw)),
    }
}

#[cfg(test)]
mod tests;
