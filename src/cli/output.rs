//! Console output for the CLI.
//!
//! Status lines go to stdout, warnings and verbose details to stderr. In JSON mode only the
//! command's JSON result is printed on stdout.

use serde::Serialize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

#[derive(Debug, Clone, Copy)]
pub struct Output {
    verbosity: Verbosity,
    json: bool,
}

impl Output {
    pub fn new(verbosity: Verbosity, json: bool) -> Self {
        Self { verbosity, json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    fn status_enabled(&self) -> bool {
        self.verbosity != Verbosity::Quiet && !self.json
    }

    /// Print a success message in green.
    pub fn success(&self, msg: impl Display) {
        if self.status_enabled() {
            println!("\x1b[32m{msg}\x1b[0m");
        }
    }

    /// Print an info message in blue.
    pub fn info(&self, msg: impl Display) {
        if self.status_enabled() {
            println!("\x1b[34minfo:\x1b[0m {msg}");
        }
    }

    /// Print plain text, e.g. one row of a listing.
    pub fn plain(&self, msg: impl Display) {
        if self.status_enabled() {
            println!("{msg}");
        }
    }

    /// Print a warning message in yellow.
    pub fn warning(&self, msg: impl Display) {
        if self.verbosity != Verbosity::Quiet {
            eprintln!("\x1b[33mwarning:\x1b[0m {msg}");
        }
    }

    /// Print a detail line, only with --verbose.
    pub fn detail(&self, msg: impl Display) {
        if self.verbosity == Verbosity::Verbose {
            eprintln!("\x1b[2m{msg}\x1b[0m");
        }
    }

    /// Print a command result as JSON (JSON mode only).
    pub fn json<T: Serialize>(&self, value: &T) {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
        }
    }
}
