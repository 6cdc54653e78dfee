//! errcode CLI - register new error codes in an error definition file

use clap::Parser;
use std::process::ExitCode;

use errcode::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !quiet {
                eprintln!("{:?}", miette::Report::new(e));
            }
            ExitCode::FAILURE
        }
    }
}
