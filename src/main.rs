//! Partwright CLI - build projects out of parts
//!
//! Usage: partwright [--project-dir DIR] [--json] [-v...] <COMMAND>
//!
//! Commands:
//!   pull    Retrieve the parts' sources
//!   build   Build the parts
//!   stage   Merge the parts' output into the stage tree
//!   prime   Copy the staged output into the prime tree
//!   clean   Remove content and state for parts

mod commands;

use std::process::ExitCode;

use clap::Parser;

use partwright::presentation::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
