use std::process::ExitCode;

use clap::Parser;
use console::style;

mod cli;
mod config;
mod error;
mod git;
mod sync;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", style("✖").red());
            ExitCode::FAILURE
        }
    }
}
