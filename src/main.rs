//! Binary entrypoint for the `tapewatch` CLI.

use std::process::ExitCode;

use clap::Parser as _;

use tapewatch::cli_app::{self, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli_app::run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tapewatch: {err}");
            ExitCode::FAILURE
        }
    }
}
