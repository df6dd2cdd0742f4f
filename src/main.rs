//! Craft CLI - Local-first project management for software teams

use std::process::ExitCode;

fn main() -> ExitCode {
    if let Err(e) = craft_cli::cli::run() {
        eprintln!("Error: {:#}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
