//! Seagallery - command-line front end for browsing the species API

use std::process::ExitCode;

use seagallery::cli;

fn main() -> ExitCode {
    cli::run()
}
