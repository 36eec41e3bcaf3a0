//! garagenet CLI entry point
//!
//! Installs logging, then delegates everything to the CLI module. Errors
//! have already been written to stdout as JSON; stderr gets a plain line.

use garagenet::{cli, observability};

fn main() {
    observability::init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
