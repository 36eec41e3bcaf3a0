//! CLI module for garagenet
//!
//! Provides command-line access to:
//! - draft: blank form for an entity
//! - validate: check a draft and print the record
//! - payload: print the create-payload for a draft
//! - submit: create a record on the configured data service
//! - schema: print the model catalogue

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{connect, draft, payload, run, run_command, schema, submit, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, ok_envelope, parse_request, read_request, write_error, write_response};
