//! Command-line front end
//!
//! - validate: check one JSON object against a registered schema
//! - schema: print a descriptor or list registered names
//! - serve: line-delimited create/retrieve/list/validate over in-memory stores

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{build_registry, run, run_command, schema, serve, validate, Operation, Request, Resource, Session};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{error_envelope, parse_request, read_line, read_requests, response_envelope, write_error, write_json, write_response};
