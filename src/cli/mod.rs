//! CLI module for settings-bridge
//!
//! Provides command-line interface for:
//! - init: Create directory structure
//! - keys / get / set / exists: One-shot bridge operations
//! - serve: JSON-lines request loop on stdin/stdout

mod args;
mod commands;
mod errors;
mod io;
mod protocol;

pub use args::{Cli, Command};
pub use commands::{
    execute, init, open_store, parse_value_arg, run, run_command, serve, Config, SCHEMA_DIR_ENV,
};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_requests, write_error, write_response};
pub use protocol::{dispatch, Request};
