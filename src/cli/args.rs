//! CLI argument definitions using clap
//!
//! Commands:
//! - settings-bridge init
//! - settings-bridge keys <schema>
//! - settings-bridge get <schema> <key>
//! - settings-bridge set <schema> <key> <json-value>
//! - settings-bridge exists <schema>
//! - settings-bridge serve

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// settings-bridge - schema-validated access to a settings store
#[derive(Parser, Debug)]
#[command(name = "settings-bridge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./settings-bridge.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the data and schema directories
    Init,

    /// List the keys declared by a schema
    Keys {
        /// Schema identifier
        schema: String,
    },

    /// Read a key as JSON
    Get {
        /// Schema identifier
        schema: String,
        /// Key name
        key: String,
    },

    /// Write a key from a JSON value
    Set {
        /// Schema identifier
        schema: String,
        /// Key name
        key: String,
        /// Value as JSON, e.g. `true`, `42`, `"text"`, `["a","b"]`
        value: String,
    },

    /// Report whether a schema is installed
    Exists {
        /// Schema identifier
        schema: String,
    },

    /// Serve JSON-lines requests from stdin until EOF
    Serve,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
