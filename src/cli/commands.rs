//! CLI command implementations
//!
//! Every command loads the configuration, opens the store and runs one or
//! more bridge operations. One-shot commands print a single JSON response;
//! `serve` answers one response per request line until stdin closes.

use std::env;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::bridge::{BridgeError, SettingsBridge};
use crate::observability::{Event, Logger, Severity};
use crate::schema::SchemaLoader;
use crate::store::{MemoryStore, SettingsStore};
use crate::variant::DynamicValue;

use super::args::{Cli, Command};
use super::errors::{CliError, CliErrorCode, CliResult};
use super::io::{read_requests, write_error, write_response};
use super::protocol::{dispatch, Request};

/// Environment variable replacing `schema_dir`
pub const SCHEMA_DIR_ENV: &str = "SETTINGS_SCHEMA_DIR";

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Data directory (required)
    pub data_dir: String,

    /// Schema directory (optional, default `<data_dir>/schemas`)
    #[serde(default)]
    pub schema_dir: Option<String>,

    /// Persisted user values (optional, default `<data_dir>/values.json`)
    #[serde(default)]
    pub values_file: Option<String>,

    /// Minimum log severity (optional, default "info")
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file, applying the environment override
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let Ok(dir) = env::var(SCHEMA_DIR_ENV) {
            if !dir.is_empty() {
                config.schema_dir = Some(dir);
            }
        }

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(CliError::config_error("data_dir must not be empty"));
        }

        if matches!(&self.schema_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(CliError::config_error("schema_dir must not be empty"));
        }

        if matches!(&self.values_file, Some(file) if file.trim().is_empty()) {
            return Err(CliError::config_error("values_file must not be empty"));
        }

        self.severity()?;

        Ok(())
    }

    /// Parsed log level
    pub fn severity(&self) -> CliResult<Severity> {
        Severity::parse(&self.log_level).ok_or_else(|| {
            CliError::config_error(format!(
                "Invalid log_level: '{}'. Must be one of trace, info, warn, error, fatal.",
                self.log_level
            ))
        })
    }

    /// Get data directory as Path
    pub fn data_path(&self) -> &Path {
        Path::new(&self.data_dir)
    }

    /// Resolved schema directory
    pub fn schema_path(&self) -> PathBuf {
        match &self.schema_dir {
            Some(dir) => PathBuf::from(dir),
            None => self.data_path().join("schemas"),
        }
    }

    /// Resolved values file
    pub fn values_path(&self) -> PathBuf {
        match &self.values_file {
            Some(file) => PathBuf::from(file),
            None => self.data_path().join("values.json"),
        }
    }
}

/// Opens the store described by `config`.
///
/// A missing schema directory is not an error: the store runs without a
/// schema source and every operation reports that.
pub fn open_store(config: &Config) -> CliResult<MemoryStore> {
    let schema_dir = config.schema_path();

    let source = if schema_dir.is_dir() {
        let loader = SchemaLoader::load_dir(&schema_dir)
            .map_err(|e| CliError::schema_load_failed(e.to_string()))?;
        let count = loader.schema_count().to_string();
        let dir = schema_dir.display().to_string();
        Logger::info(
            Event::SchemasLoaded,
            &[("count", count.as_str()), ("dir", dir.as_str())],
        );
        Some(loader)
    } else {
        let dir = schema_dir.display().to_string();
        Logger::warn(Event::SchemaSourceMissing, &[("dir", dir.as_str())]);
        None
    };

    MemoryStore::open(source, &config.values_path())
        .map_err(|e| CliError::store_open_failed(e.to_string()))
}

/// Parse arguments and run
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(&cli.config, cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(config_path: &Path, cmd: Command) -> CliResult<()> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.severity()?);
    Logger::trace(Event::ConfigLoaded, &[("data_dir", config.data_dir.as_str())]);

    match cmd {
        Command::Init => init(&config),
        other => {
            let mut bridge = SettingsBridge::new(open_store(&config)?);
            execute(&mut bridge, other, &mut io::stdout())
        }
    }
}

/// Run a store-backed command against an open bridge.
pub fn execute<S: SettingsStore, W: Write>(
    bridge: &mut SettingsBridge<S>,
    cmd: Command,
    writer: &mut W,
) -> CliResult<()> {
    match cmd {
        // Needs no store; handled by run_command
        Command::Init => Ok(()),
        Command::Keys { schema } => one_shot(writer, bridge.list_keys(&schema).map(Value::from)),
        Command::Get { schema, key } => {
            one_shot(writer, bridge.get(&schema, &key).map(|v| v.to_json()))
        }
        Command::Set { schema, key, value } => {
            let value = parse_value_arg(&value)?;
            one_shot(writer, bridge.set(&schema, &key, &value).map(|_| Value::Null))
        }
        Command::Exists { schema } => {
            one_shot(writer, bridge.schema_exists(&schema).map(Value::Bool))
        }
        Command::Serve => serve(bridge, io::stdin().lock(), writer),
    }
}

/// Create the data and schema directories
pub fn init(config: &Config) -> CliResult<()> {
    let schema_dir = config.schema_path();
    fs::create_dir_all(&schema_dir).map_err(|e| {
        CliError::config_error(format!("Failed to create directory {:?}: {}", schema_dir, e))
    })?;
    fs::create_dir_all(config.data_path()).map_err(|e| {
        CliError::config_error(format!("Failed to create directory {:?}: {}", config.data_dir, e))
    })?;

    write_response(
        &mut io::stdout(),
        json!({"initialized": true, "schema_dir": schema_dir.display().to_string()}),
    )
}

/// Parses a command-line value as JSON into a dynamic value.
pub fn parse_value_arg(raw: &str) -> CliResult<DynamicValue> {
    let json: Value = serde_json::from_str(raw)
        .map_err(|e| CliError::invalid_value(format!("Value is not valid JSON: {}", e)))?;
    DynamicValue::from_json(&json)
        .ok_or_else(|| CliError::invalid_value("Objects are not settings values"))
}

fn one_shot<W: Write>(writer: &mut W, result: Result<Value, BridgeError>) -> CliResult<()> {
    match result {
        Ok(data) => write_response(writer, data),
        Err(e) => {
            write_error(writer, e.code(), &e.message())?;
            Err(CliError::operation_failed(e.message()))
        }
    }
}

/// Answer requests until the reader is exhausted.
///
/// Malformed requests and bridge failures are reported per line and do not
/// end the loop; only I/O failures do.
pub fn serve<S, R, W>(bridge: &mut SettingsBridge<S>, reader: R, writer: &mut W) -> CliResult<()>
where
    S: SettingsStore,
    R: BufRead,
    W: Write,
{
    Logger::info(Event::ServeBegin, &[]);
    let mut handled: u64 = 0;

    for request in read_requests(reader) {
        let request = match request {
            Ok(value) => value,
            Err(e) if *e.code() == CliErrorCode::BadRequest => {
                reject(writer, &e)?;
                continue;
            }
            Err(e) => return Err(e),
        };

        match handle_line(bridge, request) {
            Ok(Ok(data)) => write_response(writer, data)?,
            Ok(Err(e)) => write_error(writer, e.code(), &e.message())?,
            Err(e) => reject(writer, &e)?,
        }
        handled += 1;
    }

    let handled = handled.to_string();
    Logger::info(Event::ServeComplete, &[("requests", handled.as_str())]);
    Ok(())
}

fn handle_line<S: SettingsStore>(
    bridge: &mut SettingsBridge<S>,
    raw: Value,
) -> CliResult<Result<Value, BridgeError>> {
    let request = Request::parse(raw)?;
    let payload = request.payload()?;
    Ok(dispatch(bridge, &request, &payload))
}

fn reject<W: Write>(writer: &mut W, error: &CliError) -> CliResult<()> {
    Logger::warn(Event::RequestRejected, &[("reason", error.message())]);
    write_error(writer, error.code_str(), error.message())
}
