//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `COPION_STORAGE_PATH` is unset, falls back to a config file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//! 5. With no file either, runs on [`Config::default`]
//!
//! ## Environment Variables
//! - `COPION_STORAGE_PATH`: Snapshot file or database path (required)
//! - `COPION_STORAGE_BACKEND`: `json`, `sqlite` or `memory`
//! - `COPION_STORAGE_POOL_SIZE`: Connection pool size (sqlite only)
//! - `COPION_HOST` / `COPION_PORT`: HTTP listener address
//! - `COPION_SAVE_ORDERING`: `unordered` or `serialized`
//! - `COPION_SAVE_RETRIES`: Extra attempts after a failed save
//! - `COPION_LOG_LEVEL`: Fallback filter when `RUST_LOG` is unset
//! - `COPION_LOG_FORMAT`: `pretty` or `json`
//!
//! ## File Locations
//! The loader probes `config.{json,toml}` then `copion.{json,toml}` in the
//! current working directory, its parent, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use copion_domain::{
    Config, CopionError, LoggingConfig, PersistenceConfig, Result, ServerConfig, StorageConfig,
};

const CONFIG_FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "copion.json", "copion.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `CopionError::Config` if a variable or file is present but
/// malformed. Missing sources are not an error.
pub fn load() -> Result<Config> {
    if std::env::var_os("COPION_STORAGE_PATH").is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        return Ok(config);
    }

    match probe_config_paths() {
        Some(path) => load_from_file(Some(path)),
        None => {
            tracing::info!("No configuration file found, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load configuration from environment variables
///
/// Only `COPION_STORAGE_PATH` is required; everything else falls back to
/// its default.
///
/// # Errors
/// Returns `CopionError::Config` if the storage path is missing or a value
/// cannot be parsed.
pub fn load_from_env() -> Result<Config> {
    let server_defaults = ServerConfig::default();
    let storage_defaults = StorageConfig::default();
    let persistence_defaults = PersistenceConfig::default();
    let logging_defaults = LoggingConfig::default();

    Ok(Config {
        server: ServerConfig {
            host: std::env::var("COPION_HOST").unwrap_or(server_defaults.host),
            port: env_parse("COPION_PORT")?.unwrap_or(server_defaults.port),
        },
        storage: StorageConfig {
            backend: env_parse("COPION_STORAGE_BACKEND")?.unwrap_or(storage_defaults.backend),
            path: env_var("COPION_STORAGE_PATH")?,
            pool_size: env_parse("COPION_STORAGE_POOL_SIZE")?
                .unwrap_or(storage_defaults.pool_size),
        },
        persistence: PersistenceConfig {
            save_ordering: env_parse("COPION_SAVE_ORDERING")?
                .unwrap_or(persistence_defaults.save_ordering),
            save_retries: env_parse("COPION_SAVE_RETRIES")?
                .unwrap_or(persistence_defaults.save_retries),
        },
        logging: LoggingConfig {
            level: std::env::var("COPION_LOG_LEVEL").unwrap_or(logging_defaults.level),
            format: env_parse("COPION_LOG_FORMAT")?.unwrap_or(logging_defaults.format),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `CopionError::Config` if the file is missing, unreadable, or
/// not valid JSON/TOML.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(CopionError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            CopionError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| CopionError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration, detecting the format from the file extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| CopionError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| CopionError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(CopionError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Return the first existing config file, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd.clone());
        roots.push(cwd.join(".."));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| CopionError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional environment variable; unset yields `None`.
fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| CopionError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(None),
    }
}
