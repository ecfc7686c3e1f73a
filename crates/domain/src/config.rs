//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_SNAPSHOT_PATH;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub persistence: PersistenceConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 5000 }
    }
}

/// Which persistence gateway backs the profile store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// `{ "perfiles": [...] }` document on disk
    #[default]
    Json,
    /// Relational `profiles` + `scores` tables
    Sqlite,
    /// Nothing survives a restart
    Memory,
}

crate::impl_domain_enum_conversions!(StorageBackend {
    Json => "json",
    Sqlite => "sqlite",
    Memory => "memory",
});

/// Snapshot storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: String,
    /// Connection pool size, only read by the sqlite backend
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Json,
            path: DEFAULT_SNAPSHOT_PATH.to_string(),
            pool_size: 4,
        }
    }
}

/// How snapshot saves are ordered relative to the mutations that produced
/// them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaveOrdering {
    /// Saves race; the last one to finish wins at whole-collection
    /// granularity
    #[default]
    Unordered,
    /// Saves reach the backend in the order their mutations were applied
    Serialized,
}

crate::impl_domain_enum_conversions!(SaveOrdering {
    Unordered => "unordered",
    Serialized => "serialized",
});

/// Persistence behaviour configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub save_ordering: SaveOrdering,
    /// Extra attempts after a failed save
    pub save_retries: u32,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { save_ordering: SaveOrdering::Unordered, save_retries: 1 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

crate::impl_domain_enum_conversions!(LogFormat {
    Pretty => "pretty",
    Json => "json",
});

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Pretty }
    }
}
