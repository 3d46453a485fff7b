// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Config service and storage port for mmp tools.

use mmp_opcua::ParserConfig;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::debug;

/// Key under which the parser type ids are stored.
pub const PARSER_CONFIG_KEY: &str = "opcua_parser";

/// Storage port for raw config blobs (keyed by logical name).
pub trait ConfigStore {
    /// Load a raw config blob. Returns `NotFound` when missing.
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError>;
    /// Persist a raw config blob.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError>;
}

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Key not present in store.
    #[error("not found")]
    NotFound,
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Catch-all error variant.
    #[error("other: {0}")]
    Other(String),
}

/// Blob encoding used for every stored config value (pretty JSON).
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ConfigError> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Serializes config values and delegates storage to a `ConfigStore`.
pub struct ConfigService<S> {
    store: S,
}

impl<S> ConfigService<S> {
    /// Create a new service using the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S> ConfigService<S>
where
    S: ConfigStore,
{
    /// Load and deserialize the value for `key`. `Ok(None)` if missing or empty.
    pub fn load<T>(&self, key: &str) -> Result<Option<T>, ConfigError>
    where
        T: DeserializeOwned,
    {
        match self.store.load_raw(key) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(ConfigError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Serialize and persist the value for `key`.
    pub fn save<T>(&self, key: &str, value: &T) -> Result<(), ConfigError>
    where
        T: Serialize,
    {
        self.store.save_raw(key, &encode(value)?)
    }

    /// Stored parser type ids, or the built-in OPC UA defaults when nothing is stored.
    pub fn parser_config(&self) -> Result<ParserConfig, ConfigError> {
        let stored = self.load::<ParserConfig>(PARSER_CONFIG_KEY)?;
        if stored.is_none() {
            debug!(key = PARSER_CONFIG_KEY, "no stored parser config; using defaults");
        }
        Ok(stored.unwrap_or_default())
    }

    /// Persist parser type ids.
    pub fn save_parser_config(&self, config: &ParserConfig) -> Result<(), ConfigError> {
        self.save(PARSER_CONFIG_KEY, config)
    }
}
