// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use mmp_app_core::config::{encode, ConfigError, ConfigStore, PARSER_CONFIG_KEY};
use mmp_opcua::ParserConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory [`ConfigStore`]. Clones share state, so a test can hand one
/// clone to a `ConfigService` and inspect the other.
///
/// # Example
///
/// ```
/// use mmp_app_core::config::{ConfigService, PARSER_CONFIG_KEY};
/// use mmp_dry_tests::InMemoryConfigStore;
/// use mmp_opcua::ParserConfig;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
/// service.save(PARSER_CONFIG_KEY, &ParserConfig::default()).unwrap();
/// assert!(store.contains_key(PARSER_CONFIG_KEY));
/// assert_eq!(store.save_count(), 1);
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: HashMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `blob` under `key`.
    pub fn with_blob(key: &str, blob: &[u8]) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), blob.to_vec());
        store
    }

    /// Store holding `config` as JSON under [`PARSER_CONFIG_KEY`].
    pub fn with_parser_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let blob = encode(config)?;
        Ok(Self::with_blob(PARSER_CONFIG_KEY, &blob))
    }

    /// Make every subsequent `load_raw` fail with [`ConfigError::Other`].
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Number of `load_raw` calls, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// Number of `save_raw` calls.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// True when `key` holds a blob.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Raw blob stored under `key`.
    pub fn blob(&self, key: &str) -> Option<Vec<u8>> {
        self.lock().data.get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn clones_share_blobs_and_counts() {
        let a = InMemoryConfigStore::new();
        let b = a.clone();
        a.save_raw("k", b"v").unwrap();
        assert_eq!(b.load_raw("k").unwrap(), b"v");
        assert_eq!(b.save_count(), 1);
        assert_eq!(a.load_count(), 1);
    }

    #[test]
    fn missing_key_is_not_found() {
        let store = InMemoryConfigStore::new();
        assert!(matches!(store.load_raw("nope"), Err(ConfigError::NotFound)));
    }

    #[test]
    fn failing_load_still_counts() {
        let store = InMemoryConfigStore::with_blob("k", b"{}");
        store.set_fail_on_load(true);
        assert!(matches!(store.load_raw("k"), Err(ConfigError::Other(_))));
        assert_eq!(store.load_count(), 1);
    }

    #[test]
    fn seeded_parser_config_is_json() {
        let store = InMemoryConfigStore::with_parser_config(&ParserConfig::default()).unwrap();
        let blob = store.blob(PARSER_CONFIG_KEY).unwrap();
        let decoded: ParserConfig = serde_json::from_slice(&blob).unwrap();
        assert_eq!(decoded, ParserConfig::default());
    }
}
