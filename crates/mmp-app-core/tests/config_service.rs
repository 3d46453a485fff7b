// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs, clippy::unwrap_used)]
//! ConfigService behaviour against the in-memory store fake.

use mmp_app_core::config::{ConfigError, ConfigService, PARSER_CONFIG_KEY};
use mmp_dry_tests::InMemoryConfigStore;
use mmp_opcua::{ParserConfig, DEFAULT_MACHINE_TYPE_ID};

#[test]
fn empty_store_yields_default_parser_config() {
    let store = InMemoryConfigStore::new();
    let service = ConfigService::new(store.clone());
    assert_eq!(service.parser_config().unwrap(), ParserConfig::default());
    assert_eq!(store.load_count(), 1);
    assert_eq!(store.save_count(), 0);
}

#[test]
fn saved_parser_config_round_trips() {
    let service = ConfigService::new(InMemoryConfigStore::new());
    let custom = ParserConfig::default().with_overrides(None, Some("ns=2;i=17"));
    service.save_parser_config(&custom).unwrap();
    assert_eq!(service.parser_config().unwrap(), custom);
}

#[test]
fn empty_blob_is_treated_as_missing() {
    let service = ConfigService::new(InMemoryConfigStore::with_blob(PARSER_CONFIG_KEY, b""));
    assert_eq!(service.parser_config().unwrap(), ParserConfig::default());
}

#[test]
fn partial_blob_keeps_remaining_defaults() {
    let store = InMemoryConfigStore::with_blob(PARSER_CONFIG_KEY, br#"{"sensorTypeId":"ns=5;i=1"}"#);
    let cfg = ConfigService::new(store).parser_config().unwrap();
    assert_eq!(cfg.sensor_type_id, "ns=5;i=1");
    assert_eq!(cfg.machine_type_id, DEFAULT_MACHINE_TYPE_ID);
}

#[test]
fn corrupt_blob_surfaces_serde_error() {
    let service = ConfigService::new(InMemoryConfigStore::with_blob(PARSER_CONFIG_KEY, b"{not json"));
    assert!(matches!(service.parser_config(), Err(ConfigError::Serde(_))));
}

#[test]
fn store_failures_propagate() {
    let store = InMemoryConfigStore::new();
    store.set_fail_on_load(true);
    let service = ConfigService::new(store);
    assert!(matches!(service.parser_config(), Err(ConfigError::Other(_))));
}
