// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for mmp crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`fixtures`] - Reference machine/sensor information model
//! - [`nodes`] - Raw node record builders

pub mod config;
pub mod fixtures;
pub mod nodes;

// Re-export commonly used items at crate root for convenience
pub use config::InMemoryConfigStore;
pub use fixtures::machine_with_two_sensors;
pub use nodes::{data_variable, property_node, RawNodeBuilder};
