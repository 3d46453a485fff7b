// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for mmp tools.
//! Keeps CLI and upload adapters thin: they pick a `ConfigStore`, this crate
//! decides how settings are encoded and which defaults apply.

pub mod config;
