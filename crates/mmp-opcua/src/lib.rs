// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! mmp-opcua: resolves OPC UA information models into a machine/sensor graph.
//!
//! The pipeline has three pure stages over an already-parsed node list:
//!
//! 1. [`build`] maps every [`RawNodeRecord`] to one [`GraphNode`] variant and
//!    collects the string references it still needs resolved ([`PendingLinks`]).
//! 2. [`resolve`] places all nodes in an arena, builds the id lookup once and
//!    turns pending references into [`NodeIndex`] links.
//! 3. [`classify`] walks type-definition/supertype chains and picks the machine
//!    root and the sensor roots ([`OpcuaMetadata`]).
//!
//! [`parse_metadata`] runs all three.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self
)]

mod build;
mod classify;
mod config;
mod error;
mod ident;
mod metadata;
mod node;
mod raw;
pub mod refs;
mod resolve;
mod snapshot;

use tracing::{info, instrument};

/// Stage 1: raw record to typed node plus unresolved references.
pub use build::{build, build_node, BuiltNode, PendingLinks};
/// Stage 3: type-chain matching and machine/sensor assembly.
pub use classify::{classify, matches_type};
/// Identifier configuration for the build and classify stages.
pub use config::{BuildConfig, ClassifyConfig, ParserConfig};
/// Fatal parse errors and snapshot encoding errors.
pub use error::{DigestError, ParseError};
/// Node identifiers, arena indices and well-known OPC UA type ids.
pub use ident::{
    NodeId, NodeIndex, DEFAULT_MACHINE_TYPE_ID, DEFAULT_PROPERTY_TYPE_ID, DEFAULT_SENSOR_TYPE_ID,
    DEFAULT_VARIABLE_TYPE_ID,
};
/// Classified result and borrowed node views.
pub use metadata::{NodeRef, OpcuaMetadata, Walk, MAXIMUM_DEPTH};
/// Typed graph node model.
pub use node::{GraphNode, NodeKind, NodeVariant, VariableData};
/// Raw node records supplied by the model reader.
pub use raw::{RawNodeKind, RawNodeRecord, RawNodeSet, RawReference};
/// Stage 2: arena, lookup and resolution diagnostics.
pub use resolve::{resolve, DanglingReference, LinkRole, NodeLookup, ResolveReport, ResolvedGraph};
/// Owned, serializable export of the classified graph.
pub use snapshot::{MetadataSnapshot, NodeSnapshot};

/// Runs build, resolve and classify over `records`.
///
/// Fails only on [`ParseError::MalformedInput`] and
/// [`ParseError::DuplicateIdentifier`]; dangling references and cyclic type
/// chains degrade to absent links and negative matches.
#[instrument(skip_all, fields(records = records.len()))]
pub fn parse_metadata(
    records: &[RawNodeRecord],
    config: &ParserConfig,
) -> Result<OpcuaMetadata, ParseError> {
    let built = build(records, &config.build_config())?;
    let graph = resolve(built)?;
    let metadata = classify(graph, &config.classify_config());
    info!(
        machine = metadata.machine().and_then(|m| m.display_name()),
        sensors = metadata.sensor_count(),
        dangling = metadata.report().dangling.len(),
        "opc ua metadata resolved"
    );
    Ok(metadata)
}
