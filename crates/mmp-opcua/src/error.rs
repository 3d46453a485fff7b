// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error types.
use thiserror::Error;

use crate::ident::NodeId;

/// Conditions that abort a whole parse.
///
/// Everything else (dangling references, cyclic type chains, unknown node
/// classes) degrades and is reported through [`crate::ResolveReport`] or the
/// log instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A raw record has no node id.
    #[error("raw node record #{position} has no node id")]
    MalformedInput {
        /// Position of the record in the raw list.
        position: usize,
    },
    /// Two raw records share a node id.
    #[error("duplicate node id {node_id}")]
    DuplicateIdentifier {
        /// The repeated id.
        node_id: NodeId,
    },
}

/// Failure to produce the canonical encoding of a snapshot.
#[derive(Debug, Error)]
#[error("canonical snapshot encoding failed: {0}")]
pub struct DigestError(#[from] pub ciborium::ser::Error<std::io::Error>);
