// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Owned export of classified metadata for storage and JSON output.
//! The canonical CBOR form hashes to a stable digest.

use ciborium::ser::into_writer;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DigestError;
use crate::ident::NodeIndex;
use crate::metadata::{NodeRef, OpcuaMetadata, MAXIMUM_DEPTH};
use crate::node::NodeKind;

/// One node and its substructure, detached from the arena.
///
/// Node ids are not exported; they only identify nodes within one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSnapshot {
    /// Display name.
    pub display_name: Option<String>,
    /// Node class.
    pub kind: NodeKind,
    /// Data type (variables and properties).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Value (variables and properties).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Property children.
    #[serde(default)]
    pub properties: Vec<NodeSnapshot>,
    /// Object children.
    #[serde(default)]
    pub components: Vec<NodeSnapshot>,
    /// Variable children.
    #[serde(default)]
    pub variables: Vec<NodeSnapshot>,
}

/// Machine and sensors, detached from the arena.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    /// Machine root.
    pub machine: Option<NodeSnapshot>,
    /// Sensor roots in source order.
    pub sensors: Vec<NodeSnapshot>,
}

impl MetadataSnapshot {
    /// Canonical CBOR encoding.
    pub fn to_canonical_bytes(&self) -> Result<Vec<u8>, DigestError> {
        let mut bytes = Vec::new();
        into_writer(self, &mut bytes)?;
        Ok(bytes)
    }

    /// blake3 of [`Self::to_canonical_bytes`].
    pub fn digest(&self) -> Result<[u8; 32], DigestError> {
        Ok(blake3::hash(&self.to_canonical_bytes()?).into())
    }
}

impl OpcuaMetadata {
    /// Detached copy of the machine and sensor subtrees, down to
    /// [`MAXIMUM_DEPTH`] levels below each root (the same bound as
    /// [`NodeRef::walk`]).
    ///
    /// A child that is already an ancestor on the current path is dropped, so
    /// component cycles in malformed models are cut at their first repeat.
    pub fn snapshot(&self) -> MetadataSnapshot {
        let mut path = Vec::new();
        MetadataSnapshot {
            machine: self.machine().map(|m| snapshot_node(m, &mut path)),
            sensors: self
                .sensors()
                .into_iter()
                .map(|s| snapshot_node(s, &mut path))
                .collect(),
        }
    }
}

/// `path` holds the ancestors of `node`; its length is the node's depth.
fn snapshot_node(node: NodeRef<'_>, path: &mut Vec<NodeIndex>) -> NodeSnapshot {
    let expand = path.len() < MAXIMUM_DEPTH;
    path.push(node.index());
    let mut snapshot = NodeSnapshot {
        display_name: node.display_name().map(str::to_owned),
        kind: node.kind(),
        data_type: node.data_type().map(str::to_owned),
        value: node.value().map(str::to_owned),
        properties: Vec::new(),
        components: Vec::new(),
        variables: Vec::new(),
    };
    if expand {
        snapshot.properties = snapshot_children(node.properties(), path);
        snapshot.components = snapshot_children(node.components(), path);
        snapshot.variables = snapshot_children(node.variables(), path);
    }
    path.pop();
    snapshot
}

fn snapshot_children(children: Vec<NodeRef<'_>>, path: &mut Vec<NodeIndex>) -> Vec<NodeSnapshot> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        if path.contains(&child.index()) {
            warn!(node = %child.node_id(), "substructure cycle cut in snapshot");
            continue;
        }
        out.push(snapshot_node(child, path));
    }
    out
}
