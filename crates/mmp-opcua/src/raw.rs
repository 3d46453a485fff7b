// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw node records as handed over by the model reader.

use serde::{Deserialize, Serialize};

/// Node class tag of a raw record.
///
/// Tags the engine does not know (methods, data types, views, ...) deserialize
/// as [`RawNodeKind::Other`] and are built as plain objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RawNodeKind {
    /// `UAObject`.
    #[default]
    Object,
    /// `UAVariable`.
    Variable,
    /// `UAObjectType`.
    ObjectType,
    /// Any other node class.
    #[serde(other)]
    Other,
}

/// One typed reference of a raw node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReference {
    /// Reference type browse name, e.g. `HasComponent`.
    pub reference_type: String,
    /// Direction as written in the source; `false` marks an inverse reference.
    #[serde(default = "forward")]
    pub is_forward: bool,
    /// Target node id.
    pub target: String,
}

const fn forward() -> bool {
    true
}

impl RawReference {
    /// Forward reference of `reference_type` to `target`.
    pub fn forward(reference_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            reference_type: reference_type.into(),
            is_forward: true,
            target: target.into(),
        }
    }

    /// Inverse reference of `reference_type` to `target`.
    pub fn inverse(reference_type: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            reference_type: reference_type.into(),
            is_forward: false,
            target: target.into(),
        }
    }
}

/// A node as produced by the model reader, before any resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNodeRecord {
    /// Node id. A record without one cannot be looked up and fails the parse.
    pub node_id: Option<String>,
    /// First display name of the node.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Node class.
    #[serde(default)]
    pub kind: RawNodeKind,
    /// Data type of a variable.
    #[serde(default)]
    pub data_type: Option<String>,
    /// Textual value of a variable.
    #[serde(default)]
    pub value: Option<String>,
    /// References in source order.
    #[serde(default)]
    pub references: Vec<RawReference>,
}

/// A complete raw node list, the JSON form accepted by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RawNodeSet {
    /// Records in source order.
    pub nodes: Vec<RawNodeRecord>,
}

impl RawNodeSet {
    /// Decodes a node set from JSON bytes.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn unknown_kind_tag_decodes_as_other() {
        let set = RawNodeSet::from_json_slice(
            br#"{"nodes":[{"nodeId":"ns=1;i=7","kind":"method","references":[]}]}"#,
        )
        .unwrap();
        assert_eq!(set.nodes[0].kind, RawNodeKind::Other);
    }

    #[test]
    fn references_default_to_forward() {
        let set = RawNodeSet::from_json_slice(
            br#"{"nodes":[{"nodeId":"a","references":[{"referenceType":"HasComponent","target":"b"}]}]}"#,
        )
        .unwrap();
        let node = &set.nodes[0];
        assert_eq!(node.kind, RawNodeKind::Object);
        assert!(node.references[0].is_forward);
        assert_eq!(node.display_name, None);
    }

    #[test]
    fn missing_node_id_still_decodes() {
        let set = RawNodeSet::from_json_slice(br#"{"nodes":[{"displayName":"orphan"}]}"#).unwrap();
        assert_eq!(set.nodes[0].node_id, None);
        assert_eq!(set.nodes[0].display_name.as_deref(), Some("orphan"));
    }
}
