// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed graph nodes.
//!
//! Every node shares one struct (identity, substructure lists, type link);
//! what differs per node class lives in [`NodeVariant`]. A property is a
//! variable, and a variable is an object: code that wants "any variable"
//! asks [`GraphNode::is_variable`] instead of matching two arms.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ident::{NodeId, NodeIndex};

/// Value fields carried by variables and properties.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VariableData {
    /// Data type as written in the model (`String`, `UInt32`, `i=12`, ...).
    pub data_type: Option<String>,
    /// Textual value; empty when the model carries none.
    pub value: String,
}

/// Per-class part of a [`GraphNode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeVariant {
    /// Plain structural object.
    Object,
    /// Object type; `supertype` links one step up the inheritance chain.
    ObjectType {
        /// Resolved supertype, if it is part of the node set.
        supertype: Option<NodeIndex>,
    },
    /// Variable holding a live or measured value.
    Variable(VariableData),
    /// Variable holding static metadata (manufacturer, serial number, ...).
    Property(VariableData),
}

/// Fieldless view of [`NodeVariant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    /// See [`NodeVariant::Object`].
    Object,
    /// See [`NodeVariant::ObjectType`].
    ObjectType,
    /// See [`NodeVariant::Variable`].
    Variable,
    /// See [`NodeVariant::Property`].
    Property,
}

/// One node of the resolved graph.
///
/// `type_definition` and the supertype link are lookups into the arena, not
/// ownership; the substructure lists hold the arena indices of children in
/// the order the owning node referenced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Node id, unique within one resolution pass.
    pub node_id: NodeId,
    /// Display name, if the model gave one.
    pub display_name: Option<String>,
    /// Resolved type definition (always an object type).
    pub type_definition: Option<NodeIndex>,
    /// `HasProperty` children that are property nodes.
    pub properties: Vec<NodeIndex>,
    /// Component children that are not variables.
    pub components: Vec<NodeIndex>,
    /// Component children that are variables (properties included).
    pub variables: Vec<NodeIndex>,
    /// Class-specific fields.
    pub variant: NodeVariant,
}

impl GraphNode {
    /// Creates an unlinked node.
    pub fn new(node_id: NodeId, display_name: Option<String>, variant: NodeVariant) -> Self {
        Self {
            node_id,
            display_name,
            type_definition: None,
            properties: Vec::new(),
            components: Vec::new(),
            variables: Vec::new(),
            variant,
        }
    }

    /// Fieldless class tag.
    pub fn kind(&self) -> NodeKind {
        match self.variant {
            NodeVariant::Object => NodeKind::Object,
            NodeVariant::ObjectType { .. } => NodeKind::ObjectType,
            NodeVariant::Variable(_) => NodeKind::Variable,
            NodeVariant::Property(_) => NodeKind::Property,
        }
    }

    /// Variable fields for variables and properties.
    pub fn variable_data(&self) -> Option<&VariableData> {
        match &self.variant {
            NodeVariant::Variable(data) | NodeVariant::Property(data) => Some(data),
            NodeVariant::Object | NodeVariant::ObjectType { .. } => None,
        }
    }

    /// Supertype link of an object type; `None` for every other class.
    pub fn supertype(&self) -> Option<NodeIndex> {
        match self.variant {
            NodeVariant::ObjectType { supertype } => supertype,
            _ => None,
        }
    }

    /// True for variables and properties.
    pub fn is_variable(&self) -> bool {
        self.kind().is_variable()
    }

    /// True for properties only.
    pub fn is_property(&self) -> bool {
        self.kind() == NodeKind::Property
    }

    /// True for object types only.
    pub fn is_object_type(&self) -> bool {
        self.kind() == NodeKind::ObjectType
    }
}

impl NodeKind {
    /// True for variables and properties.
    pub fn is_variable(self) -> bool {
        matches!(self, Self::Variable | Self::Property)
    }

    /// Lowercase label, same as the serialized form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::ObjectType => "objectType",
            Self::Variable => "variable",
            Self::Property => "property",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    fn variable(value: &str) -> VariableData {
        VariableData {
            data_type: Some("Double".into()),
            value: value.into(),
        }
    }

    #[test]
    fn property_counts_as_variable() {
        let node = GraphNode::new("p".into(), None, NodeVariant::Property(variable("1")));
        assert!(node.is_variable());
        assert!(node.is_property());
        assert_eq!(node.variable_data().map(|d| d.value.as_str()), Some("1"));
    }

    #[test]
    fn only_object_types_carry_a_supertype() {
        let ty = GraphNode::new(
            "t".into(),
            None,
            NodeVariant::ObjectType {
                supertype: Some(NodeIndex(3)),
            },
        );
        assert_eq!(ty.supertype(), Some(NodeIndex(3)));
        assert!(ty.is_object_type());
        assert!(!ty.is_variable());

        let obj = GraphNode::new("o".into(), None, NodeVariant::Object);
        assert_eq!(obj.supertype(), None);
        assert_eq!(obj.variable_data(), None);
    }

    #[test]
    fn kind_label_matches_serialized_form() {
        for kind in [
            NodeKind::Object,
            NodeKind::ObjectType,
            NodeKind::Variable,
            NodeKind::Property,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }
}
