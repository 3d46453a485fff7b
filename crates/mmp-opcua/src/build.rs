// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Build stage: raw record to typed node plus pending references.

use crate::config::BuildConfig;
use crate::error::ParseError;
use crate::ident::NodeId;
use crate::node::{GraphNode, NodeVariant, VariableData};
use crate::raw::{RawNodeKind, RawNodeRecord};
use crate::refs;

/// References of one node that the resolve stage still has to look up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PendingLinks {
    /// First forward `HasTypeDefinition` target.
    pub type_definition_id: Option<NodeId>,
    /// First inverse `HasSubtype` target; object types only.
    pub supertype_id: Option<NodeId>,
    /// Forward `HasProperty` targets in source order.
    pub property_ids: Vec<NodeId>,
    /// Forward `HasComponent` targets, then forward `Organizes` targets.
    pub component_ids: Vec<NodeId>,
}

/// Output of [`build_node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltNode {
    /// Node with empty links.
    pub node: GraphNode,
    /// Links to resolve.
    pub pending: PendingLinks,
}

/// Maps one raw record to a node variant.
///
/// Variant priority: property type definition, variable type definition,
/// object-type node class, plain object. `position` is only used to report a
/// record without a node id.
pub fn build_node(
    position: usize,
    record: &RawNodeRecord,
    config: &BuildConfig,
) -> Result<BuiltNode, ParseError> {
    let node_id = record
        .node_id
        .as_deref()
        .map(NodeId::from)
        .ok_or(ParseError::MalformedInput { position })?;
    let type_definition_id = refs::type_definition(record);

    let mut supertype_id = None;
    let variant = if type_definition_id == Some(config.property_type_id.as_str()) {
        NodeVariant::Property(variable_data(record))
    } else if type_definition_id == Some(config.variable_type_id.as_str()) {
        NodeVariant::Variable(variable_data(record))
    } else if record.kind == RawNodeKind::ObjectType {
        supertype_id = refs::supertype(record).map(NodeId::from);
        NodeVariant::ObjectType { supertype: None }
    } else {
        NodeVariant::Object
    };

    let pending = PendingLinks {
        type_definition_id: type_definition_id.map(NodeId::from),
        supertype_id,
        property_ids: refs::property_targets(record).map(NodeId::from).collect(),
        component_ids: refs::component_targets(record).map(NodeId::from).collect(),
    };
    Ok(BuiltNode {
        node: GraphNode::new(node_id, record.display_name.clone(), variant),
        pending,
    })
}

/// Builds every record in order; stops at the first record without an id.
pub fn build(records: &[RawNodeRecord], config: &BuildConfig) -> Result<Vec<BuiltNode>, ParseError> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| build_node(position, record, config))
        .collect()
}

fn variable_data(record: &RawNodeRecord) -> VariableData {
    VariableData {
        data_type: record.data_type.clone(),
        value: record.value.clone().unwrap_or_default(),
    }
}
