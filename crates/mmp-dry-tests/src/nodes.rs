// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Raw node record builders for tests.

use mmp_opcua::{
    RawNodeKind, RawNodeRecord, RawReference, DEFAULT_PROPERTY_TYPE_ID, DEFAULT_VARIABLE_TYPE_ID,
};

/// Builder for [`RawNodeRecord`] instances.
///
/// # Example
///
/// ```
/// use mmp_dry_tests::RawNodeBuilder;
/// use mmp_opcua::RawNodeKind;
///
/// let node = RawNodeBuilder::object("ns=1;i=5001")
///     .display_name("Machine")
///     .type_definition("ns=1;i=2027")
///     .property("ns=1;i=6001")
///     .build();
///
/// assert_eq!(node.kind, RawNodeKind::Object);
/// assert_eq!(node.references.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RawNodeBuilder {
    record: RawNodeRecord,
}

impl RawNodeBuilder {
    /// Start a record of `kind` with id `node_id`.
    pub fn new(node_id: &str, kind: RawNodeKind) -> Self {
        Self {
            record: RawNodeRecord {
                node_id: Some(node_id.to_owned()),
                kind,
                ..RawNodeRecord::default()
            },
        }
    }

    /// `UAObject` record.
    pub fn object(node_id: &str) -> Self {
        Self::new(node_id, RawNodeKind::Object)
    }

    /// `UAVariable` record.
    pub fn variable(node_id: &str) -> Self {
        Self::new(node_id, RawNodeKind::Variable)
    }

    /// `UAObjectType` record.
    pub fn object_type(node_id: &str) -> Self {
        Self::new(node_id, RawNodeKind::ObjectType)
    }

    /// Drop the node id (malformed record).
    pub fn without_id(mut self) -> Self {
        self.record.node_id = None;
        self
    }

    /// Set the display name.
    pub fn display_name(mut self, name: &str) -> Self {
        self.record.display_name = Some(name.to_owned());
        self
    }

    /// Set the variable data type.
    pub fn data_type(mut self, data_type: &str) -> Self {
        self.record.data_type = Some(data_type.to_owned());
        self
    }

    /// Set the variable value.
    pub fn value(mut self, value: &str) -> Self {
        self.record.value = Some(value.to_owned());
        self
    }

    /// Append any reference.
    pub fn reference(mut self, reference: RawReference) -> Self {
        self.record.references.push(reference);
        self
    }

    /// Forward `HasTypeDefinition`.
    pub fn type_definition(self, type_id: &str) -> Self {
        self.reference(RawReference::forward("HasTypeDefinition", type_id))
    }

    /// Inverse `HasSubtype` to the supertype.
    pub fn subtype_of(self, supertype_id: &str) -> Self {
        self.reference(RawReference::inverse("HasSubtype", supertype_id))
    }

    /// Forward `HasProperty`.
    pub fn property(self, target: &str) -> Self {
        self.reference(RawReference::forward("HasProperty", target))
    }

    /// Forward `HasComponent`.
    pub fn component(self, target: &str) -> Self {
        self.reference(RawReference::forward("HasComponent", target))
    }

    /// Forward `Organizes`.
    pub fn organizes(self, target: &str) -> Self {
        self.reference(RawReference::forward("Organizes", target))
    }

    /// Inverse `HasComponent` back to the owning node, as node set exports write it.
    pub fn component_of(self, parent: &str) -> Self {
        self.reference(RawReference::inverse("HasComponent", parent))
    }

    /// Inverse `HasProperty` back to the owning node.
    pub fn property_of(self, parent: &str) -> Self {
        self.reference(RawReference::inverse("HasProperty", parent))
    }

    /// Finish.
    pub fn build(self) -> RawNodeRecord {
        self.record
    }
}

/// A `PropertyType` variable owned by `parent`.
pub fn property_node(
    node_id: &str,
    parent: &str,
    name: &str,
    data_type: &str,
    value: &str,
) -> RawNodeRecord {
    RawNodeBuilder::variable(node_id)
        .display_name(name)
        .data_type(data_type)
        .value(value)
        .type_definition(DEFAULT_PROPERTY_TYPE_ID)
        .property_of(parent)
        .build()
}

/// A `BaseDataVariableType` variable owned by `parent`.
pub fn data_variable(
    node_id: &str,
    parent: &str,
    name: &str,
    data_type: &str,
    value: &str,
) -> RawNodeRecord {
    RawNodeBuilder::variable(node_id)
        .display_name(name)
        .data_type(data_type)
        .value(value)
        .type_definition(DEFAULT_VARIABLE_TYPE_ID)
        .component_of(parent)
        .build()
}
