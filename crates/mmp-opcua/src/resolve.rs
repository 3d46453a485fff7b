// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolve stage: arena, id lookup and link resolution.
//!
//! All nodes move into one `Vec` (the arena) in build order. The lookup table
//! is built once from that arena and is the only way string references turn
//! into [`NodeIndex`] links. Nothing is mutated after [`resolve`] returns.

use std::collections::hash_map::Entry;
use std::fmt;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::build::{BuiltNode, PendingLinks};
use crate::error::ParseError;
use crate::ident::{NodeId, NodeIndex};
use crate::node::{GraphNode, NodeKind, NodeVariant};

/// Id to arena index, built once per pass.
#[derive(Debug, Clone, Default)]
pub struct NodeLookup {
    by_id: FxHashMap<NodeId, NodeIndex>,
}

impl NodeLookup {
    /// Indexes `ids` by position; fails on the first repeated id.
    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a NodeId>) -> Result<Self, ParseError> {
        let mut by_id = FxHashMap::default();
        for (position, id) in ids.into_iter().enumerate() {
            match by_id.entry(id.clone()) {
                Entry::Occupied(_) => {
                    return Err(ParseError::DuplicateIdentifier {
                        node_id: id.clone(),
                    })
                }
                Entry::Vacant(slot) => {
                    slot.insert(NodeIndex(position));
                }
            }
        }
        Ok(Self { by_id })
    }

    /// Arena index of `id`.
    pub fn get(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    /// Number of indexed ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// True when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Which pending link a reference came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRole {
    /// `HasTypeDefinition`.
    TypeDefinition,
    /// Inverse `HasSubtype`.
    Supertype,
    /// `HasProperty`.
    Property,
    /// `HasComponent` or `Organizes`.
    Component,
}

impl fmt::Display for LinkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TypeDefinition => "type definition",
            Self::Supertype => "supertype",
            Self::Property => "property",
            Self::Component => "component",
        })
    }
}

/// A reference whose target is not part of the node set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingReference {
    /// Referencing node.
    pub from: NodeId,
    /// Missing target id.
    pub target: NodeId,
    /// Link the reference was meant to fill.
    pub role: LinkRole,
}

/// Non-fatal findings of one resolve pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolveReport {
    /// Unresolvable references in arena order.
    pub dangling: Vec<DanglingReference>,
}

/// The resolved arena.
#[derive(Debug, Clone)]
pub struct ResolvedGraph {
    nodes: Vec<GraphNode>,
    lookup: NodeLookup,
    report: ResolveReport,
}

impl ResolvedGraph {
    /// Node at `index`.
    pub fn node(&self, index: NodeIndex) -> Option<&GraphNode> {
        self.nodes.get(index.0)
    }

    /// Arena index of `id`.
    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.lookup.get(id)
    }

    /// Node with id `id`.
    pub fn node_by_id(&self, id: &str) -> Option<&GraphNode> {
        self.index_of(id).and_then(|index| self.node(index))
    }

    /// Nodes in arena (source) order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (NodeIndex, &GraphNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (NodeIndex(position), node))
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Diagnostics collected while linking.
    pub fn report(&self) -> &ResolveReport {
        &self.report
    }
}

/// Links every built node.
///
/// Type-definition and supertype links only accept object types; property
/// links only accept property nodes; component targets go to `variables` when
/// the target is a variable (property included) and to `components`
/// otherwise. Missing targets are recorded as [`DanglingReference`]s.
pub fn resolve(built: Vec<BuiltNode>) -> Result<ResolvedGraph, ParseError> {
    let lookup = NodeLookup::from_ids(built.iter().map(|b| &b.node.node_id))?;
    let (mut nodes, pending): (Vec<GraphNode>, Vec<PendingLinks>) =
        built.into_iter().map(|b| (b.node, b.pending)).unzip();
    let kinds: Vec<NodeKind> = nodes.iter().map(GraphNode::kind).collect();

    let mut linker = Linker {
        lookup: &lookup,
        kinds: &kinds,
        report: ResolveReport::default(),
    };
    for (node, links) in nodes.iter_mut().zip(&pending) {
        linker.link(node, links);
    }

    let report = linker.report;
    if !report.dangling.is_empty() {
        debug!(
            dangling = report.dangling.len(),
            "references left unresolved"
        );
    }
    Ok(ResolvedGraph {
        nodes,
        lookup,
        report,
    })
}

struct Linker<'a> {
    lookup: &'a NodeLookup,
    kinds: &'a [NodeKind],
    report: ResolveReport,
}

impl Linker<'_> {
    fn link(&mut self, node: &mut GraphNode, links: &PendingLinks) {
        if let Some(id) = &links.type_definition_id {
            node.type_definition = self.object_type(&node.node_id, id, LinkRole::TypeDefinition);
        }

        if let (NodeVariant::ObjectType { supertype }, Some(id)) =
            (&mut node.variant, &links.supertype_id)
        {
            *supertype = self.object_type(&node.node_id, id, LinkRole::Supertype);
        }

        for id in &links.property_ids {
            let Some((index, kind)) = self.find(&node.node_id, id, LinkRole::Property) else {
                continue;
            };
            if kind == NodeKind::Property {
                node.properties.push(index);
            }
        }

        for id in &links.component_ids {
            let Some((index, kind)) = self.find(&node.node_id, id, LinkRole::Component) else {
                continue;
            };
            if kind.is_variable() {
                node.variables.push(index);
            } else {
                node.components.push(index);
            }
        }
    }

    fn object_type(&mut self, from: &NodeId, id: &NodeId, role: LinkRole) -> Option<NodeIndex> {
        let (index, kind) = self.find(from, id, role)?;
        if kind == NodeKind::ObjectType {
            Some(index)
        } else {
            debug!(%from, target = %id, %role, ?kind, "link target is not an object type");
            None
        }
    }

    fn find(&mut self, from: &NodeId, id: &NodeId, role: LinkRole) -> Option<(NodeIndex, NodeKind)> {
        let found = self
            .lookup
            .get(id.as_str())
            .and_then(|index| self.kinds.get(index.0).map(|kind| (index, *kind)));
        if found.is_none() {
            self.report.dangling.push(DanglingReference {
                from: from.clone(),
                target: id.clone(),
                role,
            });
        }
        found
    }
}
