// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Classified result and borrowed navigation over the arena.

use crate::classify::matches_type;
use crate::ident::{NodeId, NodeIndex};
use crate::node::{GraphNode, NodeKind};
use crate::resolve::{ResolveReport, ResolvedGraph};

/// Substructure depth the search index flattens (components, variables and
/// properties below a root).
pub const MAXIMUM_DEPTH: usize = 3;

/// Machine and sensor roots of one information model.
///
/// Owns the resolved arena; roots and children are handed out as [`NodeRef`]s.
/// Invariant: the machine index never appears in `sensors`.
#[derive(Debug, Clone)]
pub struct OpcuaMetadata {
    graph: ResolvedGraph,
    machine: Option<NodeIndex>,
    sensors: Vec<NodeIndex>,
}

impl OpcuaMetadata {
    pub(crate) fn new(graph: ResolvedGraph, machine: Option<NodeIndex>, sensors: Vec<NodeIndex>) -> Self {
        Self {
            graph,
            machine,
            sensors,
        }
    }

    /// The machine root, if any node matched the machine type.
    pub fn machine(&self) -> Option<NodeRef<'_>> {
        self.machine.and_then(|index| NodeRef::new(&self.graph, index))
    }

    /// Sensor roots in source order.
    pub fn sensors(&self) -> Vec<NodeRef<'_>> {
        self.sensors
            .iter()
            .filter_map(|index| NodeRef::new(&self.graph, *index))
            .collect()
    }

    /// Number of sensor roots.
    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }

    /// Arena index of the machine root.
    pub fn machine_index(&self) -> Option<NodeIndex> {
        self.machine
    }

    /// Arena indices of the sensor roots.
    pub fn sensor_indices(&self) -> &[NodeIndex] {
        &self.sensors
    }

    /// The resolved arena.
    pub fn graph(&self) -> &ResolvedGraph {
        &self.graph
    }

    /// Resolve-stage diagnostics.
    pub fn report(&self) -> &ResolveReport {
        self.graph.report()
    }

    /// Any node of the arena by id.
    pub fn node(&self, id: &str) -> Option<NodeRef<'_>> {
        self.graph
            .index_of(id)
            .and_then(|index| NodeRef::new(&self.graph, index))
    }
}

/// Borrowed view of one arena node.
#[derive(Clone, Copy, Debug)]
pub struct NodeRef<'a> {
    graph: &'a ResolvedGraph,
    index: NodeIndex,
    node: &'a GraphNode,
}

impl<'a> NodeRef<'a> {
    /// View of `index`, if it exists in `graph`.
    pub fn new(graph: &'a ResolvedGraph, index: NodeIndex) -> Option<Self> {
        graph.node(index).map(|node| Self { graph, index, node })
    }

    /// Arena index.
    pub fn index(&self) -> NodeIndex {
        self.index
    }

    /// Underlying node.
    pub fn node(&self) -> &'a GraphNode {
        self.node
    }

    /// Node id.
    pub fn node_id(&self) -> &'a NodeId {
        &self.node.node_id
    }

    /// Display name.
    pub fn display_name(&self) -> Option<&'a str> {
        self.node.display_name.as_deref()
    }

    /// Node class.
    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    /// Data type of a variable or property.
    pub fn data_type(&self) -> Option<&'a str> {
        self.node
            .variable_data()
            .and_then(|data| data.data_type.as_deref())
    }

    /// Value of a variable or property.
    pub fn value(&self) -> Option<&'a str> {
        self.node.variable_data().map(|data| data.value.as_str())
    }

    /// Resolved type definition.
    pub fn type_definition(&self) -> Option<NodeRef<'a>> {
        self.node
            .type_definition
            .and_then(|index| Self::new(self.graph, index))
    }

    /// Resolved supertype of an object type.
    pub fn supertype(&self) -> Option<NodeRef<'a>> {
        self.node
            .supertype()
            .and_then(|index| Self::new(self.graph, index))
    }

    /// Property children.
    pub fn properties(&self) -> Vec<NodeRef<'a>> {
        self.children(&self.node.properties)
    }

    /// Object children.
    pub fn components(&self) -> Vec<NodeRef<'a>> {
        self.children(&self.node.components)
    }

    /// Variable children.
    pub fn variables(&self) -> Vec<NodeRef<'a>> {
        self.children(&self.node.variables)
    }

    /// See [`matches_type`].
    pub fn has_type_definition(&self, type_id: &str) -> bool {
        matches_type(self.graph, self.index, Some(type_id))
    }

    /// Pre-order walk of this node and its substructure down to `max_depth`
    /// levels (properties, then components, then variables).
    ///
    /// Depth-bounded, so it terminates on component cycles.
    pub fn walk(&self, max_depth: usize) -> Walk<'a> {
        Walk {
            graph: self.graph,
            max_depth,
            stack: vec![(0, self.index)],
        }
    }

    fn children(&self, indices: &[NodeIndex]) -> Vec<NodeRef<'a>> {
        indices
            .iter()
            .filter_map(|index| Self::new(self.graph, *index))
            .collect()
    }
}

/// Iterator returned by [`NodeRef::walk`]; yields `(depth, node)`.
#[derive(Debug, Clone)]
pub struct Walk<'a> {
    graph: &'a ResolvedGraph,
    max_depth: usize,
    stack: Vec<(usize, NodeIndex)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((depth, index)) = self.stack.pop() {
            let Some(node) = NodeRef::new(self.graph, index) else {
                continue;
            };
            if depth < self.max_depth {
                let inner = node.node;
                let children = inner
                    .properties
                    .iter()
                    .chain(&inner.components)
                    .chain(&inner.variables);
                // Reverse so the first child pops first.
                let base = self.stack.len();
                self.stack.extend(children.map(|child| (depth + 1, *child)));
                self.stack[base..].reverse();
            }
            return Some((depth, node));
        }
        None
    }
}
