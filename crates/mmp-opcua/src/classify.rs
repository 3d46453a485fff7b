// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Classify stage: machine and sensor roots by type ancestry.

use rustc_hash::FxHashSet;
use tracing::{instrument, warn};

use crate::config::ClassifyConfig;
use crate::ident::NodeIndex;
use crate::metadata::OpcuaMetadata;
use crate::node::NodeKind;
use crate::resolve::ResolvedGraph;

/// True when `target` is the node's type definition or one of its supertypes.
///
/// The walk visits each type at most once; a supertype cycle ends it with
/// `false`. An absent target never matches.
pub fn matches_type(graph: &ResolvedGraph, index: NodeIndex, target: Option<&str>) -> bool {
    let Some(target) = target else {
        return false;
    };
    let Some(node) = graph.node(index) else {
        return false;
    };

    let mut visited = FxHashSet::default();
    let mut current = node.type_definition;
    while let Some(type_index) = current {
        if !visited.insert(type_index) {
            warn!(
                node = %node.node_id,
                wanted = target,
                "cyclic type chain; treating as no match"
            );
            return false;
        }
        let Some(type_node) = graph.node(type_index) else {
            return false;
        };
        if type_node.node_id.as_str() == target {
            return true;
        }
        current = type_node.supertype();
    }
    false
}

/// Picks the machine root and the sensor roots, in arena order.
///
/// Object types and properties are never roots. A sensor match is checked
/// first and excludes the node from machine candidacy; the first machine
/// match wins.
#[instrument(skip_all, fields(nodes = graph.len()))]
pub fn classify(graph: ResolvedGraph, config: &ClassifyConfig) -> OpcuaMetadata {
    let machine_type = Some(config.machine_type_id.as_str());
    let sensor_type = Some(config.sensor_type_id.as_str());

    let mut machine = None;
    let mut sensors = Vec::new();
    for (index, node) in graph.iter() {
        if matches!(node.kind(), NodeKind::ObjectType | NodeKind::Property) {
            continue;
        }
        if matches_type(&graph, index, sensor_type) {
            sensors.push(index);
        } else if machine.is_none() && matches_type(&graph, index, machine_type) {
            machine = Some(index);
        }
    }
    OpcuaMetadata::new(graph, machine, sensors)
}
