// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used)]

use mmp_opcua::{
    parse_metadata, ParserConfig, RawNodeKind, RawNodeRecord, RawReference, MAXIMUM_DEPTH,
};
use proptest::prelude::*;

const REFERENCE_TYPES: [&str; 6] = [
    "HasTypeDefinition",
    "HasSubtype",
    "HasComponent",
    "HasProperty",
    "Organizes",
    "hascomponent",
];

fn arb_reference(nodes: usize) -> impl Strategy<Value = RawReference> {
    let target = prop_oneof![
        4 => (0..nodes).prop_map(|i| format!("n{i}")),
        1 => Just("i=68".to_owned()),
        1 => Just("i=63".to_owned()),
        1 => Just("missing".to_owned()),
    ];
    (prop::sample::select(REFERENCE_TYPES.to_vec()), any::<bool>(), target).prop_map(
        |(reference_type, is_forward, target)| RawReference {
            reference_type: reference_type.to_owned(),
            is_forward,
            target,
        },
    )
}

fn arb_kind() -> impl Strategy<Value = RawNodeKind> {
    prop::sample::select(vec![
        RawNodeKind::Object,
        RawNodeKind::ObjectType,
        RawNodeKind::Variable,
        RawNodeKind::Other,
    ])
}

/// Arbitrary node sets over ids `n0..nN`; references may point anywhere,
/// including back at their own node, so type and component cycles are common.
fn arb_records() -> impl Strategy<Value = Vec<RawNodeRecord>> {
    (1usize..16).prop_flat_map(|nodes| {
        prop::collection::vec(
            (
                arb_kind(),
                prop::option::of("[a-z]{1,6}"),
                prop::collection::vec(arb_reference(nodes), 0..6),
            ),
            nodes,
        )
        .prop_map(|parts| {
            parts
                .into_iter()
                .enumerate()
                .map(|(i, (kind, value, references))| RawNodeRecord {
                    node_id: Some(format!("n{i}")),
                    display_name: Some(format!("node {i}")),
                    kind,
                    data_type: Some("String".into()),
                    value,
                    references,
                })
                .collect()
        })
    })
}

fn config() -> ParserConfig {
    ParserConfig::default().with_overrides(Some("n0"), Some("n1"))
}

proptest! {
    #[test]
    fn machine_is_never_a_sensor(records in arb_records()) {
        let metadata = parse_metadata(&records, &config()).unwrap();
        if let Some(machine) = metadata.machine_index() {
            prop_assert!(!metadata.sensor_indices().contains(&machine));
        }
    }

    #[test]
    fn sensors_keep_source_order(records in arb_records()) {
        let metadata = parse_metadata(&records, &config()).unwrap();
        for pair in metadata.sensor_indices().windows(2) {
            prop_assert!(pair[0].index() < pair[1].index());
        }
    }

    #[test]
    fn roots_are_never_types_or_properties(records in arb_records()) {
        let metadata = parse_metadata(&records, &config()).unwrap();
        for root in metadata.machine().into_iter().chain(metadata.sensors()) {
            prop_assert!(!root.node().is_object_type());
            prop_assert!(!root.node().is_property());
        }
    }

    #[test]
    fn parsing_is_deterministic(records in arb_records()) {
        let first = parse_metadata(&records, &config()).unwrap();
        let second = parse_metadata(&records, &config()).unwrap();
        prop_assert_eq!(first.machine_index(), second.machine_index());
        prop_assert_eq!(first.sensor_indices(), second.sensor_indices());
        prop_assert_eq!(first.report(), second.report());

        let snapshot = first.snapshot();
        prop_assert_eq!(&snapshot, &second.snapshot());
        prop_assert_eq!(snapshot.digest().unwrap(), second.snapshot().digest().unwrap());
    }

    #[test]
    fn walks_respect_the_depth_bound(records in arb_records()) {
        let metadata = parse_metadata(&records, &config()).unwrap();
        for (index, _) in metadata.graph().iter() {
            let node = mmp_opcua::NodeRef::new(metadata.graph(), index).unwrap();
            prop_assert!(node.walk(MAXIMUM_DEPTH).all(|(depth, _)| depth <= MAXIMUM_DEPTH));
        }
    }

    #[test]
    fn type_matching_terminates_for_every_node(records in arb_records()) {
        let metadata = parse_metadata(&records, &config()).unwrap();
        for (index, _) in metadata.graph().iter() {
            for target in ["n0", "n1", "missing"] {
                let _ = mmp_opcua::matches_type(metadata.graph(), index, Some(target));
            }
            prop_assert!(!mmp_opcua::matches_type(metadata.graph(), index, None));
        }
    }
}
