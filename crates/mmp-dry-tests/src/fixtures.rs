// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference information model: one machine and two sensors.
//!
//! Layout (ids in namespace 1):
//!
//! ```text
//! Machine (MachineType, i=2027)
//!   Manufacturer, Seriennummer              properties
//! LichtSensor / TemperaturSensor (subtypes of SensorType, i=1)
//!   Konfiguration    SensorTyp, IoPin       properties
//!   Lichtstaerke / Temperatur
//!     Einheit                               property
//!     Messwert                              variable
//!   Stammdaten       Hersteller, Seriennummer
//!     Standort       Laengengrad, Breitengrad variables
//! ```

use mmp_opcua::{RawNodeRecord, DEFAULT_MACHINE_TYPE_ID, DEFAULT_SENSOR_TYPE_ID};

use crate::nodes::{data_variable, property_node, RawNodeBuilder};

/// `BaseObjectType`; referenced by the fixture but not part of the node set.
pub const BASE_OBJECT_TYPE_ID: &str = "i=58";
/// `FolderType`; referenced by the fixture but not part of the node set.
pub const FOLDER_TYPE_ID: &str = "i=61";
/// Light sensor subtype of the sensor type.
pub const LIGHT_SENSOR_TYPE_ID: &str = "ns=1;i=1003";
/// Temperature sensor subtype of the sensor type.
pub const TEMPERATURE_SENSOR_TYPE_ID: &str = "ns=1;i=1004";
/// Machine instance.
pub const MACHINE_ID: &str = "ns=1;i=5001";
/// Light sensor instance.
pub const LIGHT_SENSOR_ID: &str = "ns=1;i=5002";
/// Temperature sensor instance.
pub const TEMPERATURE_SENSOR_ID: &str = "ns=1;i=5003";

struct SensorFixture<'a> {
    /// First id of the block reserved for this sensor's children.
    base: u32,
    id: &'a str,
    name: &'a str,
    type_id: &'a str,
    sensor_kind: &'a str,
    io_pin: &'a str,
    measurement: &'a str,
    unit: &'a str,
    data_type: &'a str,
    value: &'a str,
    longitude: &'a str,
    latitude: &'a str,
    manufacturer: &'a str,
    serial: &'a str,
}

/// The machine/sensor node set, types first, then instances in source order.
pub fn machine_with_two_sensors() -> Vec<RawNodeRecord> {
    let mut nodes = vec![
        RawNodeBuilder::object_type(DEFAULT_MACHINE_TYPE_ID)
            .display_name("MachineType")
            .subtype_of(BASE_OBJECT_TYPE_ID)
            .build(),
        RawNodeBuilder::object_type(DEFAULT_SENSOR_TYPE_ID)
            .display_name("SensorType")
            .subtype_of(BASE_OBJECT_TYPE_ID)
            .build(),
        RawNodeBuilder::object_type(LIGHT_SENSOR_TYPE_ID)
            .display_name("LichtSensorType")
            .subtype_of(DEFAULT_SENSOR_TYPE_ID)
            .build(),
        RawNodeBuilder::object_type(TEMPERATURE_SENSOR_TYPE_ID)
            .display_name("TemperaturSensorType")
            .subtype_of(DEFAULT_SENSOR_TYPE_ID)
            .build(),
        RawNodeBuilder::object(MACHINE_ID)
            .display_name("Machine")
            .type_definition(DEFAULT_MACHINE_TYPE_ID)
            .property("ns=1;i=6001")
            .property("ns=1;i=6002")
            .build(),
        property_node(
            "ns=1;i=6001",
            MACHINE_ID,
            "Manufacturer",
            "String",
            "Special Manufacturer",
        ),
        property_node(
            "ns=1;i=6002",
            MACHINE_ID,
            "Seriennummer",
            "String",
            "456156188561",
        ),
    ];

    nodes.extend(sensor(&SensorFixture {
        base: 6100,
        id: LIGHT_SENSOR_ID,
        name: "LichtSensor",
        type_id: LIGHT_SENSOR_TYPE_ID,
        sensor_kind: "Licht",
        io_pin: "2",
        measurement: "Lichtstaerke",
        unit: "lx",
        data_type: "UInt32",
        value: "0",
        longitude: "9.107",
        latitude: "48.74518",
        manufacturer: "Manufacturer XYZ",
        serial: "080312278",
    }));
    nodes.extend(sensor(&SensorFixture {
        base: 6200,
        id: TEMPERATURE_SENSOR_ID,
        name: "TemperaturSensor",
        type_id: TEMPERATURE_SENSOR_TYPE_ID,
        sensor_kind: "Temperatur",
        io_pin: "0",
        measurement: "Temperatur",
        unit: "Kelvin",
        data_type: "Float",
        value: "0.0",
        longitude: "9.107",
        latitude: "48.7451",
        manufacturer: "Manufacturer ZYX",
        serial: "HW75SQx9",
    }));
    nodes
}

fn sensor(s: &SensorFixture<'_>) -> Vec<RawNodeRecord> {
    let id = |offset: u32| format!("ns=1;i={}", s.base + offset);
    let (config, measurement, master, location) = (id(0), id(10), id(20), id(30));

    vec![
        RawNodeBuilder::object(s.id)
            .display_name(s.name)
            .type_definition(s.type_id)
            .component(&config)
            .component(&measurement)
            .component(&master)
            .build(),
        RawNodeBuilder::object(&config)
            .display_name("Konfiguration")
            .type_definition(BASE_OBJECT_TYPE_ID)
            .component_of(s.id)
            .property(&id(1))
            .property(&id(2))
            .build(),
        property_node(&id(1), &config, "SensorTyp", "String", s.sensor_kind),
        property_node(&id(2), &config, "IoPin", "UInt16", s.io_pin),
        RawNodeBuilder::object(&measurement)
            .display_name(s.measurement)
            .type_definition(BASE_OBJECT_TYPE_ID)
            .component_of(s.id)
            .property(&id(11))
            .component(&id(12))
            .build(),
        property_node(&id(11), &measurement, "Einheit", "String", s.unit),
        data_variable(&id(12), &measurement, "Messwert", s.data_type, s.value),
        RawNodeBuilder::object(&master)
            .display_name("Stammdaten")
            .type_definition(FOLDER_TYPE_ID)
            .component_of(s.id)
            .property(&id(21))
            .property(&id(22))
            .organizes(&location)
            .build(),
        property_node(&id(21), &master, "Hersteller", "String", s.manufacturer),
        property_node(&id(22), &master, "Seriennummer", "String", s.serial),
        RawNodeBuilder::object(&location)
            .display_name("Standort")
            .type_definition(BASE_OBJECT_TYPE_ID)
            .component(&id(31))
            .component(&id(32))
            .build(),
        data_variable(&id(31), &location, "Laengengrad", "Double", s.longitude),
        data_variable(&id(32), &location, "Breitengrad", "Double", s.latitude),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn fixture_ids_are_unique() {
        let nodes = machine_with_two_sensors();
        let ids: HashSet<_> = nodes.iter().filter_map(|n| n.node_id.clone()).collect();
        assert_eq!(ids.len(), nodes.len());
    }
}
