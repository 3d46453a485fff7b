// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Type-id configuration for the build and classify stages.

use serde::{Deserialize, Serialize};

use crate::ident::{
    NodeId, DEFAULT_MACHINE_TYPE_ID, DEFAULT_PROPERTY_TYPE_ID, DEFAULT_SENSOR_TYPE_ID,
    DEFAULT_VARIABLE_TYPE_ID,
};

/// Type ids that decide whether a raw variable becomes a property or a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Type definition of property variables.
    pub property_type_id: NodeId,
    /// Type definition of data variables.
    pub variable_type_id: NodeId,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            property_type_id: NodeId::from(DEFAULT_PROPERTY_TYPE_ID),
            variable_type_id: NodeId::from(DEFAULT_VARIABLE_TYPE_ID),
        }
    }
}

/// Type ids that mark machine and sensor roots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifyConfig {
    /// Machine root type (matched anywhere up the supertype chain).
    pub machine_type_id: NodeId,
    /// Sensor root type (matched anywhere up the supertype chain).
    pub sensor_type_id: NodeId,
}

impl Default for ClassifyConfig {
    fn default() -> Self {
        Self {
            machine_type_id: NodeId::from(DEFAULT_MACHINE_TYPE_ID),
            sensor_type_id: NodeId::from(DEFAULT_SENSOR_TYPE_ID),
        }
    }
}

impl ClassifyConfig {
    /// Defaults with optional per-upload overrides; `None` keeps the default.
    pub fn with_overrides(machine_type_id: Option<&str>, sensor_type_id: Option<&str>) -> Self {
        let mut config = Self::default();
        if let Some(id) = machine_type_id {
            config.machine_type_id = NodeId::from(id);
        }
        if let Some(id) = sensor_type_id {
            config.sensor_type_id = NodeId::from(id);
        }
        config
    }
}

/// Persisted parser settings (all four type ids).
///
/// Missing keys in a stored blob fall back to the built-in OPC UA ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// See [`BuildConfig::property_type_id`].
    pub property_type_id: String,
    /// See [`BuildConfig::variable_type_id`].
    pub variable_type_id: String,
    /// See [`ClassifyConfig::machine_type_id`].
    pub machine_type_id: String,
    /// See [`ClassifyConfig::sensor_type_id`].
    pub sensor_type_id: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            property_type_id: DEFAULT_PROPERTY_TYPE_ID.to_owned(),
            variable_type_id: DEFAULT_VARIABLE_TYPE_ID.to_owned(),
            machine_type_id: DEFAULT_MACHINE_TYPE_ID.to_owned(),
            sensor_type_id: DEFAULT_SENSOR_TYPE_ID.to_owned(),
        }
    }
}

impl ParserConfig {
    /// Applies per-upload machine/sensor overrides; `None` keeps the current id.
    pub fn with_overrides(mut self, machine_type_id: Option<&str>, sensor_type_id: Option<&str>) -> Self {
        if let Some(id) = machine_type_id {
            id.clone_into(&mut self.machine_type_id);
        }
        if let Some(id) = sensor_type_id {
            id.clone_into(&mut self.sensor_type_id);
        }
        self
    }

    /// Build-stage view.
    pub fn build_config(&self) -> BuildConfig {
        BuildConfig {
            property_type_id: NodeId::from(self.property_type_id.as_str()),
            variable_type_id: NodeId::from(self.variable_type_id.as_str()),
        }
    }

    /// Classify-stage view.
    pub fn classify_config(&self) -> ClassifyConfig {
        ClassifyConfig {
            machine_type_id: NodeId::from(self.machine_type_id.as_str()),
            sensor_type_id: NodeId::from(self.sensor_type_id.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn absent_overrides_keep_defaults() {
        assert_eq!(
            ClassifyConfig::with_overrides(None, None),
            ClassifyConfig::default()
        );
        let cfg = ClassifyConfig::with_overrides(Some("ns=2;i=10"), None);
        assert_eq!(cfg.machine_type_id.as_str(), "ns=2;i=10");
        assert_eq!(cfg.sensor_type_id.as_str(), DEFAULT_SENSOR_TYPE_ID);
    }

    #[test]
    fn parser_config_views_match_fields() {
        let cfg = ParserConfig::default().with_overrides(None, Some("ns=3;i=4"));
        assert_eq!(cfg.build_config(), BuildConfig::default());
        assert_eq!(cfg.classify_config().sensor_type_id.as_str(), "ns=3;i=4");
        assert_eq!(
            cfg.classify_config().machine_type_id.as_str(),
            DEFAULT_MACHINE_TYPE_ID
        );
    }

    #[test]
    fn partial_blob_fills_in_defaults() {
        let cfg: ParserConfig = serde_json::from_str(r#"{"sensorTypeId":"ns=4;i=1"}"#).unwrap();
        assert_eq!(cfg.sensor_type_id, "ns=4;i=1");
        assert_eq!(cfg.property_type_id, DEFAULT_PROPERTY_TYPE_ID);
        assert_eq!(cfg.machine_type_id, DEFAULT_MACHINE_TYPE_ID);
    }
}
