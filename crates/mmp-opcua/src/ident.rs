// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types and well-known OPC UA node ids.
use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// `PropertyType` (ns=0). Variables typed by it are metadata, not measurements.
pub const DEFAULT_PROPERTY_TYPE_ID: &str = "i=68";
/// `BaseDataVariableType` (ns=0). Variables typed by it carry live values.
pub const DEFAULT_VARIABLE_TYPE_ID: &str = "i=63";
/// Machine root type in the deployment's companion namespace.
pub const DEFAULT_MACHINE_TYPE_ID: &str = "ns=1;i=2027";
/// Sensor root type in the deployment's companion namespace.
pub const DEFAULT_SENSOR_TYPE_ID: &str = "ns=1;i=1";

/// Textual OPC UA node id (`ns=1;i=2027`, `i=68`, `ns=2;s=Boiler`).
///
/// Ids are compared verbatim. Two spellings of the same node (`ns=0;i=68` vs
/// `i=68`) are different ids here, matching how the model reader emits them.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wraps an id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Position of a node in the resolved arena.
///
/// Indices follow the order of the raw record list, so iterating the arena by
/// index reproduces source order. They are only meaningful for the graph that
/// produced them.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    /// Returns the raw arena position.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
