// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reference queries over raw node records.
//!
//! Browse names are matched ASCII case-insensitively; target ids are not.

use crate::raw::{RawNodeRecord, RawReference};

/// Reference types the engine interprets. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceType {
    /// Instance to its type definition.
    HasTypeDefinition,
    /// Supertype to subtype; read inverse on the subtype.
    HasSubtype,
    /// Node to a property variable.
    HasProperty,
    /// Node to a component object or variable.
    HasComponent,
    /// Folder-style containment, treated like `HasComponent`.
    Organizes,
}

impl ReferenceType {
    /// Standard browse name.
    pub const fn browse_name(self) -> &'static str {
        match self {
            Self::HasTypeDefinition => "HasTypeDefinition",
            Self::HasSubtype => "HasSubtype",
            Self::HasProperty => "HasProperty",
            Self::HasComponent => "HasComponent",
            Self::Organizes => "Organizes",
        }
    }

    /// True when `name` spells this reference type, ignoring ASCII case.
    pub fn matches(self, name: &str) -> bool {
        name.eq_ignore_ascii_case(self.browse_name())
    }
}

/// References of `ty` in direction `is_forward`, in source order.
pub fn references(
    record: &RawNodeRecord,
    ty: ReferenceType,
    is_forward: bool,
) -> impl Iterator<Item = &RawReference> + '_ {
    record
        .references
        .iter()
        .filter(move |r| r.is_forward == is_forward && ty.matches(&r.reference_type))
}

/// Target of the first forward `HasTypeDefinition` reference.
pub fn type_definition(record: &RawNodeRecord) -> Option<&str> {
    references(record, ReferenceType::HasTypeDefinition, true)
        .next()
        .map(|r| r.target.as_str())
}

/// Target of the first inverse `HasSubtype` reference.
pub fn supertype(record: &RawNodeRecord) -> Option<&str> {
    references(record, ReferenceType::HasSubtype, false)
        .next()
        .map(|r| r.target.as_str())
}

/// Targets of forward `HasProperty` references.
pub fn property_targets(record: &RawNodeRecord) -> impl Iterator<Item = &str> + '_ {
    references(record, ReferenceType::HasProperty, true).map(|r| r.target.as_str())
}

/// Targets of forward `HasComponent` references, then of forward `Organizes`.
pub fn component_targets(record: &RawNodeRecord) -> impl Iterator<Item = &str> + '_ {
    references(record, ReferenceType::HasComponent, true)
        .chain(references(record, ReferenceType::Organizes, true))
        .map(|r| r.target.as_str())
}

/// True when the record's type definition is exactly `type_id`.
pub fn is_of_type(record: &RawNodeRecord, type_id: &str) -> bool {
    type_definition(record) == Some(type_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(references: Vec<RawReference>) -> RawNodeRecord {
        RawNodeRecord {
            node_id: Some("ns=1;i=5001".into()),
            references,
            ..RawNodeRecord::default()
        }
    }

    #[test]
    fn browse_names_ignore_case() {
        assert!(ReferenceType::HasComponent.matches("hascomponent"));
        assert!(ReferenceType::Organizes.matches("ORGANIZES"));
        assert!(!ReferenceType::HasProperty.matches("HasPropertyX"));
    }

    #[test]
    fn first_type_definition_wins() {
        let r = record(vec![
            RawReference::inverse("HasTypeDefinition", "ns=1;i=9"),
            RawReference::forward("HasTypeDefinition", "ns=1;i=1"),
            RawReference::forward("HasTypeDefinition", "ns=1;i=2"),
        ]);
        assert_eq!(type_definition(&r), Some("ns=1;i=1"));
        assert!(is_of_type(&r, "ns=1;i=1"));
        assert!(!is_of_type(&r, "ns=1;i=2"));
    }

    #[test]
    fn supertype_reads_inverse_has_subtype_only() {
        let r = record(vec![
            RawReference::forward("HasSubtype", "ns=1;i=30"),
            RawReference::inverse("HasSubtype", "i=58"),
        ]);
        assert_eq!(supertype(&r), Some("i=58"));
    }

    #[test]
    fn components_precede_organized_children() {
        let r = record(vec![
            RawReference::forward("Organizes", "o1"),
            RawReference::forward("HasComponent", "c1"),
            RawReference::forward("HasProperty", "p1"),
            RawReference::forward("Organizes", "o2"),
            RawReference::inverse("HasComponent", "parent"),
            RawReference::forward("HasComponent", "c2"),
        ]);
        let components: Vec<_> = component_targets(&r).collect();
        assert_eq!(components, ["c1", "c2", "o1", "o2"]);
        let properties: Vec<_> = property_targets(&r).collect();
        assert_eq!(properties, ["p1"]);
    }
}
