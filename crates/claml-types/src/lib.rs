//! # claml-types
//!
//! Type definitions for ClaML classifications and the FHIR CodeSystem they
//! are transformed into.
//!
//! This crate provides the parsed ClaML document model (classes, rubrics,
//! labels, modifier classes) and the output model (concepts, designations,
//! properties, CodeSystem metadata).
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   The output types serialize to FHIR R4 JSON.
//!
//! ## Usage
//!
//! ```rust
//! use claml_types::{Class, Concept, Label, PropertyValue, Rubric};
//! use claml_types::well_known;
//!
//! let mut class = Class::new("A00", Some("category"));
//! class.rubrics.push(Rubric::new("preferred", vec![Label::text("en", "Cholera")]));
//! class.super_classes.push("A00-A09".to_string());
//!
//! let mut concept = Concept::new(&class.code);
//! concept.add_property(well_known::PARENT_PROPERTY, PropertyValue::code("A00-A09"));
//! assert_eq!(concept.parents().next(), Some("A00-A09"));
//! ```

#![warn(missing_docs)]

mod codesystem;
mod concept;
mod designation;
mod document;
mod enums;
mod label;
pub mod well_known;

// Re-export all public types at crate root
pub use codesystem::{CodeSystem, CodeSystemIdentifier, PropertyDefinition};
pub use concept::{Concept, ConceptProperty, PropertyValue};
pub use designation::{Coding, Designation};
pub use document::{
    ClamlDocument, Class, ClassKind, Identifier, Meta, ModifiedBy, ModifierClass, Rubric,
    RubricKind, Title,
};
pub use enums::{ContentMode, HierarchyMeaning, PropertyType, PublicationStatus, UnknownCodeError};
pub use label::{Label, LabelNode, TermClass};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        // Verify all types are accessible from crate root
        let _doc = ClamlDocument::new();
        let _meaning = HierarchyMeaning::IsA;
        let _mode = ContentMode::Complete;
        let _status = PublicationStatus::Draft;
        let _term = TermClass::Italics;
        let _value = PropertyValue::code("A");
    }

    #[test]
    fn test_well_known_accessible() {
        assert_eq!(well_known::KIND_PROPERTY, "kind");
        assert_eq!(well_known::CHILD_PROPERTY, "child");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let mut concept = Concept::new("A.1");
        concept.display = Some("Section A.1".to_string());
        concept.designations.push(Designation::new("inclusion", "A one", None));

        let json = serde_json::to_string(&concept).unwrap();
        let parsed: Concept = serde_json::from_str(&json).unwrap();
        assert_eq!(concept, parsed);
    }
}
