//! FHIR CodeSystem resource.
//!
//! This module provides the `CodeSystem` struct handed to a serializer once a
//! ClaML document has been transformed, together with its property
//! declarations and business identifiers.

use crate::{Concept, ContentMode, HierarchyMeaning, PropertyType, PublicationStatus};

/// A FHIR R4 CodeSystem resource.
///
/// Serializes to FHIR JSON when the `serde` feature is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CodeSystem {
    /// Always `CodeSystem`.
    pub resource_type: String,
    /// Technical id.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,
    /// Canonical URL.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub url: Option<String>,
    /// Business identifiers.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "identifier", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub identifiers: Vec<CodeSystemIdentifier>,
    /// Business version.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub version: Option<String>,
    /// Computer-friendly name.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub name: Option<String>,
    /// Publication status.
    pub status: PublicationStatus,
    /// Whether the resource is for testing purposes.
    pub experimental: bool,
    /// Publication date.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub date: Option<String>,
    /// Natural language description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// Value set representing the entire code system.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub value_set: Option<String>,
    /// Meaning of the concept hierarchy.
    pub hierarchy_meaning: HierarchyMeaning,
    /// Whether concept permanence across versions is not guaranteed.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "std::ops::Not::not"))]
    pub version_needed: bool,
    /// Extent of the content.
    pub content: ContentMode,
    /// Total number of concepts.
    pub count: usize,
    /// Property declarations.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "property", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub properties: Vec<PropertyDefinition>,
    /// Concepts: declared classes first, then synthesized ones.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "concept", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub concepts: Vec<Concept>,
}

impl Default for CodeSystem {
    fn default() -> Self {
        Self {
            resource_type: "CodeSystem".to_string(),
            id: None,
            url: None,
            identifiers: Vec::new(),
            version: None,
            name: None,
            status: PublicationStatus::Draft,
            experimental: true,
            date: None,
            description: None,
            value_set: None,
            hierarchy_meaning: HierarchyMeaning::default(),
            version_needed: false,
            content: ContentMode::default(),
            count: 0,
            properties: Vec::new(),
            concepts: Vec::new(),
        }
    }
}

impl CodeSystem {
    /// Creates an empty draft, experimental CodeSystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a concept by code.
    pub fn concept(&self, code: &str) -> Option<&Concept> {
        self.concepts.iter().find(|c| c.code == code)
    }

    /// Looks up a property declaration by code.
    pub fn property(&self, code: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.code == code)
    }
}

/// A business identifier of the CodeSystem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CodeSystemIdentifier {
    /// Namespace of the value.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub system: Option<String>,
    /// The identifier value.
    pub value: String,
}

/// A property declared by the CodeSystem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PropertyDefinition {
    /// Property code, referenced from concept properties.
    pub code: String,
    /// Why the property is defined and how it is used.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
    /// Value type.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub type_: PropertyType,
}

impl PropertyDefinition {
    /// Creates a property declaration without description.
    pub fn new(code: impl Into<String>, type_: PropertyType) -> Self {
        Self {
            code: code.into(),
            description: None,
            type_,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_system_defaults() {
        let cs = CodeSystem::new();
        assert_eq!(cs.resource_type, "CodeSystem");
        assert_eq!(cs.status, PublicationStatus::Draft);
        assert!(cs.experimental);
        assert_eq!(cs.count, 0);
        assert!(cs.concept("A").is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_code_system_json() {
        let mut cs = CodeSystem::new();
        cs.id = Some("icd10".to_string());
        cs.properties.push(PropertyDefinition::new("kind", PropertyType::Code));
        cs.concepts.push(Concept::new("A"));
        cs.count = 1;

        let json = serde_json::to_value(&cs).unwrap();
        assert_eq!(json["resourceType"], "CodeSystem");
        assert_eq!(json["id"], "icd10");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["experimental"], true);
        assert_eq!(json["hierarchyMeaning"], "is-a");
        assert_eq!(json["content"], "complete");
        assert_eq!(json["count"], 1);
        assert_eq!(json["property"][0]["type"], "code");
        assert_eq!(json["concept"][0]["code"], "A");
        assert!(json.get("versionNeeded").is_none());
        assert!(json.get("url").is_none());

        let parsed: CodeSystem = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, cs);
    }
}
