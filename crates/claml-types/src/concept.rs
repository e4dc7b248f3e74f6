//! CodeSystem concept type.
//!
//! This module provides the `Concept` struct emitted for every ClaML class
//! and for every concept synthesized from modifiers.

use crate::{well_known, Designation};

/// A concept of the generated CodeSystem.
///
/// # Examples
///
/// ```
/// use claml_types::{Concept, PropertyValue};
///
/// let mut concept = Concept::new("A00");
/// concept.display = Some("Cholera".to_string());
/// concept.add_property("parent", PropertyValue::code("A00-A09"));
///
/// assert_eq!(concept.parents().collect::<Vec<_>>(), vec!["A00-A09"]);
/// assert!(concept.has_display());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concept {
    /// Concept code.
    pub code: String,
    /// Display text.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub display: Option<String>,
    /// Definition text.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub definition: Option<String>,
    /// Additional representations, in the order they were found.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "designation", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub designations: Vec<Designation>,
    /// Property values, in the order they were found.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "property", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub properties: Vec<ConceptProperty>,
}

impl Concept {
    /// Creates a concept with only a code.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Returns true if the concept has non-empty display text.
    pub fn has_display(&self) -> bool {
        self.display.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Returns true if the concept has non-empty definition text.
    pub fn has_definition(&self) -> bool {
        self.definition.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Appends a property value.
    pub fn add_property(&mut self, code: impl Into<String>, value: PropertyValue) {
        self.properties.push(ConceptProperty {
            code: code.into(),
            value,
        });
    }

    /// Returns the values of all properties with the given code.
    pub fn property_values<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.properties
            .iter()
            .filter(move |p| p.code == code)
            .map(|p| p.value.as_str())
    }

    /// Returns the codes referenced by `parent` properties.
    pub fn parents(&self) -> impl Iterator<Item = &str> + '_ {
        self.property_values(well_known::PARENT_PROPERTY)
    }

    /// Returns the codes referenced by `child` properties.
    pub fn children(&self) -> impl Iterator<Item = &str> + '_ {
        self.property_values(well_known::CHILD_PROPERTY)
    }
}

/// A property value attached to a concept.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptProperty {
    /// Code of the declared property.
    pub code: String,
    /// Typed value.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub value: PropertyValue,
}

/// Typed value of a concept property.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyValue {
    /// A code, either a reference to another concept or a literal such as a class kind.
    #[cfg_attr(feature = "serde", serde(rename = "valueCode"))]
    Code(String),
    /// Free text.
    #[cfg_attr(feature = "serde", serde(rename = "valueString"))]
    String(String),
}

impl PropertyValue {
    /// Creates a code value.
    pub fn code(code: impl Into<String>) -> Self {
        Self::Code(code.into())
    }

    /// Creates a string value.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Returns the raw value.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Code(v) | Self::String(v) => v,
        }
    }
}
