//! ClaML document model.
//!
//! This module provides the in-memory representation of a parsed ClaML file:
//! metadata, class and rubric kind declarations, modifier classes and classes.
//! A document is read once and never mutated by the transformation.

use crate::Label;

/// A parsed ClaML document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClamlDocument {
    /// `Identifier` elements in document order.
    pub identifiers: Vec<Identifier>,
    /// The `Title` element, if present.
    pub title: Option<Title>,
    /// Declared class kinds.
    pub class_kinds: Vec<ClassKind>,
    /// Declared rubric kinds.
    pub rubric_kinds: Vec<RubricKind>,
    /// Modifier classes in document order.
    pub modifier_classes: Vec<ModifierClass>,
    /// Classes in document order.
    pub classes: Vec<Class>,
}

impl ClamlDocument {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a rubric kind by name.
    pub fn rubric_kind(&self, name: &str) -> Option<&RubricKind> {
        self.rubric_kinds.iter().find(|rk| rk.name == name)
    }

    /// Returns true if a class kind with this name is declared.
    pub fn has_class_kind(&self, name: &str) -> bool {
        self.class_kinds.iter().any(|ck| ck.name == name)
    }
}

/// A `Meta` name/value entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Meta {
    /// Entry name.
    pub name: String,
    /// Entry value.
    pub value: String,
}

impl Meta {
    /// Creates a meta entry.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An `Identifier` element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    /// Issuing authority.
    pub authority: Option<String>,
    /// Unique identifier value.
    pub uid: String,
}

/// The `Title` element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Title {
    /// Short computer-friendly name (`name` attribute).
    pub name: Option<String>,
    /// Business version (`version` attribute).
    pub version: Option<String>,
    /// Publication date (`date` attribute).
    pub date: Option<String>,
    /// Human-readable title text.
    pub content: String,
}

/// A `ClassKind` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassKind {
    /// Kind name, referenced by `Class/@kind`.
    pub name: String,
    /// Human-readable displays.
    pub displays: Vec<String>,
}

/// A `RubricKind` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RubricKind {
    /// Kind name, referenced by `Rubric/@kind`.
    pub name: String,
    /// Human-readable displays.
    pub displays: Vec<String>,
    /// Whether rubrics of this kind are inherited by subclasses.
    pub inherited: bool,
}

impl RubricKind {
    /// Creates a non-inherited rubric kind without displays.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            displays: Vec::new(),
            inherited: false,
        }
    }
}

/// A `Rubric` attached to a class or modifier class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rubric {
    /// Optional rubric identifier.
    pub id: Option<String>,
    /// Name of the referenced rubric kind.
    pub kind: String,
    /// Labels in document order.
    pub labels: Vec<Label>,
}

impl Rubric {
    /// Creates a rubric of the given kind.
    pub fn new(kind: impl Into<String>, labels: Vec<Label>) -> Self {
        Self {
            id: None,
            kind: kind.into(),
            labels,
        }
    }
}

/// A `ModifiedBy` reference on a class.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifiedBy {
    /// Code of the modifier group.
    pub code: String,
    /// When false, only `valid_modifier_classes` apply.
    pub all: bool,
    /// Codes of the allowed modifier classes (`ValidModifierClass`).
    pub valid_modifier_classes: Vec<String>,
}

impl ModifiedBy {
    /// Creates a reference applying every class of the modifier group.
    pub fn all(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            all: true,
            valid_modifier_classes: Vec::new(),
        }
    }

    /// Creates a reference restricted to the listed modifier classes.
    pub fn only<I, S>(code: impl Into<String>, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            code: code.into(),
            all: false,
            valid_modifier_classes: valid.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if the modifier class with this code may be applied.
    pub fn allows(&self, modifier_class_code: &str) -> bool {
        self.all
            || self
                .valid_modifier_classes
                .iter()
                .any(|c| c == modifier_class_code)
    }
}

/// A `ModifierClass`: one qualifier variant of a modifier group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierClass {
    /// Code of the owning modifier group (`modifier` attribute).
    pub modifier: String,
    /// Code of this variant, appended to a class code when applied.
    pub code: String,
    /// `Meta` entries.
    pub meta: Vec<Meta>,
    /// Rubrics in document order.
    pub rubrics: Vec<Rubric>,
}

impl ModifierClass {
    /// Returns the suffix appended to a class code.
    pub fn suffix(&self) -> &str {
        &self.code
    }

    /// Returns the values of all meta entries with the given name.
    pub fn meta_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.meta
            .iter()
            .filter(move |m| m.name == name)
            .map(|m| m.value.as_str())
    }
}

/// A `Class`: one concept of the classification.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    /// Class code, unique within the document.
    pub code: String,
    /// Class kind name.
    pub kind: Option<String>,
    /// `SuperClass` codes in document order.
    pub super_classes: Vec<String>,
    /// `SubClass` codes in document order.
    pub sub_classes: Vec<String>,
    /// `ModifiedBy` references in declaration order.
    pub modified_by: Vec<ModifiedBy>,
    /// Modifier group codes excluded for this class.
    pub exclude_modifiers: Vec<String>,
    /// Rubrics in document order.
    pub rubrics: Vec<Rubric>,
}

impl Class {
    /// Creates a class with a code and kind.
    pub fn new(code: impl Into<String>, kind: Option<&str>) -> Self {
        Self {
            code: code.into(),
            kind: kind.map(str::to_string),
            ..Default::default()
        }
    }
}
