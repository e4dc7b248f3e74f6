//! FHIR CodeSystem enumeration types.
//!
//! This module provides enum representations for the coded values a generated
//! CodeSystem carries: hierarchy meaning, content mode, publication status and
//! property type.

use std::str::FromStr;

/// Error returned when a code does not match any known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCodeError {
    /// The kind of value that was being parsed (e.g. "hierarchy meaning").
    pub kind: &'static str,
    /// The code that was not recognized.
    pub code: String,
}

impl std::fmt::Display for UnknownCodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.code)
    }
}

impl std::error::Error for UnknownCodeError {}

/// The meaning of the hierarchy of concepts in a CodeSystem.
///
/// # Examples
///
/// ```
/// use claml_types::HierarchyMeaning;
///
/// let meaning = HierarchyMeaning::from_code("part-of");
/// assert_eq!(meaning, Some(HierarchyMeaning::PartOf));
/// assert_eq!(HierarchyMeaning::default().as_code(), "is-a");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum HierarchyMeaning {
    /// Children are subtypes of their parent.
    #[default]
    IsA,
    /// Children are components of their parent.
    PartOf,
    /// Children are grouped under their parent for convenience.
    GroupedBy,
    /// Children are classified under their parent.
    ClassifiedWith,
}

impl HierarchyMeaning {
    /// All hierarchy meanings, in declaration order.
    pub const ALL: [Self; 4] = [Self::IsA, Self::PartOf, Self::GroupedBy, Self::ClassifiedWith];

    /// Creates a HierarchyMeaning from its FHIR code.
    ///
    /// Returns `None` if the code is not recognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "is-a" => Some(Self::IsA),
            "part-of" => Some(Self::PartOf),
            "grouped-by" => Some(Self::GroupedBy),
            "classified-with" => Some(Self::ClassifiedWith),
            _ => None,
        }
    }

    /// Returns the FHIR code for this hierarchy meaning.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::IsA => "is-a",
            Self::PartOf => "part-of",
            Self::GroupedBy => "grouped-by",
            Self::ClassifiedWith => "classified-with",
        }
    }
}

impl FromStr for HierarchyMeaning {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCodeError {
            kind: "hierarchy meaning",
            code: s.to_string(),
        })
    }
}

/// The extent of the content of a CodeSystem.
///
/// The value is carried through to the output and does not change the
/// transformation itself.
///
/// # Examples
///
/// ```
/// use claml_types::ContentMode;
///
/// let mode: ContentMode = "fragment".parse().unwrap();
/// assert_eq!(mode, ContentMode::Fragment);
/// assert_eq!(ContentMode::default(), ContentMode::Complete);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ContentMode {
    /// None of the concepts are present.
    NotPresent,
    /// A few representative concepts are included.
    Example,
    /// A subset of the concepts is included.
    Fragment,
    /// All concepts are included.
    #[default]
    Complete,
    /// The resource supplements another code system.
    Supplement,
}

impl ContentMode {
    /// All content modes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::NotPresent,
        Self::Example,
        Self::Fragment,
        Self::Complete,
        Self::Supplement,
    ];

    /// Creates a ContentMode from its FHIR code.
    ///
    /// Returns `None` if the code is not recognized.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "not-present" => Some(Self::NotPresent),
            "example" => Some(Self::Example),
            "fragment" => Some(Self::Fragment),
            "complete" => Some(Self::Complete),
            "supplement" => Some(Self::Supplement),
            _ => None,
        }
    }

    /// Returns the FHIR code for this content mode.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::NotPresent => "not-present",
            Self::Example => "example",
            Self::Fragment => "fragment",
            Self::Complete => "complete",
            Self::Supplement => "supplement",
        }
    }
}

impl FromStr for ContentMode {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| UnknownCodeError {
            kind: "content mode",
            code: s.to_string(),
        })
    }
}

/// Publication status of a CodeSystem.
///
/// Generated resources are always drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PublicationStatus {
    /// Not yet ready for use.
    #[default]
    Draft,
    /// Ready for use.
    Active,
    /// Withdrawn.
    Retired,
    /// Status is not known.
    Unknown,
}

/// Value type of a CodeSystem property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum PropertyType {
    /// A code defined in this code system.
    Code,
    /// A code from another code system.
    Coding,
    /// Free text.
    String,
    /// An integer value.
    Integer,
    /// A boolean value.
    Boolean,
}
