//! CodeSystem designation type.
//!
//! This module provides the `Designation` struct: an additional
//! representation of a concept, tagged with the rubric kind it came from.

/// An additional representation of a concept.
///
/// # Examples
///
/// ```
/// use claml_types::Designation;
///
/// let designation = Designation::new("inclusion", "Asiatic cholera", Some("en".to_string()));
/// assert_eq!(designation.use_code(), "inclusion");
/// assert_eq!(designation.value, "Asiatic cholera");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Designation {
    /// Language of the text.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub language: Option<String>,
    /// Role of the designation: the rubric kind name.
    #[cfg_attr(feature = "serde", serde(rename = "use"))]
    pub use_: Coding,
    /// The text.
    pub value: String,
}

impl Designation {
    /// Creates a designation with the given role, text and language.
    pub fn new(use_code: impl Into<String>, value: impl Into<String>, language: Option<String>) -> Self {
        Self {
            language,
            use_: Coding::new(use_code),
            value: value.into(),
        }
    }

    /// Returns the role code.
    pub fn use_code(&self) -> &str {
        &self.use_.code
    }
}

/// A code with an optional system.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coding {
    /// Code system URI.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub system: Option<String>,
    /// The code.
    pub code: String,
}

impl Coding {
    /// Creates a coding without a system.
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            system: None,
            code: code.into(),
        }
    }
}
