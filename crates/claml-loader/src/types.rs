//! Loader-specific types: errors, transformation options and statistics.

use claml_types::{well_known, ContentMode, HierarchyMeaning, UnknownCodeError};
use thiserror::Error;

/// Errors that can abort a ClaML transformation.
///
/// Everything else (unknown kinds, empty labels, duplicate codes, ...) is
/// logged and skipped rather than surfaced.
#[derive(Error, Debug)]
pub enum ClamlError {
    /// I/O error reading or writing a file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed XML.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed XML attribute.
    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    /// The document root is not a `ClaML` element.
    #[error("Not a ClaML document: root element is '{found}'")]
    NotClaml {
        /// The root element that was found.
        found: String,
    },

    /// A required attribute is absent.
    #[error("Missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// The element missing the attribute.
        element: String,
        /// The attribute name.
        attribute: String,
    },

    /// The document ended inside an element.
    #[error("Unexpected end of document inside '{element}'")]
    UnexpectedEof {
        /// The element that was still open.
        element: String,
    },

    /// An option value is not valid.
    #[error("Invalid value for option '{option}': {value}")]
    InvalidOption {
        /// The option name.
        option: String,
        /// The rejected value.
        value: String,
    },

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },
}

impl ClamlError {
    pub(crate) fn invalid_option(option: &str, err: UnknownCodeError) -> Self {
        Self::InvalidOption {
            option: option.to_string(),
            value: err.code,
        }
    }
}

/// Result type for ClaML operations.
pub type ClamlResult<T> = Result<T, ClamlError>;

/// Configuration for a ClaML transformation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformConfig {
    /// Rubric kinds that may hold the display, highest priority first.
    pub display_rubrics: Vec<String>,
    /// Rubric kind holding the definition.
    pub definition_rubric: String,
    /// Rubric kinds turned into designations.
    pub designation_rubrics: Vec<String>,
    /// Class kinds to leave out entirely.
    pub exclude_class_kinds: Vec<String>,
    /// Whether classes without a kind are left out.
    pub exclude_kindless_classes: bool,
    /// Hierarchy meaning of the output.
    pub hierarchy_meaning: HierarchyMeaning,
    /// Content mode of the output.
    pub content: ContentMode,
    /// Whether modifier classes are applied to synthesize concepts.
    pub apply_modifiers: bool,
    /// Whether the code system needs a version to be unambiguous.
    pub version_needed: bool,
    /// Technical id of the output resource.
    pub id: Option<String>,
    /// Canonical URL of the output resource.
    pub url: Option<String>,
    /// Value set representing the whole code system.
    pub value_set: Option<String>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            display_rubrics: vec![well_known::DEFAULT_DISPLAY_RUBRIC.to_string()],
            definition_rubric: well_known::DEFAULT_DEFINITION_RUBRIC.to_string(),
            designation_rubrics: vec![],
            exclude_class_kinds: vec![],
            exclude_kindless_classes: false,
            hierarchy_meaning: HierarchyMeaning::default(),
            content: ContentMode::default(),
            apply_modifiers: false,
            version_needed: false,
            id: None,
            url: None,
            value_set: None,
        }
    }
}

impl TransformConfig {
    /// Creates a config that also expands modifiers.
    pub fn with_modifiers() -> Self {
        Self {
            apply_modifiers: true,
            ..Default::default()
        }
    }

    /// Sets the display rubric priority list; an empty list keeps the default.
    pub fn display_rubrics<I, S>(mut self, rubrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rubrics: Vec<String> = rubrics.into_iter().map(Into::into).collect();
        if !rubrics.is_empty() {
            self.display_rubrics = rubrics;
        }
        self
    }

    /// Sets the designation rubric list.
    pub fn designation_rubrics<I, S>(mut self, rubrics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.designation_rubrics = rubrics.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the hierarchy meaning from its FHIR code.
    pub fn hierarchy_meaning_code(mut self, code: &str) -> ClamlResult<Self> {
        self.hierarchy_meaning = code
            .parse()
            .map_err(|e| ClamlError::invalid_option("hierarchyMeaning", e))?;
        Ok(self)
    }

    /// Sets the content mode from its FHIR code.
    pub fn content_code(mut self, code: &str) -> ClamlResult<Self> {
        self.content = code
            .parse()
            .map_err(|e| ClamlError::invalid_option("content", e))?;
        Ok(self)
    }

    /// Returns true if rubrics of this kind are turned into something other
    /// than a generic property.
    pub fn consumes_rubric(&self, kind: &str) -> bool {
        kind == self.definition_rubric
            || self.display_rubrics.iter().any(|r| r == kind)
            || self.designation_rubrics.iter().any(|r| r == kind)
    }
}

/// Statistics from transforming a ClaML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformStats {
    /// Classes read from the document.
    pub classes_read: usize,
    /// Concepts built from declared classes.
    pub declared_concepts: usize,
    /// Concepts synthesized from modifiers.
    pub modifier_concepts: usize,
    /// Classes left out by kind filters.
    pub excluded_classes: usize,
    /// Classes dropped because their code was already used.
    pub duplicate_codes: usize,
    /// Modifier codes skipped because they clash with an existing concept.
    pub modifier_collisions: usize,
    /// Labels dropped because they resolved to empty text.
    pub empty_labels: usize,
}

impl TransformStats {
    /// Total number of concepts in the output.
    pub fn total_concepts(&self) -> usize {
        self.declared_concepts + self.modifier_concepts
    }

    /// Returns the percentage of classes that became concepts.
    pub fn inclusion_rate(&self) -> f64 {
        if self.classes_read == 0 {
            0.0
        } else {
            (self.declared_concepts as f64 / self.classes_read as f64) * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_config_default() {
        let config = TransformConfig::default();
        assert_eq!(config.display_rubrics, vec!["preferred"]);
        assert_eq!(config.definition_rubric, "definition");
        assert!(config.designation_rubrics.is_empty());
        assert!(config.exclude_class_kinds.is_empty());
        assert!(!config.exclude_kindless_classes);
        assert_eq!(config.hierarchy_meaning, HierarchyMeaning::IsA);
        assert_eq!(config.content, ContentMode::Complete);
        assert!(!config.apply_modifiers);
        assert!(!config.version_needed);
    }

    #[test]
    fn test_empty_display_list_keeps_default() {
        let config = TransformConfig::default().display_rubrics(Vec::<String>::new());
        assert_eq!(config.display_rubrics, vec!["preferred"]);

        let config = TransformConfig::default().display_rubrics(["preferredLong", "preferred"]);
        assert_eq!(config.display_rubrics, vec!["preferredLong", "preferred"]);
    }

    #[test]
    fn test_option_codes() {
        let config = TransformConfig::default()
            .hierarchy_meaning_code("part-of")
            .unwrap()
            .content_code("fragment")
            .unwrap();
        assert_eq!(config.hierarchy_meaning, HierarchyMeaning::PartOf);
        assert_eq!(config.content, ContentMode::Fragment);

        let err = TransformConfig::default()
            .hierarchy_meaning_code("kind-of")
            .unwrap_err();
        assert!(matches!(
            err,
            ClamlError::InvalidOption { ref option, ref value }
                if option == "hierarchyMeaning" && value == "kind-of"
        ));
    }

    #[test]
    fn test_consumes_rubric() {
        let config = TransformConfig::default().designation_rubrics(["inclusion"]);
        assert!(config.consumes_rubric("preferred"));
        assert!(config.consumes_rubric("definition"));
        assert!(config.consumes_rubric("inclusion"));
        assert!(!config.consumes_rubric("note"));
    }

    #[test]
    fn test_stats_totals() {
        let stats = TransformStats {
            classes_read: 8,
            declared_concepts: 6,
            modifier_concepts: 4,
            ..Default::default()
        };
        assert_eq!(stats.total_concepts(), 10);
        assert!((stats.inclusion_rate() - 75.0).abs() < 0.01);
    }
}
