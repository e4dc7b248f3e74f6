//! ClaML Label markup.
//!
//! Labels carry mixed-content markup: plain text interleaved with paragraphs,
//! fragments, references, styled terms and lists. The markup is modelled as a
//! closed recursive union so that flattening it is a single match.

/// A `Label` element attached to a rubric.
///
/// # Examples
///
/// ```
/// use claml_types::{Label, LabelNode};
///
/// let label = Label::text("en", "Cholera");
/// assert_eq!(label.lang.as_deref(), Some("en"));
/// assert_eq!(label.content, vec![LabelNode::Text("Cholera".to_string())]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Label {
    /// Declared language of the label (`xml:lang`).
    pub lang: Option<String>,
    /// Child nodes in document order.
    pub content: Vec<LabelNode>,
}

impl Label {
    /// Creates a label holding a single text node.
    pub fn text(lang: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            content: vec![LabelNode::Text(text.into())],
        }
    }

    /// Creates a label from its child nodes.
    pub fn new(lang: Option<String>, content: Vec<LabelNode>) -> Self {
        Self { lang, content }
    }
}

/// One node of Label mixed content.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LabelNode {
    /// Character data.
    Text(String),
    /// A `Para` element.
    Para(Vec<LabelNode>),
    /// A `Fragment` element; `list` is set when its `type` attribute is `list`.
    Fragment {
        /// Whether the fragment is typed as a list entry.
        list: bool,
        /// Child nodes.
        content: Vec<LabelNode>,
    },
    /// A `Reference` element and its text.
    Reference(String),
    /// A `Term` element with a presentation class.
    Term {
        /// Presentation class (`class` attribute).
        class: TermClass,
        /// Raw text content.
        content: String,
    },
    /// A `List` element; each item holds the content of one `ListItem`.
    List(Vec<Vec<LabelNode>>),
    /// Any other element, identified by its element name.
    Unknown(String),
}

impl LabelNode {
    /// Convenience constructor for a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Returns the element name this node was read from.
    pub fn type_name(&self) -> &str {
        match self {
            Self::Text(_) => "Text",
            Self::Para(_) => "Para",
            Self::Fragment { .. } => "Fragment",
            Self::Reference(_) => "Reference",
            Self::Term { .. } => "Term",
            Self::List(_) => "List",
            Self::Unknown(name) => name,
        }
    }
}

/// Presentation class of a `Term` element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TermClass {
    /// A tab stop.
    Tab,
    /// Subscripted text.
    Subscript,
    /// Italic text.
    Italics,
    /// Bold text.
    Bold,
    /// A class this crate does not know about.
    Other(String),
}

impl TermClass {
    /// Creates a TermClass from the value of a `class` attribute.
    pub fn from_attribute(value: &str) -> Self {
        match value {
            "tab" => Self::Tab,
            "subscript" => Self::Subscript,
            "italics" => Self::Italics,
            "bold" => Self::Bold,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the attribute value for this class.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Tab => "tab",
            Self::Subscript => "subscript",
            Self::Italics => "italics",
            Self::Bold => "bold",
            Self::Other(value) => value,
        }
    }
}
