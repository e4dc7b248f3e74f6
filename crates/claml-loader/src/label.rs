//! Label flattening.
//!
//! Turns Label mixed content into plain text. Resolution is a pure function
//! of the node tree; the only side effect is a warning for markup it does not
//! understand. Callers trim the result.

use claml_types::{Label, LabelNode, TermClass};
use tracing::warn;

/// Resolves a Label to plain text.
///
/// Successive non-blank child results are joined with a newline. Nested
/// containers concatenate without separators.
///
/// # Examples
///
/// ```
/// use claml_loader::resolve_label;
/// use claml_types::{Label, LabelNode};
///
/// let label = Label::new(
///     Some("en".to_string()),
///     vec![LabelNode::text("Cholera"), LabelNode::Reference("A00".to_string())],
/// );
/// assert_eq!(resolve_label(&label), "Cholera\n[A00]");
/// ```
pub fn resolve_label(label: &Label) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(label.content.len());
    for node in &label.content {
        let text = resolve_node(node);
        if !text.trim().is_empty() {
            parts.push(text);
        }
    }
    parts.join("\n")
}

/// Resolves a single Label node to plain text.
pub fn resolve_node(node: &LabelNode) -> String {
    match node {
        LabelNode::Text(text) => text.clone(),
        LabelNode::Reference(text) => format!("[{}]", text),
        LabelNode::Para(content) => concat(content),
        LabelNode::Fragment { list, content } => {
            if *list {
                format!(" - {}", concat(content))
            } else {
                concat(content)
            }
        }
        LabelNode::Term { class, content } => match class {
            TermClass::Tab => "\t".to_string(),
            TermClass::Subscript => format!("_{}", content),
            TermClass::Italics | TermClass::Bold => content.clone(),
            TermClass::Other(other) => {
                warn!("Unrecognized Term class: {}", other);
                content.clone()
            }
        },
        LabelNode::List(items) => {
            let mut result = String::new();
            for item in items {
                result.push_str(" - ");
                result.push_str(&concat(item));
                result.push('\n');
            }
            result
        }
        LabelNode::Unknown(name) => {
            warn!("Ignoring unsupported label content ({})", name);
            name.to_uppercase()
        }
    }
}

fn concat(content: &[LabelNode]) -> String {
    content.iter().map(resolve_node).collect()
}

/// Resolves a Label and trims surrounding whitespace.
pub fn resolve_trimmed(label: &Label) -> String {
    resolve_label(label).trim().to_string()
}
