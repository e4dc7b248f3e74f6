//! Transformation entry point and per-run state.

use std::collections::{HashMap, HashSet};

use claml_types::{ClamlDocument, CodeSystem, Concept, ModifiedBy};
use indexmap::IndexMap;
use tracing::info;

use crate::codesystem::assemble;
use crate::concept::build_concepts;
use crate::hierarchy::DescendantTracker;
use crate::modifier::{expand_modifiers, ModifierIndex};
use crate::types::{TransformConfig, TransformStats};

/// State shared by the stages of one transformation.
///
/// Built from a document and a configuration, filled by the concept builder,
/// extended by the modifier expander and consumed by the assembler.
#[derive(Debug)]
pub struct TransformContext<'d> {
    /// The document being transformed.
    pub document: &'d ClamlDocument,
    /// Transformation options.
    pub config: &'d TransformConfig,
    /// Concepts by code: declared classes in document order, then synthesized ones.
    pub concepts: IndexMap<String, Concept>,
    /// Transitive descendants of every class seen so far.
    pub hierarchy: DescendantTracker,
    /// Every class code declared in the document, including excluded classes.
    pub declared_codes: HashSet<&'d str>,
    /// `ModifiedBy` lists of built classes, in document order.
    pub modified_by: Vec<(&'d str, &'d [ModifiedBy])>,
    /// `ExcludeModifier` codes of built classes.
    pub exclude_modifiers: HashMap<&'d str, HashSet<&'d str>>,
    /// Modifier classes by modifier group code.
    pub modifier_index: ModifierIndex<'d>,
    /// Running statistics.
    pub stats: TransformStats,
}

impl<'d> TransformContext<'d> {
    /// Creates the context for transforming `document`.
    pub fn new(document: &'d ClamlDocument, config: &'d TransformConfig) -> Self {
        Self {
            document,
            config,
            concepts: IndexMap::with_capacity(document.classes.len()),
            hierarchy: DescendantTracker::new(),
            declared_codes: document.classes.iter().map(|c| c.code.as_str()).collect(),
            modified_by: Vec::new(),
            exclude_modifiers: HashMap::new(),
            modifier_index: ModifierIndex::build(&document.modifier_classes),
            stats: TransformStats::default(),
        }
    }

    /// Returns true if `class` opted out of the modifier group `modifier`.
    pub fn is_modifier_excluded(&self, class: &str, modifier: &str) -> bool {
        self.exclude_modifiers
            .get(class)
            .is_some_and(|codes| codes.contains(modifier))
    }
}

/// The result of transforming a document.
#[derive(Debug, Clone)]
pub struct Transformation {
    /// The generated resource.
    pub code_system: CodeSystem,
    /// What happened along the way.
    pub stats: TransformStats,
}

/// Transforms a parsed ClaML document into a CodeSystem.
///
/// Never fails: unknown kinds, empty labels, duplicate codes and modifier
/// collisions are logged and skipped.
///
/// # Example
///
/// ```
/// use claml_loader::{transform, TransformConfig};
/// use claml_types::{ClamlDocument, Class, Label, Rubric};
///
/// let mut doc = ClamlDocument::new();
/// let mut class = Class::new("A", None);
/// class.rubrics.push(Rubric::new("preferred", vec![Label::text("en", "Chapter A")]));
/// doc.classes.push(class);
///
/// let result = transform(&doc, &TransformConfig::default());
/// let concept = result.code_system.concept("A").unwrap();
/// assert_eq!(concept.display.as_deref(), Some("Chapter A"));
/// assert_eq!(concept.definition.as_deref(), Some("Chapter A"));
/// assert_eq!(result.code_system.count, 1);
/// ```
pub fn transform(document: &ClamlDocument, config: &TransformConfig) -> Transformation {
    let mut ctx = TransformContext::new(document, config);

    build_concepts(&mut ctx);
    info!(
        "Built {} concepts from {} classes",
        ctx.stats.declared_concepts, ctx.stats.classes_read
    );

    if config.apply_modifiers {
        expand_modifiers(&mut ctx);
        info!("Synthesized {} concepts from modifiers", ctx.stats.modifier_concepts);
    }

    let stats = ctx.stats.clone();
    let concepts: Vec<Concept> = ctx.concepts.into_values().collect();
    let code_system = assemble(document, config, concepts);

    Transformation { code_system, stats }
}
