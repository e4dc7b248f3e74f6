//! Modifier expansion.
//!
//! Synthesizes concepts by appending modifier class codes to class codes.
//! The `ModifiedBy` entries of a class are applied as successive layers:
//! each layer qualifies the concepts produced by the previous one, so a class
//! modified by `M` and then `N` yields `CM1`, `CM2`, `CM1N1`, ... but never
//! `CN1`. Modifiers are only ever applied to leaves; a class with descendants
//! hands its modifiers down to its leaf descendants instead.

use std::collections::HashMap;

use claml_types::{well_known, Concept, ModifiedBy, ModifierClass, PropertyValue};
use tracing::{debug, info, warn};

use crate::concept::apply_defaults;
use crate::rubric::RubricClassifier;
use crate::transform::TransformContext;

/// Modifier classes grouped by modifier code, in document order.
#[derive(Debug, Default, Clone)]
pub struct ModifierIndex<'d> {
    by_modifier: HashMap<&'d str, Vec<&'d ModifierClass>>,
}

impl<'d> ModifierIndex<'d> {
    /// Indexes the modifier classes of a document.
    pub fn build(modifier_classes: &'d [ModifierClass]) -> Self {
        let mut by_modifier: HashMap<&'d str, Vec<&'d ModifierClass>> = HashMap::new();
        for mc in modifier_classes {
            by_modifier.entry(mc.modifier.as_str()).or_default().push(mc);
        }
        Self { by_modifier }
    }

    /// Returns the modifier classes registered under a modifier code.
    pub fn classes(&self, modifier: &str) -> &[&'d ModifierClass] {
        self.by_modifier
            .get(modifier)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of modifier groups.
    pub fn len(&self) -> usize {
        self.by_modifier.len()
    }

    /// Returns true if no modifier classes were indexed.
    pub fn is_empty(&self) -> bool {
        self.by_modifier.is_empty()
    }
}

/// Returns true if `modifier_class` may not follow a code ending in the
/// suffix named by one of its `excludeOnPrecedingModifier` entries.
///
/// Entry values hold a modifier group code and a code suffix; the suffix is
/// the last token.
pub fn excluded_by_preceding(modifier_class: &ModifierClass, candidate_code: &str) -> bool {
    modifier_class
        .meta_values(well_known::EXCLUDE_ON_PRECEDING_MODIFIER)
        .filter_map(|value| value.split_whitespace().last())
        .any(|suffix| candidate_code.ends_with(suffix))
}

/// A concept produced by the previous layer, waiting for the next modifier.
struct Candidate {
    code: String,
    display: String,
}

/// Applies the modifiers of every class that declares some.
pub fn expand_modifiers(ctx: &mut TransformContext<'_>) {
    let targets = ctx.modified_by.clone();

    for (code, modified_by) in targets {
        if ctx.hierarchy.has_descendants(code) {
            info!(
                "Class {} has descendants: applying its modifiers to its leaf descendants instead",
                code
            );
            let leaves: Vec<String> = ctx
                .hierarchy
                .leaf_descendants(code)
                .map(str::to_string)
                .collect();
            for leaf in &leaves {
                expand_class(ctx, leaf, modified_by);
            }
        } else {
            expand_class(ctx, code, modified_by);
        }
    }
}

/// Applies `modified_by`, layer by layer, to the leaf class `code`.
fn expand_class(ctx: &mut TransformContext<'_>, code: &str, modified_by: &[ModifiedBy]) {
    let classifier = RubricClassifier::new(ctx.config);

    let Some(root) = ctx.concepts.get(code) else {
        warn!("Cannot apply modifiers to {}: no concept was built for it", code);
        return;
    };
    let mut candidates = vec![Candidate {
        code: code.to_string(),
        display: root.display.clone().unwrap_or_else(|| code.to_string()),
    }];

    for entry in modified_by {
        if ctx.is_modifier_excluded(code, &entry.code) {
            debug!("Modifier {} is excluded on {}: skipping", entry.code, code);
            continue;
        }

        let modifier_classes = ctx.modifier_index.classes(&entry.code);
        if modifier_classes.is_empty() {
            warn!(
                "Class {} is modified by {} but no modifier classes are declared for it",
                code, entry.code
            );
            continue;
        }

        let mut next = Vec::new();
        for candidate in &candidates {
            for &mc in modifier_classes {
                if !entry.allows(&mc.code) {
                    continue;
                }
                if excluded_by_preceding(mc, &candidate.code) {
                    debug!(
                        "Modifier class {} excluded after {}: skipping",
                        mc.code, candidate.code
                    );
                    continue;
                }

                let new_code = format!("{}{}", candidate.code, mc.suffix());
                if ctx.declared_codes.contains(new_code.as_str()) {
                    warn!(
                        "Modified code {} clashes with a declared class: skipping",
                        new_code
                    );
                    ctx.stats.modifier_collisions += 1;
                    continue;
                }
                if let Some(existing) = ctx.concepts.get(&new_code) {
                    debug!("Modified code {} was already synthesized: reusing it", new_code);
                    let display = existing.display.clone().unwrap_or_else(|| new_code.clone());
                    next.push(Candidate {
                        code: new_code,
                        display,
                    });
                    continue;
                }

                let modifier_display = classifier.display_text(&mc.rubrics).unwrap_or_else(|| {
                    warn!(
                        "Modifier class {} of {} has no display text. Using its code",
                        mc.code, mc.modifier
                    );
                    mc.code.clone()
                });
                let display = format!(
                    "{}{}{}",
                    candidate.display,
                    well_known::MODIFIER_DISPLAY_SEPARATOR,
                    modifier_display
                );

                let mut concept = Concept::new(&new_code);
                concept.display = Some(display.clone());
                concept.add_property(
                    well_known::PARENT_PROPERTY,
                    PropertyValue::code(&candidate.code),
                );
                apply_defaults(&mut concept);
                ctx.concepts.insert(new_code.clone(), concept);
                ctx.stats.modifier_concepts += 1;

                next.push(Candidate {
                    code: new_code,
                    display,
                });
            }
        }
        candidates = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::concept::build_concepts;
    use crate::types::TransformConfig;
    use claml_types::{ClamlDocument, Class, Label, Meta, Rubric, RubricKind};

    fn modifier_class(modifier: &str, code: &str, display: &str) -> ModifierClass {
        ModifierClass {
            modifier: modifier.to_string(),
            code: code.to_string(),
            rubrics: vec![Rubric::new("preferred", vec![Label::text("en", display)])],
            ..Default::default()
        }
    }

    fn class(code: &str, display: &str) -> Class {
        Class {
            rubrics: vec![Rubric::new("preferred", vec![Label::text("en", display)])],
            ..Class::new(code, None)
        }
    }

    fn expand(doc: &ClamlDocument) -> Vec<Concept> {
        let config = TransformConfig::with_modifiers();
        let mut ctx = TransformContext::new(doc, &config);
        build_concepts(&mut ctx);
        expand_modifiers(&mut ctx);
        ctx.concepts.into_values().collect()
    }

    fn codes(concepts: &[Concept]) -> Vec<&str> {
        concepts.iter().map(|c| c.code.as_str()).collect()
    }

    fn document(classes: Vec<Class>, modifier_classes: Vec<ModifierClass>) -> ClamlDocument {
        ClamlDocument {
            rubric_kinds: vec![RubricKind::new("preferred")],
            classes,
            modifier_classes,
            ..Default::default()
        }
    }

    #[test]
    fn test_index_groups_by_modifier() {
        let mcs = vec![
            modifier_class("M", "1", "one"),
            modifier_class("N", "a", "a"),
            modifier_class("M", "2", "two"),
        ];
        let index = ModifierIndex::build(&mcs);
        assert_eq!(index.len(), 2);
        let m: Vec<&str> = index.classes("M").iter().map(|mc| mc.code.as_str()).collect();
        assert_eq!(m, vec!["1", "2"]);
        assert!(index.classes("X").is_empty());
    }

    #[test]
    fn test_excluded_by_preceding() {
        let mut mc = modifier_class("N", "N2", "n2");
        mc.meta.push(Meta::new("excludeOnPrecedingModifier", "M M1"));
        assert!(excluded_by_preceding(&mc, "DM1"));
        assert!(!excluded_by_preceding(&mc, "DM2"));
        assert!(!excluded_by_preceding(&modifier_class("N", "N1", "n1"), "DM1"));
    }

    #[test]
    fn test_single_layer() {
        let mut b = class("B", "chapter B");
        b.modified_by.push(ModifiedBy::all("M"));
        let doc = document(
            vec![b],
            vec![modifier_class("M", "M1", "one"), modifier_class("M", "M2", "two")],
        );

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["B", "BM1", "BM2"]);
        assert_eq!(concepts[1].display.as_deref(), Some("chapter B : one"));
        assert_eq!(concepts[1].parents().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(concepts[1].definition.as_deref(), Some("chapter B : one"));
    }

    #[test]
    fn test_layers_chain() {
        let mut d = class("D", "D");
        d.modified_by.push(ModifiedBy::all("M"));
        d.modified_by.push(ModifiedBy::all("N"));
        let doc = document(
            vec![d],
            vec![
                modifier_class("M", "1", "m1"),
                modifier_class("M", "2", "m2"),
                modifier_class("N", "a", "na"),
            ],
        );

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["D", "D1", "D2", "D1a", "D2a"]);
        let d2a = &concepts[4];
        assert_eq!(d2a.display.as_deref(), Some("D : m2 : na"));
        assert_eq!(d2a.parents().collect::<Vec<_>>(), vec!["D2"]);
    }

    #[test]
    fn test_allow_list_and_exclude_modifier() {
        let mut c = class("C", "C");
        c.modified_by.push(ModifiedBy::only("M", ["M1"]));
        let mut e = class("E", "E");
        e.modified_by.push(ModifiedBy::all("M"));
        e.exclude_modifiers.push("M".to_string());
        let doc = document(
            vec![c, e],
            vec![modifier_class("M", "M1", "one"), modifier_class("M", "M2", "two")],
        );

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["C", "E", "CM1"]);
    }

    #[test]
    fn test_collision_with_declared_class() {
        let mut a = class("A", "A");
        a.modified_by.push(ModifiedBy::all("M"));
        let doc = document(
            vec![a, class("A1", "real A1")],
            vec![modifier_class("M", "1", "one"), modifier_class("M", "2", "two")],
        );

        let config = TransformConfig::with_modifiers();
        let mut ctx = TransformContext::new(&doc, &config);
        build_concepts(&mut ctx);
        expand_modifiers(&mut ctx);

        assert_eq!(ctx.stats.modifier_collisions, 1);
        assert_eq!(ctx.concepts["A1"].display.as_deref(), Some("real A1"));
        assert_eq!(ctx.concepts["A2"].display.as_deref(), Some("A : two"));
        assert_eq!(ctx.concepts.len(), 3);
    }

    #[test]
    fn test_leaf_only_application() {
        let mut a = class("A", "A");
        a.sub_classes = vec!["A.1".to_string(), "A.2".to_string()];
        a.modified_by.push(ModifiedBy::all("M"));
        let mut a1 = class("A.1", "A one");
        a1.super_classes = vec!["A".to_string()];
        let mut a2 = class("A.2", "A two");
        a2.super_classes = vec!["A".to_string()];
        a2.exclude_modifiers = vec!["M".to_string()];
        let doc = document(vec![a, a1, a2], vec![modifier_class("M", "x", "ex")]);

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["A", "A.1", "A.2", "A.1x"]);
        assert_eq!(concepts[3].display.as_deref(), Some("A one : ex"));
    }

    #[test]
    fn test_inherited_and_own_modifier_chain() {
        let mut p = class("P", "parent");
        p.sub_classes = vec!["L".to_string()];
        p.modified_by.push(ModifiedBy::all("M"));
        let mut l = class("L", "leaf");
        l.super_classes = vec!["P".to_string()];
        l.modified_by.push(ModifiedBy::all("M"));
        l.modified_by.push(ModifiedBy::all("N"));
        let doc = document(
            vec![p, l],
            vec![modifier_class("M", "1", "one"), modifier_class("N", "a", "ay")],
        );

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["P", "L", "L1", "L1a"]);
        let l1a = &concepts[3];
        assert_eq!(l1a.display.as_deref(), Some("leaf : one : ay"));
        assert_eq!(l1a.parents().collect::<Vec<_>>(), vec!["L1"]);
        assert_eq!(concepts[2].parents().collect::<Vec<_>>(), vec!["L"]);
    }

    #[test]
    fn test_unknown_modifier_group_is_skipped() {
        let mut a = class("A", "A");
        a.modified_by.push(ModifiedBy::all("Q"));
        a.modified_by.push(ModifiedBy::all("M"));
        let doc = document(vec![a], vec![modifier_class("M", "1", "one")]);

        let concepts = expand(&doc);
        assert_eq!(codes(&concepts), vec!["A", "A1"]);
    }
}
