//! Concept building.
//!
//! Turns each ClaML class into a CodeSystem concept: kind filters, duplicate
//! detection, hierarchy properties, rubric routing and display/definition
//! defaults. Classes are visited once, in document order.

use claml_types::{well_known, Class, Concept, Designation, Label, PropertyValue};
use tracing::{debug, error, info, warn};

use crate::label::resolve_trimmed;
use crate::rubric::{RubricClassifier, RubricRole};
use crate::transform::TransformContext;
use crate::types::TransformStats;

/// Builds a concept for every class of the document and records the
/// hierarchy and modifier references of every class that was kept.
pub fn build_concepts(ctx: &mut TransformContext<'_>) {
    let document = ctx.document;
    for class in &document.classes {
        ctx.stats.classes_read += 1;
        build_concept(ctx, class);
    }
}

fn build_concept<'d>(ctx: &mut TransformContext<'d>, class: &'d Class) {
    let config = ctx.config;

    match &class.kind {
        Some(kind) if config.exclude_class_kinds.contains(kind) => {
            info!("Concept {} has excluded kind {}: skipping", class.code, kind);
            ctx.stats.excluded_classes += 1;
            return;
        }
        None if config.exclude_kindless_classes => {
            info!("Concept {} has no kind: skipping", class.code);
            ctx.stats.excluded_classes += 1;
            return;
        }
        _ => {}
    }

    if ctx.concepts.contains_key(&class.code) {
        error!(
            "Duplicate class code {}: keeping the first declaration and skipping this one",
            class.code
        );
        ctx.stats.duplicate_codes += 1;
        return;
    }

    let mut concept = Concept::new(&class.code);

    match &class.kind {
        Some(kind) if ctx.document.has_class_kind(kind) => {
            concept.add_property(well_known::KIND_PROPERTY, PropertyValue::code(kind));
        }
        Some(kind) => {
            warn!("Unrecognised class kind on class {}: {}", class.code, kind);
        }
        None => debug!("Concept {} has no kind", class.code),
    }

    for sub in &class.sub_classes {
        concept.add_property(well_known::CHILD_PROPERTY, PropertyValue::code(sub));
        ctx.hierarchy.add_sub_class(&class.code, sub);
    }
    for sup in &class.super_classes {
        concept.add_property(well_known::PARENT_PROPERTY, PropertyValue::code(sup));
        ctx.hierarchy.add_super_class(&class.code, sup);
    }

    apply_rubrics(ctx, &mut concept, class);
    apply_defaults(&mut concept);

    if !class.modified_by.is_empty() {
        ctx.modified_by
            .push((class.code.as_str(), class.modified_by.as_slice()));
    }
    if !class.exclude_modifiers.is_empty() {
        ctx.exclude_modifiers
            .entry(class.code.as_str())
            .or_default()
            .extend(class.exclude_modifiers.iter().map(String::as_str));
    }

    ctx.concepts.insert(class.code.clone(), concept);
    ctx.stats.declared_concepts += 1;
}

/// Routes the rubrics of a class to display, definition, designations and
/// properties of its concept.
fn apply_rubrics(ctx: &mut TransformContext<'_>, concept: &mut Concept, class: &Class) {
    let classifier = RubricClassifier::new(ctx.config);
    let document = ctx.document;
    let mut display_taken = false;

    for (role, rubric) in classifier.classify(&class.rubrics) {
        match role {
            RubricRole::Display => {
                let mut labels = rubric.labels.iter();
                if !display_taken {
                    display_taken = true;
                    if rubric.labels.len() > 1 {
                        warn!(
                            "Found more than one label on display rubric for code {}: using the rest as designations",
                            class.code
                        );
                    }
                    if let Some(first) = labels.next() {
                        let text = resolve_trimmed(first);
                        if text.is_empty() {
                            warn!("Display label for code {} is empty", class.code);
                        } else {
                            concept.display = Some(text);
                        }
                    }
                }
                add_designations(concept, &rubric.kind, labels, &mut ctx.stats);
            }
            RubricRole::DemotedDisplay | RubricRole::Designation => {
                add_designations(concept, &rubric.kind, rubric.labels.iter(), &mut ctx.stats);
            }
            RubricRole::Definition => {
                if concept.definition.is_some() {
                    warn!(
                        "Found more than one definition rubric for code {}: ignoring",
                        class.code
                    );
                    continue;
                }
                if rubric.labels.len() > 1 {
                    warn!(
                        "Found more than one label on definition rubric for code {}",
                        class.code
                    );
                }
                if let Some(first) = rubric.labels.first() {
                    let text = resolve_trimmed(first);
                    if !text.is_empty() {
                        concept.definition = Some(text);
                    }
                }
            }
            RubricRole::Property => {
                if document.rubric_kind(&rubric.kind).is_none() {
                    warn!(
                        "Unrecognised rubric kind {} on class {}: skipping",
                        rubric.kind, class.code
                    );
                    continue;
                }
                for label in &rubric.labels {
                    let text = resolve_trimmed(label);
                    if text.is_empty() {
                        debug!("Skipping empty {} label on class {}", rubric.kind, class.code);
                        continue;
                    }
                    concept.add_property(rubric.kind.as_str(), PropertyValue::string(text));
                }
            }
        }
    }
}

fn add_designations<'l>(
    concept: &mut Concept,
    kind: &str,
    labels: impl Iterator<Item = &'l Label>,
    stats: &mut TransformStats,
) {
    for label in labels {
        let text = resolve_trimmed(label);
        if text.is_empty() {
            warn!("Skipping empty label for rubric {} on {}", kind, concept.code);
            stats.empty_labels += 1;
            continue;
        }
        concept
            .designations
            .push(Designation::new(kind, text, label.lang.clone()));
    }
}

/// Fills in a missing display and definition.
///
/// Without a display the code is used for both; with a display but no
/// definition the display is copied into the definition.
pub fn apply_defaults(concept: &mut Concept) {
    if concept.code.is_empty() {
        warn!("Concept {:?} has no code", concept);
        return;
    }

    if !concept.has_display() {
        warn!(
            "Concept {} has no display text. Using code as display text",
            concept.code
        );
        concept.display = Some(concept.code.clone());
        if !concept.has_definition() {
            concept.definition = Some(concept.code.clone());
        }
    } else if !concept.has_definition() {
        concept.definition = concept.display.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransformConfig;
    use claml_types::{ClamlDocument, ClassKind, LabelNode, ModifiedBy, Rubric, RubricKind};

    fn document(classes: Vec<Class>) -> ClamlDocument {
        ClamlDocument {
            class_kinds: vec![ClassKind {
                name: "chapter".to_string(),
                displays: vec![],
            }],
            rubric_kinds: ["preferred", "preferredLong", "definition", "inclusion", "note"]
                .into_iter()
                .map(RubricKind::new)
                .collect(),
            classes,
            ..Default::default()
        }
    }

    fn rubric(kind: &str, texts: &[&str]) -> Rubric {
        Rubric::new(kind, texts.iter().map(|t| Label::text("en", *t)).collect())
    }

    fn class(code: &str, kind: Option<&str>, rubrics: Vec<Rubric>) -> Class {
        Class {
            rubrics,
            ..Class::new(code, kind)
        }
    }

    fn build(doc: &ClamlDocument, config: &TransformConfig) -> (Vec<Concept>, TransformStats) {
        let mut ctx = TransformContext::new(doc, config);
        build_concepts(&mut ctx);
        (ctx.concepts.into_values().collect(), ctx.stats)
    }

    #[test]
    fn test_basic_concept() {
        let mut a = class(
            "A",
            Some("chapter"),
            vec![
                rubric("preferred", &["Chapter A"]),
                rubric("definition", &["All of A"]),
                rubric("note", &["Some note", "  "]),
            ],
        );
        a.sub_classes = vec!["A.1".to_string()];
        a.super_classes = vec!["ROOT".to_string()];
        let doc = document(vec![a]);

        let (concepts, stats) = build(&doc, &TransformConfig::default());
        assert_eq!(concepts.len(), 1);
        let c = &concepts[0];
        assert_eq!(c.code, "A");
        assert_eq!(c.display.as_deref(), Some("Chapter A"));
        assert_eq!(c.definition.as_deref(), Some("All of A"));
        assert_eq!(c.property_values("kind").collect::<Vec<_>>(), vec!["chapter"]);
        assert_eq!(c.children().collect::<Vec<_>>(), vec!["A.1"]);
        assert_eq!(c.parents().collect::<Vec<_>>(), vec!["ROOT"]);
        assert_eq!(c.property_values("note").collect::<Vec<_>>(), vec!["Some note"]);
        assert!(c.designations.is_empty());
        assert_eq!(stats.declared_concepts, 1);
    }

    #[test]
    fn test_unrecognised_kinds_are_skipped() {
        let doc = document(vec![class(
            "A",
            Some("volume"),
            vec![rubric("preferred", &["A"]), rubric("mystery", &["?"])],
        )]);

        let (concepts, _) = build(&doc, &TransformConfig::default());
        assert_eq!(concepts[0].property_values("kind").count(), 0);
        assert_eq!(concepts[0].property_values("mystery").count(), 0);
    }

    #[test]
    fn test_kind_exclusion() {
        let doc = document(vec![
            class("A", Some("chapter"), vec![]),
            class("B", Some("block"), vec![]),
            class("C", None, vec![]),
        ]);

        let config = TransformConfig {
            exclude_class_kinds: vec!["block".to_string()],
            ..Default::default()
        };
        let (concepts, stats) = build(&doc, &config);
        let codes: Vec<&str> = concepts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "C"]);
        assert_eq!(stats.excluded_classes, 1);

        let config = TransformConfig {
            exclude_kindless_classes: true,
            ..Default::default()
        };
        let (concepts, stats) = build(&doc, &config);
        let codes: Vec<&str> = concepts.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
        assert_eq!(stats.excluded_classes, 1);
    }

    #[test]
    fn test_duplicate_codes_are_not_merged() {
        let doc = document(vec![
            class("A", None, vec![rubric("preferred", &["First"])]),
            class("A", None, vec![rubric("preferred", &["Second"])]),
        ]);

        let (concepts, stats) = build(&doc, &TransformConfig::default());
        assert_eq!(concepts.len(), 1);
        assert_eq!(concepts[0].display.as_deref(), Some("First"));
        assert_eq!(stats.duplicate_codes, 1);
        assert_eq!(stats.classes_read, 2);
    }

    #[test]
    fn test_display_priority_demotes_lower_rubrics() {
        let doc = document(vec![class(
            "A",
            None,
            vec![
                rubric("preferred", &["Short"]),
                rubric("preferredLong", &["Long", "Long too"]),
                rubric("preferredLong", &["Long again"]),
            ],
        )]);
        let config = TransformConfig::default().display_rubrics(["preferredLong", "preferred"]);

        let (concepts, _) = build(&doc, &config);
        let c = &concepts[0];
        assert_eq!(c.display.as_deref(), Some("Long"));
        let designations: Vec<(&str, &str)> = c
            .designations
            .iter()
            .map(|d| (d.use_code(), d.value.as_str()))
            .collect();
        assert_eq!(
            designations,
            vec![
                ("preferred", "Short"),
                ("preferredLong", "Long too"),
                ("preferredLong", "Long again"),
            ]
        );
    }

    #[test]
    fn test_designations_and_empty_labels() {
        let mut inclusion = rubric("inclusion", &["Asiatic cholera"]);
        inclusion.labels.push(Label::new(Some("de".to_string()), vec![LabelNode::text("Cholera asiatica")]));
        inclusion.labels.push(Label::text("en", "   "));
        let doc = document(vec![class(
            "A00",
            None,
            vec![rubric("preferred", &["Cholera"]), inclusion],
        )]);
        let config = TransformConfig::default().designation_rubrics(["inclusion"]);

        let (concepts, stats) = build(&doc, &config);
        let c = &concepts[0];
        assert_eq!(c.designations.len(), 2);
        assert_eq!(c.designations[0].use_code(), "inclusion");
        assert_eq!(c.designations[0].language.as_deref(), Some("en"));
        assert_eq!(c.designations[1].value, "Cholera asiatica");
        assert_eq!(c.designations[1].language.as_deref(), Some("de"));
        assert!(c.designations.iter().all(|d| !d.value.is_empty()));
        assert_eq!(stats.empty_labels, 1);
    }

    #[test]
    fn test_display_fallback_to_code() {
        let doc = document(vec![class("X99", None, vec![rubric("note", &["n"])])]);
        let (concepts, _) = build(&doc, &TransformConfig::default());
        let c = &concepts[0];
        assert_eq!(c.display.as_deref(), Some("X99"));
        assert_eq!(c.definition.as_deref(), Some("X99"));
    }

    #[test]
    fn test_display_fallback_keeps_definition() {
        let doc = document(vec![class("X99", None, vec![rubric("definition", &["Defined"])])]);
        let (concepts, _) = build(&doc, &TransformConfig::default());
        assert_eq!(concepts[0].display.as_deref(), Some("X99"));
        assert_eq!(concepts[0].definition.as_deref(), Some("Defined"));
    }

    #[test]
    fn test_modifier_references_recorded() {
        let mut a = class("A", None, vec![]);
        a.modified_by = vec![ModifiedBy::all("M")];
        a.exclude_modifiers = vec!["N".to_string()];
        let doc = document(vec![a, class("B", None, vec![])]);
        let config = TransformConfig::default();

        let mut ctx = TransformContext::new(&doc, &config);
        build_concepts(&mut ctx);
        assert_eq!(ctx.modified_by.len(), 1);
        assert_eq!(ctx.modified_by[0].0, "A");
        assert!(ctx.is_modifier_excluded("A", "N"));
        assert!(!ctx.is_modifier_excluded("B", "N"));
    }

    #[test]
    fn test_apply_defaults_copies_display() {
        let mut concept = Concept::new("A");
        concept.display = Some("Chapter A".to_string());
        apply_defaults(&mut concept);
        assert_eq!(concept.definition.as_deref(), Some("Chapter A"));
    }
}
