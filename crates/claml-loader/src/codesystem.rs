//! CodeSystem assembly.
//!
//! Collects concepts, property declarations and document metadata into the
//! resource handed to the serializer.

use claml_types::{
    well_known, ClamlDocument, CodeSystem, CodeSystemIdentifier, Concept, PropertyDefinition,
    PropertyType,
};
use tracing::warn;

use crate::types::TransformConfig;

/// Assembles the output resource from the transformed concepts.
pub fn assemble(
    document: &ClamlDocument,
    config: &TransformConfig,
    concepts: Vec<Concept>,
) -> CodeSystem {
    let mut cs = CodeSystem::new();

    cs.id = config.id.clone();
    cs.url = config.url.clone();
    cs.value_set = config.value_set.clone();
    cs.content = config.content;
    cs.hierarchy_meaning = config.hierarchy_meaning;
    cs.version_needed = config.version_needed;

    apply_metadata(&mut cs, document);
    cs.properties = property_definitions(document, config);

    cs.count = concepts.len();
    cs.concepts = concepts;
    cs
}

/// Copies identifiers and title information from the document.
fn apply_metadata(cs: &mut CodeSystem, document: &ClamlDocument) {
    if document.identifiers.len() > 1 {
        warn!("Multiple identifiers not currently supported by FHIR Code Systems");
    }
    cs.identifiers = document
        .identifiers
        .iter()
        .map(|ident| CodeSystemIdentifier {
            system: ident.authority.clone(),
            value: ident.uid.clone(),
        })
        .collect();

    if let Some(title) = &document.title {
        cs.version = title.version.clone();
        cs.date = title.date.clone();
        cs.name = Some(title.name.clone().unwrap_or_else(|| title.content.clone()));
        cs.description = Some(title.content.clone());
    }
}

/// Declares the `kind` property and one string property per rubric kind that
/// is not used for displays, definitions or designations.
pub fn property_definitions(
    document: &ClamlDocument,
    config: &TransformConfig,
) -> Vec<PropertyDefinition> {
    let mut properties = vec![PropertyDefinition::new(
        well_known::KIND_PROPERTY,
        PropertyType::Code,
    )];

    for rk in &document.rubric_kinds {
        if !config.consumes_rubric(&rk.name) {
            let mut property = PropertyDefinition::new(rk.name.as_str(), PropertyType::String);
            if let Some(display) = rk.displays.first() {
                if rk.displays.len() > 1 {
                    warn!(
                        "Found more than one display for rubric kind {}: ignoring additional displays",
                        rk.name
                    );
                }
                property.description = Some(display.clone());
            }
            properties.push(property);
        }
        if rk.inherited {
            warn!("Inherited rubric kinds are not fully supported: {}", rk.name);
        }
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use claml_types::{ContentMode, HierarchyMeaning, Identifier, PublicationStatus, RubricKind, Title};

    fn document() -> ClamlDocument {
        ClamlDocument {
            identifiers: vec![Identifier {
                authority: Some("WHO".to_string()),
                uid: "icd10".to_string(),
            }],
            title: Some(Title {
                name: Some("ICD10".to_string()),
                version: Some("2019".to_string()),
                date: Some("2019-01-01".to_string()),
                content: "International Classification of Diseases".to_string(),
            }),
            rubric_kinds: vec![
                RubricKind::new("preferred"),
                RubricKind::new("definition"),
                RubricKind {
                    name: "note".to_string(),
                    displays: vec!["Note".to_string(), "Remark".to_string()],
                    inherited: true,
                },
                RubricKind::new("inclusion"),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_property_definitions() {
        let config = TransformConfig::default().designation_rubrics(["inclusion"]);
        let properties = property_definitions(&document(), &config);

        let codes: Vec<&str> = properties.iter().map(|p| p.code.as_str()).collect();
        assert_eq!(codes, vec!["kind", "note"]);
        assert_eq!(properties[0].type_, PropertyType::Code);
        assert_eq!(properties[1].type_, PropertyType::String);
        assert_eq!(properties[1].description.as_deref(), Some("Note"));
    }

    #[test]
    fn test_metadata_from_title() {
        let config = TransformConfig {
            id: Some("icd10-2019".to_string()),
            url: Some("http://hl7.org/fhir/sid/icd-10".to_string()),
            value_set: Some("http://hl7.org/fhir/ValueSet/icd-10".to_string()),
            content: ContentMode::Fragment,
            hierarchy_meaning: HierarchyMeaning::ClassifiedWith,
            version_needed: true,
            ..Default::default()
        };
        let cs = assemble(&document(), &config, vec![Concept::new("A"), Concept::new("B")]);

        assert_eq!(cs.status, PublicationStatus::Draft);
        assert!(cs.experimental);
        assert_eq!(cs.id.as_deref(), Some("icd10-2019"));
        assert_eq!(cs.url.as_deref(), Some("http://hl7.org/fhir/sid/icd-10"));
        assert_eq!(cs.value_set.as_deref(), Some("http://hl7.org/fhir/ValueSet/icd-10"));
        assert_eq!(cs.content, ContentMode::Fragment);
        assert_eq!(cs.hierarchy_meaning, HierarchyMeaning::ClassifiedWith);
        assert!(cs.version_needed);
        assert_eq!(cs.version.as_deref(), Some("2019"));
        assert_eq!(cs.date.as_deref(), Some("2019-01-01"));
        assert_eq!(cs.name.as_deref(), Some("ICD10"));
        assert_eq!(
            cs.description.as_deref(),
            Some("International Classification of Diseases")
        );
        assert_eq!(cs.identifiers[0].system.as_deref(), Some("WHO"));
        assert_eq!(cs.count, 2);
    }

    #[test]
    fn test_name_falls_back_to_title_text() {
        let mut doc = document();
        doc.title.as_mut().unwrap().name = None;
        let cs = assemble(&doc, &TransformConfig::default(), vec![]);
        assert_eq!(cs.name.as_deref(), Some("International Classification of Diseases"));
    }

    #[test]
    fn test_missing_metadata_is_silent() {
        let cs = assemble(&ClamlDocument::new(), &TransformConfig::default(), vec![]);
        assert!(cs.name.is_none());
        assert!(cs.version.is_none());
        assert!(cs.date.is_none());
        assert!(cs.identifiers.is_empty());
        assert_eq!(cs.properties.len(), 1);
        assert_eq!(cs.count, 0);
    }

    #[test]
    fn test_multiple_identifiers_all_emitted() {
        let mut doc = document();
        doc.identifiers.push(Identifier {
            authority: None,
            uid: "second".to_string(),
        });
        let cs = assemble(&doc, &TransformConfig::default(), vec![]);
        assert_eq!(cs.identifiers.len(), 2);
        assert_eq!(cs.identifiers[1].value, "second");
        assert!(cs.identifiers[1].system.is_none());
    }
}
