//! # claml-cli
//!
//! Command-line options for the `claml2fhir` converter and their mapping onto
//! a [`TransformConfig`].

#![warn(missing_docs)]

use std::path::PathBuf;

use clap::Parser;
use claml_loader::{ClamlResult, TransformConfig};
use claml_types::well_known;

/// Converts a ClaML classification into a FHIR CodeSystem JSON resource.
#[derive(Debug, Parser)]
#[command(name = "claml2fhir")]
#[command(version)]
pub struct Cli {
    /// ClaML file to read
    #[arg(short, long)]
    pub input: PathBuf,

    /// JSON file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Rubric kinds used for the display, highest priority first
    #[arg(short, long, value_delimiter = ',', default_value = well_known::DEFAULT_DISPLAY_RUBRIC)]
    pub display: Vec<String>,

    /// Rubric kind used for the definition
    #[arg(long, default_value = well_known::DEFAULT_DEFINITION_RUBRIC)]
    pub definition: String,

    /// Rubric kinds turned into designations
    #[arg(long, value_delimiter = ',')]
    pub designations: Vec<String>,

    /// Class kinds to leave out
    #[arg(long, value_delimiter = ',')]
    pub exclude_class_kinds: Vec<String>,

    /// Leave out classes without a kind
    #[arg(long)]
    pub exclude_kindless_classes: bool,

    /// Hierarchy meaning (is-a, part-of, grouped-by, classified-with)
    #[arg(long, default_value = "is-a")]
    pub hierarchy_meaning: String,

    /// Content mode (not-present, example, fragment, complete, supplement)
    #[arg(long, default_value = "complete")]
    pub content: String,

    /// Technical id of the CodeSystem
    #[arg(long)]
    pub id: Option<String>,

    /// Canonical URL of the CodeSystem
    #[arg(long)]
    pub url: Option<String>,

    /// Value set for the whole CodeSystem
    #[arg(long)]
    pub value_set: Option<String>,

    /// Mark the CodeSystem as needing a version
    #[arg(long)]
    pub version_needed: bool,

    /// Synthesize concepts from modifier classes
    #[arg(long)]
    pub apply_modifiers: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Builds the transformation options from the command line.
    ///
    /// # Errors
    /// Fails on an unknown hierarchy meaning or content mode.
    pub fn transform_config(&self) -> ClamlResult<TransformConfig> {
        let config = TransformConfig {
            definition_rubric: self.definition.clone(),
            exclude_class_kinds: self.exclude_class_kinds.clone(),
            exclude_kindless_classes: self.exclude_kindless_classes,
            apply_modifiers: self.apply_modifiers,
            version_needed: self.version_needed,
            id: self.id.clone(),
            url: self.url.clone(),
            value_set: self.value_set.clone(),
            ..TransformConfig::default()
        };

        config
            .display_rubrics(&self.display)
            .designation_rubrics(&self.designations)
            .hierarchy_meaning_code(&self.hierarchy_meaning)?
            .content_code(&self.content)
    }
}
