//! # claml-loader
//!
//! Transforms ClaML classifications (ICD-10, ICD-O-3, OPS, ...) into FHIR
//! CodeSystem resources.
//!
//! This crate provides:
//! - A pull-parser based ClaML reader ([`parse_document`])
//! - Label resolution for mixed-content rubric labels ([`resolve_label`])
//! - Rubric classification into displays, definitions, designations and properties
//! - Transitive hierarchy tracking ([`DescendantTracker`])
//! - Modifier expansion into synthesized concepts ([`expand_modifiers`])
//! - CodeSystem assembly and JSON output ([`transform`], [`convert_file`])
//!
//! # Example
//!
//! ```ignore
//! use claml_loader::{convert_file, TransformConfig};
//!
//! let config = TransformConfig::with_modifiers();
//! let stats = convert_file("icd10.xml", "icd10.json", &config)?;
//! println!("Wrote {} concepts", stats.total_concepts());
//! ```

#![warn(missing_docs)]

pub mod codesystem;
pub mod concept;
pub mod hierarchy;
pub mod label;
pub mod loader;
pub mod modifier;
pub mod parser;
pub mod rubric;
pub mod transform;
pub mod types;

pub use codesystem::{assemble, property_definitions};
pub use concept::{apply_defaults, build_concepts};
pub use hierarchy::DescendantTracker;
pub use label::{resolve_label, resolve_node, resolve_trimmed};
pub use loader::{convert_file, format_bytes, load_document, write_code_system};
pub use modifier::{excluded_by_preceding, expand_modifiers, ModifierIndex};
pub use parser::parse_document;
pub use rubric::{RubricClassifier, RubricRole};
pub use transform::{transform, TransformContext, Transformation};
pub use types::{ClamlError, ClamlResult, TransformConfig, TransformStats};

// Re-export claml-types for convenience
pub use claml_types;
