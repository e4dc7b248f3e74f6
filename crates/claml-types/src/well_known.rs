//! Well-known ClaML names and CodeSystem property codes.
//!
//! # Examples
//!
//! ```
//! use claml_types::well_known;
//!
//! assert_eq!(well_known::DEFAULT_DISPLAY_RUBRIC, "preferred");
//! assert_eq!(well_known::PARENT_PROPERTY, "parent");
//! ```

// =============================================================================
// Rubric Kinds
// =============================================================================

/// Rubric kind used for concept displays unless configured otherwise.
pub const DEFAULT_DISPLAY_RUBRIC: &str = "preferred";

/// Rubric kind used for concept definitions unless configured otherwise.
pub const DEFAULT_DEFINITION_RUBRIC: &str = "definition";

// =============================================================================
// CodeSystem Properties
// =============================================================================

/// Property carrying the ClaML class kind (code-typed).
pub const KIND_PROPERTY: &str = "kind";

/// Property pointing at a parent concept.
pub const PARENT_PROPERTY: &str = "parent";

/// Property pointing at a child concept.
pub const CHILD_PROPERTY: &str = "child";

// =============================================================================
// Modifiers
// =============================================================================

/// ModifierClass meta entry naming a preceding modifier class that rules it out.
///
/// The value holds two tokens: a modifier group code and a code suffix.
pub const EXCLUDE_ON_PRECEDING_MODIFIER: &str = "excludeOnPrecedingModifier";

/// Separator between a class display and a modifier display.
pub const MODIFIER_DISPLAY_SEPARATOR: &str = " : ";
