//! Rubric classification.
//!
//! Assigns each rubric of a class the role it plays in the generated concept.
//! Display rubrics are checked first, in configured priority order: the first
//! configured display kind present on the class wins, and rubrics of the other
//! display kinds are demoted to designations.

use claml_types::Rubric;

use crate::label::resolve_trimmed;
use crate::types::TransformConfig;

/// Role a rubric plays in the generated concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RubricRole {
    /// Rubric of the winning display kind.
    Display,
    /// Rubric of a lower-priority display kind, kept as a designation.
    DemotedDisplay,
    /// Rubric of the definition kind.
    Definition,
    /// Rubric of a configured designation kind.
    Designation,
    /// Any other rubric, kept as a string property.
    Property,
}

impl RubricRole {
    /// Returns true if the rubric's labels become designations.
    pub fn is_designation(self) -> bool {
        matches!(self, Self::DemotedDisplay | Self::Designation)
    }
}

/// Classifies rubrics according to a [`TransformConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RubricClassifier<'c> {
    config: &'c TransformConfig,
}

impl<'c> RubricClassifier<'c> {
    /// Creates a classifier for the given configuration.
    pub fn new(config: &'c TransformConfig) -> Self {
        Self { config }
    }

    /// Returns the highest-priority display kind present among `rubrics`.
    pub fn winning_display(&self, rubrics: &[Rubric]) -> Option<&'c str> {
        self.config
            .display_rubrics
            .iter()
            .find(|name| rubrics.iter().any(|r| &r.kind == *name))
            .map(String::as_str)
    }

    /// Returns the role of a rubric kind given the winning display kind.
    pub fn role(&self, kind: &str, winner: Option<&str>) -> RubricRole {
        if winner == Some(kind) {
            RubricRole::Display
        } else if self.config.display_rubrics.iter().any(|d| d == kind) {
            RubricRole::DemotedDisplay
        } else if kind == self.config.definition_rubric {
            RubricRole::Definition
        } else if self.config.designation_rubrics.iter().any(|d| d == kind) {
            RubricRole::Designation
        } else {
            RubricRole::Property
        }
    }

    /// Pairs every rubric with its role, in document order.
    pub fn classify<'r>(&self, rubrics: &'r [Rubric]) -> Vec<(RubricRole, &'r Rubric)> {
        let winner = self.winning_display(rubrics);
        rubrics
            .iter()
            .map(|rubric| (self.role(&rubric.kind, winner), rubric))
            .collect()
    }

    /// Resolves the display text of a set of rubrics: the first label of the
    /// first rubric of the winning display kind.
    ///
    /// Returns `None` if no display rubric is present or its text is empty.
    pub fn display_text(&self, rubrics: &[Rubric]) -> Option<String> {
        let winner = self.winning_display(rubrics)?;
        rubrics
            .iter()
            .find(|r| r.kind == winner)
            .and_then(|r| r.labels.first())
            .map(resolve_trimmed)
            .filter(|text| !text.is_empty())
    }
}
