//! Transitive descendant tracking.
//!
//! Classes are visited once, in document order, and every `SubClass` /
//! `SuperClass` reference is recorded as it is seen. Each new link is
//! propagated eagerly to every known ancestor of the parent, so the
//! descendant sets are transitively closed after every step regardless of
//! whether a parent or its children appear first.

use std::collections::{BTreeSet, HashMap};

use tracing::warn;

/// Per-code transitive descendant sets.
///
/// # Example
///
/// ```
/// use claml_loader::DescendantTracker;
///
/// let mut tracker = DescendantTracker::new();
/// tracker.add_super_class("A.1.1", "A.1"); // child seen before its parent
/// tracker.add_sub_class("A", "A.1");
///
/// assert!(tracker.is_descendant_of("A.1.1", "A"));
/// assert_eq!(tracker.leaf_descendants("A").collect::<Vec<_>>(), vec!["A.1.1"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct DescendantTracker {
    /// Descendants indexed by ancestor code.
    descendants: HashMap<String, BTreeSet<String>>,
    /// Ancestors indexed by descendant code.
    ancestors: HashMap<String, BTreeSet<String>>,
}

impl DescendantTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a `SubClass` reference from `class` to `sub_class`.
    pub fn add_sub_class(&mut self, class: &str, sub_class: &str) {
        self.link(class, sub_class);
    }

    /// Records a `SuperClass` reference from `class` to `super_class`.
    pub fn add_super_class(&mut self, class: &str, super_class: &str) {
        self.link(super_class, class);
    }

    fn link(&mut self, parent: &str, child: &str) {
        if parent == child {
            warn!("Class {} references itself in the hierarchy: ignoring", parent);
            return;
        }

        self.descendants.entry(parent.to_string()).or_default();

        let mut moved = self.descendants.get(child).cloned().unwrap_or_default();
        moved.insert(child.to_string());

        let mut targets = self.ancestors.get(parent).cloned().unwrap_or_default();
        targets.insert(parent.to_string());

        for target in &targets {
            self.descendants
                .entry(target.clone())
                .or_default()
                .extend(moved.iter().cloned());
        }
        for code in &moved {
            self.ancestors
                .entry(code.clone())
                .or_default()
                .extend(targets.iter().cloned());
        }
    }

    /// Returns the transitive descendants of a code, if it has an entry.
    pub fn descendants(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.descendants.get(code)
    }

    /// Returns the transitive ancestors of a code, if any were recorded.
    pub fn ancestors(&self, code: &str) -> Option<&BTreeSet<String>> {
        self.ancestors.get(code)
    }

    /// Returns true if the code has at least one descendant.
    pub fn has_descendants(&self, code: &str) -> bool {
        self.descendants.get(code).is_some_and(|d| !d.is_empty())
    }

    /// Returns true if `descendant` is below `ancestor` (not including self).
    pub fn is_descendant_of(&self, descendant: &str, ancestor: &str) -> bool {
        self.descendants
            .get(ancestor)
            .is_some_and(|d| d.contains(descendant))
    }

    /// Returns the descendants of a code that have no descendants themselves,
    /// in code order.
    pub fn leaf_descendants<'a>(&'a self, code: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.descendants
            .get(code)
            .into_iter()
            .flatten()
            .filter(move |d| !self.has_descendants(d))
            .map(String::as_str)
    }

    /// Number of codes with a descendant entry.
    pub fn len(&self) -> usize {
        self.descendants.len()
    }

    /// Returns true if no links were recorded.
    pub fn is_empty(&self) -> bool {
        self.descendants.is_empty()
    }
}
