//! # Failure Sets
//!
//! An ordered mapping from entity name to the violations recorded for it.
//! Entities appear in the order their first violation was recorded, which
//! is document order when fed by the aggregators. An entity with no
//! violations is never present.

use serde::Serialize;

use crate::violation::Violation;

/// Violations recorded against one named entity, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityFailures {
    pub name: String,
    pub failures: Vec<Violation>,
}

/// Insertion-ordered failures for a collection of named entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FailureSet {
    entries: Vec<EntityFailures>,
}

impl FailureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation for `name`.
    ///
    /// Repeated names share one entry; the violation is appended to it.
    pub fn record(&mut self, name: &str, violation: Violation) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.failures.push(violation),
            None => self.entries.push(EntityFailures {
                name: name.to_string(),
                failures: vec![violation],
            }),
        }
    }

    /// Record every violation yielded by `violations`, in order.
    pub fn record_all(&mut self, name: &str, violations: impl IntoIterator<Item = Violation>) {
        for violation in violations {
            self.record(name, violation);
        }
    }

    /// Violations recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&[Violation]> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.failures.as_slice())
    }

    /// Whether no entity failed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of failing entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of violations across all entities.
    pub fn violation_count(&self) -> usize {
        self.entries.iter().map(|e| e.failures.len()).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EntityFailures> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a FailureSet {
    type Item = &'a EntityFailures;
    type IntoIter = std::slice::Iter<'a, EntityFailures>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
