//! Field-level validation results shared by every form.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// A named input field of a form.
///
/// `name()` is the field's verbatim wire name (e.g. `"firstName"`), which is
/// also the key the UI surface uses to place an error under its input.
pub trait FormField: Copy + Ord + fmt::Debug {
    fn name(self) -> &'static str;
}

/// Mapping from field to human-readable error message.
///
/// Recomputed in full on every validation pass. A field without an entry
/// is valid; an empty mapping means the whole form is valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for ValidationErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: FormField> ValidationErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error for `field`, replacing any earlier message.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Record `message` for `field` if `value` is empty after trimming.
    ///
    /// Returns `true` when the value was present.
    pub fn require_non_empty(&mut self, field: F, value: &str, message: &str) -> bool {
        if value.trim().is_empty() {
            self.insert(field, message);
            return false;
        }
        true
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, F, String> {
        self.errors.iter()
    }

    /// Errors keyed by wire field name, for UI surfaces that bind by name.
    pub fn by_name(&self) -> BTreeMap<&'static str, &str> {
        self.errors
            .iter()
            .map(|(field, message)| (field.name(), message.as_str()))
            .collect()
    }
}

impl<'a, F: Ord> IntoIterator for &'a ValidationErrors<F> {
    type Item = (&'a F, &'a String);
    type IntoIter = btree_map::Iter<'a, F, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
