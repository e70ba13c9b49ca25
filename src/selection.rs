//! Selection set with a distinguished active member.
//!
//! Members are stable object ids, so removing other objects never shifts what
//! is selected. The most recently added member is the *active* selection and
//! is the only one drag-moves and font-size edits apply to.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use crate::doc::ObjectId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Insertion order; the last entry is the active one.
    ids: Vec<ObjectId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole selection with `id`.
    pub fn select_only(&mut self, id: ObjectId) {
        self.ids.clear();
        self.ids.push(id);
    }

    /// Add `id` to the selection. An id that is already selected keeps its
    /// position and does not become active.
    pub fn add(&mut self, id: ObjectId) {
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// The most recently added member.
    #[must_use]
    pub fn active(&self) -> Option<ObjectId> {
        self.ids.last().copied()
    }

    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.ids.contains(id)
    }

    /// Members in the order they were added.
    #[must_use]
    pub fn ids(&self) -> &[ObjectId] {
        &self.ids
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
