use serde::{Deserialize, Serialize};

use school_core_api::RepresentativeId;

/// Representatives staged for permanent erasure when the student is saved.
///
/// Insert-once set semantics with insertion order preserved. Nothing is
/// erased until a commit consumes the queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredDeletionQueue {
    ids: Vec<RepresentativeId>,
}

impl DeferredDeletionQueue {
    /// Returns `false` when `id` was already queued.
    pub fn insert(&mut self, id: RepresentativeId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: RepresentativeId) -> bool {
        self.ids.contains(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RepresentativeId> {
        self.ids.iter()
    }

    pub fn to_vec(&self) -> Vec<RepresentativeId> {
        self.ids.clone()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
