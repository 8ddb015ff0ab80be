use serde::{Deserialize, Serialize};
use std::fmt;

use school_core_api::{PersistedRepresentative, Representative, RepresentativeId};

/// Stable identity of a draft list entry for the lifetime of a session.
///
/// Positions shift as entries are removed; keys never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryKey(pub u64);

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftEntry {
    pub key: EntryKey,
    pub representative: Representative,
    /// A stored representative whose attributes were changed in this session
    pub edited: bool,
}

/// Ordered representatives currently associated with the student being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftList {
    entries: Vec<DraftEntry>,
    next_key: u64,
}

impl DraftList {
    pub fn from_originals(originals: &[PersistedRepresentative]) -> Self {
        let mut list = Self::default();
        for original in originals {
            list.push(Representative::Persisted(original.clone()));
        }
        list
    }

    pub fn push(&mut self, representative: Representative) -> EntryKey {
        let key = EntryKey(self.next_key);
        self.next_key += 1;
        self.entries.push(DraftEntry {
            key,
            representative,
            edited: false,
        });
        key
    }

    /// Swap the representative held by `key`, keeping its position.
    ///
    /// Returns `false` when no entry has that key.
    pub fn replace(&mut self, key: EntryKey, representative: Representative) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|entry| entry.key == key) else {
            return false;
        };
        if entry.representative.as_persisted().is_some() && entry.representative != representative {
            entry.edited = true;
        }
        entry.representative = representative;
        true
    }

    pub fn remove_by_key(&mut self, key: EntryKey) -> Option<DraftEntry> {
        let index = self.position(key)?;
        Some(self.entries.remove(index))
    }

    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    pub fn get(&self, index: usize) -> Option<&DraftEntry> {
        self.entries.get(index)
    }

    pub fn by_key(&self, key: EntryKey) -> Option<&DraftEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    pub fn contains_id(&self, id: RepresentativeId) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.representative.id() == Some(id))
    }

    /// Stored ids in list order; drafts are skipped
    pub fn ids(&self) -> Vec<RepresentativeId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.representative.id())
            .collect()
    }

    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &DraftEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut DraftEntry> {
        self.entries.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::test_utils::{create_test_new, create_test_persisted};

    #[test]
    fn test_keys_survive_removals() {
        let mut list = DraftList::default();
        let first = list.push(create_test_new("Ana Gómez").into());
        let second = list.push(create_test_persisted("José Rondón", "87654321").into());
        let third = list.push(create_test_new("Luisa Mora").into());

        assert_eq!(list.position(third), Some(2));
        list.remove_by_key(first);
        assert_eq!(list.position(second), Some(0));
        assert_eq!(list.position(third), Some(1));
        assert!(list.remove_by_key(first).is_none());

        let fourth = list.push(create_test_new("Rosa Díaz").into());
        assert_ne!(fourth, first);
    }

    #[test]
    fn test_replace_marks_only_changed_persisted_entries_as_edited() {
        let persisted = create_test_persisted("José Rondón", "87654321");
        let mut list = DraftList::default();
        let stored = list.push(persisted.clone().into());
        let draft = list.push(create_test_new("Ana Gómez").into());

        assert!(list.replace(stored, persisted.clone().into()));
        assert!(!list.by_key(stored).unwrap().edited);

        let mut changed = persisted.profile.clone();
        changed.email = "jose@example.com".to_string();
        list.replace(stored, Representative::Persisted(persisted).with_profile(changed));
        assert!(list.by_key(stored).unwrap().edited);

        list.replace(draft, create_test_new("Ana María Gómez").into());
        assert!(!list.by_key(draft).unwrap().edited);
        assert!(!list.replace(EntryKey(99), create_test_new("Nadie").into()));
    }

    #[test]
    fn test_contains_id_ignores_drafts() {
        let persisted = create_test_persisted("José Rondón", "87654321");
        let mut list = DraftList::default();
        list.push(create_test_new("Ana Gómez").into());
        list.push(persisted.clone().into());

        assert!(list.contains_id(persisted.id));
        assert!(!list.contains_id(RepresentativeId::new()));
        assert_eq!(list.ids(), vec![persisted.id]);
    }
}
