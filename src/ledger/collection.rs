use serde::{Deserialize, Serialize};

use crate::error::Result;

pub type RecordId = u64;

/// A ledger entity stored in a [`Collection`].
pub trait Record {
    /// Human readable kind, used in errors and logs
    const KIND: &'static str;

    fn id(&self) -> RecordId;
}

/// Raw, unvalidated input for a record, as a form would hand it over.
pub trait Draft {
    type Record: Record;

    /// Check every field and build the record with the given id.
    /// Must not have side effects.
    fn validate(&self, id: RecordId) -> Result<Self::Record>;
}

/// Insertion-ordered records with unique ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.items.iter().find(|r| r.id() == id)
    }

    pub fn get_mut(&mut self, id: RecordId) -> Option<&mut T> {
        self.items.iter_mut().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter().find(|r| predicate(*r))
    }

    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.items.iter_mut().find(|r| predicate(&**r))
    }

    pub fn filter<'a, P>(&'a self, mut predicate: P) -> impl Iterator<Item = &'a T> + 'a
    where
        P: FnMut(&T) -> bool + 'a,
    {
        self.items.iter().filter(move |r| predicate(*r))
    }

    /// Append a record. The caller hands out ids, so a clash is a bug.
    pub fn insert(&mut self, record: T) {
        debug_assert!(
            !self.contains(record.id()),
            "duplicate {} id {}",
            T::KIND,
            record.id()
        );
        self.items.push(record);
    }

    /// Remove by id. Unknown ids are a no-op.
    pub fn remove(&mut self, id: RecordId) -> Option<T> {
        let idx = self.items.iter().position(|r| r.id() == id)?;
        Some(self.items.remove(idx))
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
