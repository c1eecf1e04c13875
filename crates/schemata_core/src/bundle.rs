//! Type graphs keyed by [`TypeId`]

use std::collections::{BTreeMap, BTreeSet};

use crate::data::TypeData;
use crate::error::{Error, Result};
use crate::type_id::TypeId;

/// A set of payloads, one per type, plus the roots the caller asked for.
///
/// Entries are kept in a `BTreeMap` so iteration order, and therefore every
/// generated document, is deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle<T> {
    roots: Vec<TypeId>,
    entries: BTreeMap<TypeId, T>,
}

impl<T> Default for Bundle<T> {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Bundle<T> {
    #[must_use]
    pub fn new(roots: Vec<TypeId>) -> Self {
        Self {
            roots,
            entries: BTreeMap::new(),
        }
    }

    /// Build a bundle from already collected entries
    #[must_use]
    pub fn from_entries(roots: Vec<TypeId>, entries: BTreeMap<TypeId, T>) -> Self {
        Self { roots, entries }
    }

    #[must_use]
    pub fn roots(&self) -> &[TypeId] {
        &self.roots
    }

    pub fn add_root(&mut self, id: TypeId) {
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
    }

    pub fn insert(&mut self, id: TypeId, payload: T) -> Option<T> {
        self.entries.insert(id, payload)
    }

    #[must_use]
    pub fn get(&self, id: &TypeId) -> Option<&T> {
        self.entries.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &TypeId) -> bool {
        self.entries.contains_key(id)
    }

    /// Lookup that treats absence as a broken closure invariant.
    ///
    /// # Errors
    ///
    /// [`Error::MissingType`] when `id` has no entry.
    pub fn require(&self, id: &TypeId) -> Result<&T> {
        self.entries
            .get(id)
            .ok_or_else(|| Error::MissingType { id: id.clone() })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &TypeId> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TypeId, &T)> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&TypeId, &mut T)> {
        self.entries.iter_mut()
    }

    /// Convert every payload, keeping keys and roots
    #[must_use]
    pub fn map<U>(self, mut f: impl FnMut(&TypeId, T) -> U) -> Bundle<U> {
        let entries = self
            .entries
            .into_iter()
            .map(|(id, payload)| {
                let mapped = f(&id, payload);
                (id, mapped)
            })
            .collect();
        Bundle {
            roots: self.roots,
            entries,
        }
    }

    /// Fallible [`Bundle::map`]; the first error discards the whole bundle.
    ///
    /// # Errors
    ///
    /// Whatever `f` returns.
    pub fn try_map<U>(self, mut f: impl FnMut(&TypeId, T) -> Result<U>) -> Result<Bundle<U>> {
        let mut entries = BTreeMap::new();
        for (id, payload) in self.entries {
            let mapped = f(&id, payload)?;
            entries.insert(id, mapped);
        }
        Ok(Bundle {
            roots: self.roots,
            entries,
        })
    }

    /// Run a step over this bundle
    ///
    /// # Errors
    ///
    /// Whatever the step reports.
    pub fn apply<U>(self, step: &impl crate::step::Step<T, U>) -> Result<Bundle<U>> {
        step.process(self)
    }

    /// Ids reachable from `starts` by following `edges`, starts included.
    ///
    /// # Errors
    ///
    /// [`Error::MissingType`] for the first reachable id without an entry.
    pub fn reachable<'a, I>(
        &'a self,
        starts: impl IntoIterator<Item = &'a TypeId>,
        mut edges: impl FnMut(&'a T) -> I,
    ) -> Result<BTreeSet<TypeId>>
    where
        I: IntoIterator<Item = TypeId>,
    {
        let mut seen = BTreeSet::new();
        let mut queue: Vec<TypeId> = starts.into_iter().cloned().collect();
        while let Some(id) = queue.pop() {
            if seen.contains(&id) {
                continue;
            }
            let payload = self.require(&id)?;
            queue.extend(edges(payload).into_iter().filter(|next| !seen.contains(next)));
            seen.insert(id);
        }
        Ok(seen)
    }
}

impl<T> IntoIterator for Bundle<T> {
    type Item = (TypeId, T);
    type IntoIter = std::collections::btree_map::IntoIter<TypeId, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Bundle<TypeData> {
    /// Check that every root and every id reachable from a root has an entry.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRoot`] or [`Error::MissingType`].
    pub fn validate_closure(&self) -> Result<()> {
        if let Some(root) = self.roots.iter().find(|root| !self.contains(root)) {
            return Err(Error::UnknownRoot { id: root.clone() });
        }
        self.reachable(&self.roots, |data| {
            data.references().into_iter().cloned().collect::<Vec<_>>()
        })
        .map(|_| ())
    }
}
