//! Backing stores a [`SyncSet`](crate::SyncSet) can hold its items in.
//!
//! - `HashSet<T>`: average O(1) membership, unspecified iteration order
//! - `BTreeSet<T>`: O(log n) membership, snapshots iterate in sorted order

use std::collections::{btree_set, hash_set, BTreeSet, HashSet};
use std::hash::Hash;

/// Minimal set interface the engine mutates through.
pub trait SetStore<T>: Default + Clone + FromIterator<T> {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Insert, returning true if the item was not already present.
    fn insert(&mut self, item: T) -> bool;

    /// Remove, returning true if the item was present.
    fn remove(&mut self, item: &T) -> bool;

    fn contains(&self, item: &T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn iter(&self) -> Self::Iter<'_>;
}

impl<T: Eq + Hash + Clone> SetStore<T> for HashSet<T> {
    type Iter<'a> = hash_set::Iter<'a, T> where T: 'a;

    fn insert(&mut self, item: T) -> bool {
        HashSet::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        HashSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        HashSet::contains(self, item)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }

    fn clear(&mut self) {
        HashSet::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        HashSet::iter(self)
    }
}

impl<T: Ord + Clone> SetStore<T> for BTreeSet<T> {
    type Iter<'a> = btree_set::Iter<'a, T> where T: 'a;

    fn insert(&mut self, item: T) -> bool {
        BTreeSet::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        BTreeSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        BTreeSet::contains(self, item)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }

    fn clear(&mut self) {
        BTreeSet::clear(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        BTreeSet::iter(self)
    }
}
