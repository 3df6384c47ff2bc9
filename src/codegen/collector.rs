//! Ordered Deduplicating Collector
//!
//! Insertion-ordered set used for every accumulation in a generated class:
//! imports, fields, constructors and per-child method groups. Membership
//! follows the element's own `Eq`, so builders (identity-equal) and frozen
//! artifacts (value-equal) get the semantics they need; see
//! [`MethodBuilder`](super::model::MethodBuilder).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize + Hash + Eq",
    deserialize = "T: Deserialize<'de> + Hash + Eq"
))]
#[serde(transparent)]
pub struct OrderedSet<T: Hash + Eq> {
    items: IndexSet<T>,
}

impl<T: Hash + Eq> Default for OrderedSet<T> {
    fn default() -> Self {
        Self {
            items: IndexSet::new(),
        }
    }
}

impl<T: Hash + Eq> OrderedSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add to the end. Returns `false` if an equal item is already present;
    /// the existing item keeps its position.
    pub fn add(&mut self, item: T) -> bool {
        self.items.insert(item)
    }

    /// Add to the front. An equal item already present is left where it is.
    pub fn add_first(&mut self, item: T) -> bool {
        if self.items.contains(&item) {
            return false;
        }
        self.items.shift_insert(0, item);
        true
    }

    /// Remove an item, keeping the order of the rest
    pub fn discard(&mut self, item: &T) -> bool {
        self.items.shift_remove(item)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Items in insertion order; `.rev()` for newest first
    pub fn iter(&self) -> indexmap::set::Iter<'_, T> {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn pop_last(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        self.items.shift_remove_index(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lexicographically sorted snapshot. Only used for import lists.
    pub fn sorted(&self) -> Vec<&T>
    where
        T: Ord,
    {
        let mut res: Vec<&T> = self.items.iter().collect();
        res.sort();
        res
    }
}

impl<T: Hash + Eq> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.add(item);
        }
    }
}

impl<T: Hash + Eq> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Hash + Eq> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = indexmap::set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T: Hash + Eq> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = indexmap::set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
