use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};

use crate::hash::{FixedHashState, HashTable};

// -----------------------------------------------------------------------------
// OrderedMap

/// A hash map which remembers the insertion order of its keys.
///
/// Entries live in a `Vec` in insertion order, a [`HashTable`] stores the
/// index of each entry. Overwriting an existing key keeps its position,
/// removing a key shifts the following entries.
///
/// Equality ignores the order: two maps are equal when they contain the
/// same keys mapped to equal values.
///
/// # Examples
///
/// ```
/// use om_utils::collections::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.insert("b", 1);
/// map.insert("a", 2);
/// map.insert("b", 3);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["b", "a"]);
/// assert_eq!(map.get("b"), Some(&3));
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    entries: Vec<(K, V)>,
    indices: HashTable<usize>,
}

impl<K, V> Default for OrderedMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn hash_of<Q: Hash + ?Sized>(key: &Q) -> u64 {
    FixedHashState.hash_one(key)
}

impl<K, V> OrderedMap<K, V> {
    /// Creates an empty `OrderedMap`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    /// Creates an empty `OrderedMap` with at least the specified capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index` in insertion order.
    #[inline]
    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get(index).map(|(k, v)| (k, v))
    }

    /// Iterates entries in insertion order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.entries.iter())
    }

    /// Iterates entries in insertion order, values mutably.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut(self.entries.iter_mut())
    }

    /// Iterates keys in insertion order.
    #[inline]
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + DoubleEndedIterator {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Iterates values in insertion order.
    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + DoubleEndedIterator {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Removes every entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = &self.entries;
        self.indices
            .find(hash_of(key), |&index| entries[index].0.borrow() == key)
            .copied()
    }

    /// Returns `true` if the map contains `key`.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(key).is_some()
    }

    /// Returns a reference to the value of `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(key).map(|index| &self.entries[index].1)
    }

    /// Returns a mutable reference to the value of `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(key).map(|index| &mut self.entries[index].1)
    }

    /// Inserts a key-value pair.
    ///
    /// If the key already exists its value is replaced in place and the old
    /// value is returned, otherwise the entry is appended.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(index) = self.index_of(&key) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }

        let hash = hash_of(&key);
        let index = self.entries.len();
        self.entries.push((key, value));

        let entries = &self.entries;
        self.indices
            .insert_unique(hash, index, |&i| hash_of(&entries[i].0));
        None
    }

    /// Returns a mutable reference to the value of `key`,
    /// appending the result of `f` if the key is absent.
    pub fn get_or_insert_with(&mut self, key: K, f: impl FnOnce() -> V) -> &mut V {
        let index = match self.index_of(&key) {
            Some(index) => index,
            None => {
                self.insert(key, f());
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }

    /// Removes `key`, shifting all following entries one position forward.
    pub fn shift_remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let entries = &self.entries;
        let removed = match self
            .indices
            .find_entry(hash_of(key), |&index| entries[index].0.borrow() == key)
        {
            Ok(entry) => entry.remove().0,
            Err(_) => return None,
        };

        for index in self.indices.iter_mut() {
            if *index > removed {
                *index -= 1;
            }
        }

        Some(self.entries.remove(removed).1)
    }

    /// Keeps only the entries for which `f` returns `true`, preserving order.
    pub fn retain(&mut self, mut f: impl FnMut(&K, &mut V) -> bool) {
        let before = self.entries.len();
        self.entries.retain_mut(|(k, v)| f(k, v));
        if self.entries.len() != before {
            self.reindex();
        }
    }

    fn reindex(&mut self) {
        self.indices.clear();
        let entries = &self.entries;
        for (index, (key, _)) in entries.iter().enumerate() {
            self.indices
                .insert_unique(hash_of(key), index, |&i| hash_of(&entries[i].0));
        }
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: Hash + Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for OrderedMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self.entries.into_iter())
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Iterators

/// Borrowing iterator of [`OrderedMap`], in insertion order.
pub struct Iter<'a, K, V>(core::slice::Iter<'a, (K, V)>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Mutable iterator of [`OrderedMap`], in insertion order.
pub struct IterMut<'a, K, V>(core::slice::IterMut<'a, (K, V)>);

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (&*k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator of [`OrderedMap`], in insertion order.
pub struct IntoIter<K, V>(alloc::vec::IntoIter<(K, V)>);

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use alloc::vec::Vec;

    #[test]
    fn insert_keeps_first_position() {
        let mut map = OrderedMap::new();
        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("b", 2), None);
        assert_eq!(map.insert("a", 3), Some(1));

        let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(entries, [("a", 3), ("b", 2)]);
    }

    #[test]
    fn shift_remove_reindexes() {
        let mut map: OrderedMap<&str, i32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();

        assert_eq!(map.shift_remove("a"), Some(1));
        assert_eq!(map.shift_remove("a"), None);
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.get_index(0), Some((&"b", &2)));

        map.insert("d", 4);
        assert_eq!(map.get("d"), Some(&4));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn retain_keeps_order() {
        let mut map: OrderedMap<i32, i32> = (0..6).map(|i| (i, i * 10)).collect();
        map.retain(|k, _| k % 2 == 1);

        let keys: Vec<_> = map.keys().copied().collect();
        assert_eq!(keys, [1, 3, 5]);
        assert_eq!(map.get(&5), Some(&50));
    }

    #[test]
    fn equality_ignores_order() {
        let a: OrderedMap<&str, i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: OrderedMap<&str, i32> = [("y", 2), ("x", 1)].into_iter().collect();
        let c: OrderedMap<&str, i32> = [("y", 2)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn get_or_insert_with() {
        let mut map: OrderedMap<&str, Vec<i32>> = OrderedMap::new();
        map.get_or_insert_with("k", Vec::new).push(1);
        map.get_or_insert_with("k", Vec::new).push(2);
        assert_eq!(map.get("k").map(Vec::as_slice), Some(&[1, 2][..]));
    }
}
