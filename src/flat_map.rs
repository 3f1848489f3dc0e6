//! A map based on a lazily sorted `SmallVec<(K, V)>` of key value pairs.
//!
//! Inserting is a plain append and does not look at existing keys. Conflicting inserts are
//! resolved in bulk by the next query that needs order, so a burst of inserts followed by a
//! burst of lookups costs one sort instead of one O(N) shift per insert.
//!
//! A disadvantage is that every order dependent query needs `&mut self`, since it may have to
//! sort first.
use crate::dedup::Keep;
use crate::iterators::{Iter, Keys, Values, ValuesMut};
use crate::shape::KeyValue;
use crate::sorted_vec::{Duplicates, SortedVec, State};
use smallvec::{Array, CollectionAllocErr, SmallVec};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::ops::{Index, Range};

/// A map backed by a lazily sorted `SmallVec<(K, V)>`. At most one value per key survives a sort.
///
/// There is no `PartialEq`, `Eq` or `Hash`, since comparing needs a sort and so `&mut self`.
/// Compare [FlatMap::as_slice] instead.
pub struct FlatMap<A: Array>(SortedVec<A, KeyValue>);

/// A [FlatMap] with an inline capacity of 2.
pub type FlatMap2<K, V> = FlatMap<[(K, V); 2]>;

impl<A: Array> Debug for FlatMap<A>
where
    A::Item: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FlatMap").field(&self.0).finish()
    }
}

impl<A: Array> Clone for FlatMap<A>
where
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Array> Default for FlatMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> Index<usize> for FlatMap<A> {
    type Output = A::Item;

    /// dereference a position. Does not sort.
    fn index(&self, index: usize) -> &A::Item {
        &self.0.raw_slice()[index]
    }
}

impl<A: Array> FlatMap<A> {
    /// an empty map that keeps the last inserted value for each key
    pub fn new() -> Self {
        Self::with_keep(Keep::Last)
    }

    pub fn with_keep(keep: Keep) -> Self {
        Self(SortedVec::new(Duplicates::Collapse(keep)))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(SortedVec::with_capacity(capacity, Duplicates::Collapse(Keep::Last)))
    }

    /// the policy used to resolve conflicting inserts
    pub fn keep(&self) -> Keep {
        match self.0.duplicates() {
            Duplicates::Collapse(keep) => keep,
            Duplicates::Retain => unreachable!("a flat map always collapses duplicates"),
        }
    }

    /// change the conflict policy. Inserts that are already resolved are not affected.
    pub fn set_keep(&mut self, keep: Keep) {
        self.0.set_duplicates(Duplicates::Collapse(keep))
    }

    pub fn is_sorted(&self) -> bool {
        self.0.state() == State::Sorted
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    /// the underlying memory in its current order, possibly with unresolved duplicates
    pub fn as_unsorted_slice(&self) -> &[A::Item] {
        self.0.raw_slice()
    }

    /// Remove the pair at a position, returning the position of the following pair.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> usize {
        self.0.remove_at(index)
    }

    /// Remove the pairs in a range of positions, returning the position after the range.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds.
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        self.0.remove_range(range)
    }

    /// retain all pairs matching a predicate
    pub fn retain<F: FnMut(&A::Item) -> bool>(&mut self, f: F) {
        self.0.retain(f)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional)
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), CollectionAllocErr> {
        self.0.try_reserve(additional)
    }

    pub fn shrink_to_fit(&mut self) {
        self.0.shrink_to_fit()
    }

    /// exchange the complete contents with another map
    pub fn swap(&mut self, other: &mut Self) {
        self.0.swap(&mut other.0)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> FlatMap<A> {
    /// Append a mapping. An existing mapping for the same key is resolved at the next sort.
    pub fn insert(&mut self, key: K, value: V) {
        self.0.push((key, value))
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), CollectionAllocErr> {
        self.0.try_push((key, value))
    }

    /// sort and resolve pending conflicts with the configured policy
    pub fn sort(&mut self) {
        self.0.ensure_sorted()
    }

    /// sort and resolve conflicts with the given policy, even if the map is already sorted
    pub fn sort_with(&mut self, keep: Keep) {
        self.0.sort_collapsing(keep)
    }

    /// number of mappings. Resolves pending conflicts first.
    pub fn len(&mut self) -> usize {
        self.0.len()
    }

    /// the mappings as a slice of key value pairs, in key order
    pub fn as_slice(&mut self) -> &[(K, V)] {
        self.0.as_sorted_slice()
    }

    pub fn into_sorted_vec(self) -> SmallVec<A> {
        self.0.into_sorted()
    }

    pub fn begin(&mut self) -> usize {
        self.0.begin()
    }

    pub fn end(&mut self) -> usize {
        self.0.end()
    }

    pub fn iter(&mut self) -> Iter<'_, K, V> {
        Iter(self.0.as_sorted_slice().iter())
    }

    pub fn keys(&mut self) -> Keys<'_, K, V> {
        Keys(self.0.as_sorted_slice().iter())
    }

    pub fn values(&mut self) -> Values<'_, K, V> {
        Values(self.0.as_sorted_slice().iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.0.as_sorted_mut_slice().iter_mut())
    }

    /// position of the mapping for a key. Time complexity is O(log N) once sorted.
    pub fn find<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.find(key)
    }

    /// position of the first mapping with a key not less than `key`
    pub fn lower_bound<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.lower_bound(key)
    }

    /// position of the first mapping with a key greater than `key`
    pub fn upper_bound<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.upper_bound(key)
    }

    /// positions of the mappings for a key. Contains at most one position.
    pub fn equal_range<Q>(&mut self, key: &Q) -> Range<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.equal_range(key)
    }

    /// 1 if there is a mapping for the key, otherwise 0
    pub fn count<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.count(key)
    }

    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.find(key).is_some()
    }

    /// lookup of a mapping. Time complexity is O(log N) once sorted. Binary search.
    pub fn get<'a, Q>(&'a mut self, key: &Q) -> Option<&'a V>
    where
        K: Borrow<Q> + 'a,
        Q: Ord + ?Sized,
    {
        self.0.run(key).first().map(|(_, v)| v)
    }

    pub fn get_mut<'a, Q>(&'a mut self, key: &Q) -> Option<&'a mut V>
    where
        K: Borrow<Q> + 'a,
        Q: Ord + ?Sized,
    {
        self.0.run_mut(key).first_mut().map(|(_, v)| v)
    }

    /// Remove the mapping for a key, including any conflicting inserts that are still pending.
    ///
    /// Does not sort. Returns the position the removed pair had, or the storage length if
    /// there was no mapping.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.remove_key(key)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> FromIterator<(K, V)> for FlatMap<A> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> Extend<(K, V)> for FlatMap<A> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> IntoIterator for FlatMap<A> {
    type Item = (K, V);
    type IntoIter = smallvec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use std::collections::BTreeMap;

    type Test = FlatMap2<i32, f64>;
    type Ref = BTreeMap<u8, u32>;

    fn insert_12(map: &mut Test) {
        map.insert(10, 1.);
        map.insert(10, -999.99);
        map.insert(11, 100.);
        map.insert(12, 29.);
        map.insert(13, 66.);
        map.insert(14, 44.);
        map.insert(12, 40.);
        map.insert(12, 50.);
    }

    #[test]
    fn last_insert_wins() {
        let mut map = Test::new();
        insert_12(&mut map);
        assert!(!map.is_sorted());
        assert_eq!(map.len(), 5);
        assert!(map.is_sorted());
        assert_eq!(map.count(&12), 1);
        assert_eq!(map.iter().count(), 5);
        assert_eq!(map.get(&10), Some(&-999.99));
        map.remove(&11);
        assert_eq!(map.len(), 4);
        let pos = map.find(&12).unwrap();
        assert_eq!(map[pos], (12, 50.));
    }

    #[test]
    fn first_insert_wins() {
        let mut map = Test::with_keep(Keep::First);
        insert_12(&mut map);
        assert_eq!(map.get(&12), Some(&29.));
        assert_eq!(map.get(&10), Some(&1.));
    }

    #[test]
    fn explicit_sort_with_policy() {
        let mut map = Test::new();
        insert_12(&mut map);
        map.sort_with(Keep::First);
        assert_eq!(map.get(&12), Some(&29.));
        // resolved conflicts stay resolved
        map.set_keep(Keep::Last);
        assert_eq!(map.get(&12), Some(&29.));
        map.insert(12, 70.);
        assert_eq!(map.get(&12), Some(&70.));
    }

    #[test]
    fn set_keep_applies_to_pending_conflicts() {
        let mut map: FlatMap2<u32, u32> = FlatMap::new();
        map.insert(1, 1);
        map.insert(1, 2);
        map.set_keep(Keep::First);
        assert_eq!(map.keep(), Keep::First);
        assert!(!map.is_sorted());
        assert_eq!(map.get(&1), Some(&1));
        map.insert(1, 3);
        map.set_keep(Keep::Last);
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn lookup_by_borrowed_key() {
        let mut map: FlatMap2<String, u32> = FlatMap::new();
        map.insert("b".to_owned(), 1);
        map.insert("a".to_owned(), 2);
        assert_eq!(map.get("a"), Some(&2));
        if let Some(v) = map.get_mut("b") {
            *v += 10;
        }
        assert_eq!(map.get("b"), Some(&11));
        assert_eq!(map.get("c"), None);
    }

    #[test]
    fn compare_through_sorted_slices() {
        let mut a: FlatMap2<u32, u32> = vec![(2, 0), (1, 0), (2, 1)].into_iter().collect();
        let mut b: FlatMap2<u32, u32> = vec![(1, 0), (2, 1)].into_iter().collect();
        assert_ne!(a.as_unsorted_slice(), b.as_unsorted_slice());
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn bounds_and_ranges() {
        let mut map: FlatMap2<u32, &str> = FlatMap::new();
        map.extend(vec![(5, "e"), (1, "a"), (3, "c")]);
        assert_eq!(map.begin(), 0);
        assert_eq!(map.end(), 3);
        assert_eq!(map.lower_bound(&2), 1);
        assert_eq!(map.upper_bound(&3), 2);
        assert_eq!(map.equal_range(&3), 1..2);
        assert_eq!(map.equal_range(&4), 2..2);
        assert_eq!(map.find(&4), None);
        assert!(map.contains_key(&5));
        assert_eq!(map.count(&4), 0);
    }

    #[test]
    fn count_sorts_pending_inserts() {
        let mut map: FlatMap2<u32, u32> = FlatMap::new();
        map.insert(2, 0);
        map.insert(1, 0);
        assert_eq!(map.count(&1), 1);
        assert!(map.is_sorted());
    }

    #[test]
    fn remove_does_not_sort() {
        let mut map: FlatMap2<u32, u32> = FlatMap::new();
        map.insert(3, 0);
        map.insert(1, 1);
        map.insert(3, 2);
        assert_eq!(map.remove(&3), 0);
        assert!(!map.is_sorted());
        assert_eq!(map.as_unsorted_slice(), &[(1, 1)]);
        assert_eq!(map.remove(&7), 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn remove_by_position() {
        let mut map: FlatMap2<u32, u32> = (0..6).map(|i| (i, i * 10)).collect();
        let pos = map.find(&2).unwrap();
        let next = map.remove_at(pos);
        assert_eq!(map[next], (3, 30));
        let end = map.remove_range(1..3);
        assert_eq!(map[end], (4, 40));
        assert!(map.is_sorted());
        assert_eq!(map.as_slice(), &[(0, 0), (4, 40), (5, 50)]);
    }

    #[test]
    fn swap_transfers_contents() {
        let mut a = Test::new();
        insert_12(&mut a);
        let mut b = Test::new();
        a.swap(&mut b);
        assert!(a.is_empty());
        assert_eq!(b.len(), 5);
        assert_eq!(b.get(&12), Some(&50.));
    }

    #[test]
    fn values_mut_keeps_order() {
        let mut map: FlatMap2<u32, u32> = vec![(2, 1), (1, 1), (2, 5)].into_iter().collect();
        for v in map.values_mut() {
            *v *= 10;
        }
        *map.get_mut(&1).unwrap() += 1;
        assert_eq!(map.as_slice(), &[(1, 11), (2, 50)]);
        let keys: Vec<u32> = map.keys().cloned().collect();
        assert_eq!(keys, vec![1, 2]);
        let values: Vec<u32> = map.values().cloned().collect();
        assert_eq!(values, vec![11, 50]);
    }

    #[test]
    fn clear_resets() {
        let mut map = Test::new();
        insert_12(&mut map);
        map.clear();
        assert!(map.is_sorted());
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn into_iter_is_sorted() {
        let expected = btreemap! { 1 => 'b', 2 => 'c' };
        let map: FlatMap2<i32, char> = vec![(2, 'a'), (1, 'b'), (2, 'c')].into_iter().collect();
        let actual: BTreeMap<i32, char> = map.into_iter().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn try_insert_and_reserve() {
        let mut map: FlatMap2<u32, u32> = FlatMap::new();
        map.try_reserve(16).unwrap();
        assert!(map.capacity() >= 16);
        map.try_insert(1, 2).unwrap();
        assert_eq!(map.get(&1), Some(&2));
        assert!(map.try_reserve(usize::MAX).is_err());
    }

    #[quickcheck]
    fn behaves_like_btreemap(pairs: Vec<(u8, u32)>, removed: Vec<u8>) -> bool {
        let mut expected = Ref::new();
        let mut actual: FlatMap2<u8, u32> = FlatMap::new();
        for (k, v) in pairs {
            expected.insert(k, v);
            actual.insert(k, v);
        }
        for k in removed {
            expected.remove(&k);
            actual.remove(&k);
        }
        let expected: Vec<(u8, u32)> = expected.into_iter().collect();
        actual.len() == expected.len() && actual.as_slice() == expected.as_slice()
    }

    lazy_sort_laws!(FlatMap2<u8, u32>, |x: u8| (x, x as u32));
    unique_laws!(FlatMap2<u8, u32>, |x: u8| (x, x as u32));
}
