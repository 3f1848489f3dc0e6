//! A multimap based on a lazily sorted `SmallVec<(K, V)>`.
//!
//! Every inserted pair is kept. After a sort, pairs with the same key form one contiguous run in
//! insertion order.
use crate::iterators::{Iter, Keys, Values, ValuesMut};
use crate::shape::KeyValue;
use crate::sorted_vec::{Duplicates, SortedVec, State};
use smallvec::{Array, CollectionAllocErr, SmallVec};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::ops::{Index, Range};

/// A multimap backed by a lazily sorted `SmallVec<(K, V)>`.
///
/// There is no `PartialEq`, `Eq` or `Hash`, since comparing needs a sort and so `&mut self`.
/// Compare [FlatMultiMap::as_slice] instead.
pub struct FlatMultiMap<A: Array>(SortedVec<A, KeyValue>);

/// A [FlatMultiMap] with an inline capacity of 2.
pub type FlatMultiMap2<K, V> = FlatMultiMap<[(K, V); 2]>;

impl<A: Array> Debug for FlatMultiMap<A>
where
    A::Item: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FlatMultiMap").field(&self.0).finish()
    }
}

impl<A: Array> Clone for FlatMultiMap<A>
where
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Array> Default for FlatMultiMap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> Index<usize> for FlatMultiMap<A> {
    type Output = A::Item;

    fn index(&self, index: usize) -> &A::Item {
        &self.0.raw_slice()[index]
    }
}

impl<A: Array> FlatMultiMap<A> {
    pub fn new() -> Self {
        Self(SortedVec::new(Duplicates::Retain))
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self(SortedVec::with_capacity(capacity, Duplicates::Retain))
    }

    pub fn is_sorted(&self) -> bool {
        self.0.state() == State::Sorted
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// number of pairs. Never needs a sort, since nothing gets collapsed.
    pub fn len(&self) -> usize {
        self.0.raw_len()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

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

    pub fn swap(&mut self, other: &mut Self) {
        self.0.swap(&mut other.0)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> FlatMultiMap<A> {
    pub fn insert(&mut self, key: K, value: V) {
        self.0.push((key, value))
    }

    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), CollectionAllocErr> {
        self.0.try_push((key, value))
    }

    pub fn sort(&mut self) {
        self.0.ensure_sorted()
    }

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

    /// all keys in order, repeated once per value
    pub fn keys(&mut self) -> Keys<'_, K, V> {
        Keys(self.0.as_sorted_slice().iter())
    }

    pub fn values(&mut self) -> Values<'_, K, V> {
        Values(self.0.as_sorted_slice().iter())
    }

    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut(self.0.as_sorted_mut_slice().iter_mut())
    }

    /// position of the first pair with the given key
    pub fn find<Q>(&mut self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.find(key)
    }

    pub fn lower_bound<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.lower_bound(key)
    }

    pub fn upper_bound<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.upper_bound(key)
    }

    /// positions of the run of pairs with the given key
    pub fn equal_range<Q>(&mut self, key: &Q) -> Range<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.equal_range(key)
    }

    /// number of values stored for the given key
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

    /// the values stored for a key, in insertion order
    pub fn get_all<Q>(&mut self, key: &Q) -> Values<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        Values(self.0.run(key).iter())
    }

    pub fn get_all_mut<Q>(&mut self, key: &Q) -> ValuesMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        ValuesMut(self.0.run_mut(key).iter_mut())
    }

    /// Remove all pairs with the given key. Does not sort.
    ///
    /// Returns the position the first removed pair had, or the storage length if there was none.
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.remove_key(key)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> FromIterator<(K, V)> for FlatMultiMap<A> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> Extend<(K, V)> for FlatMultiMap<A> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<K: Ord, V, A: Array<Item = (K, V)>> IntoIterator for FlatMultiMap<A> {
    type Item = (K, V);
    type IntoIter = smallvec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}
