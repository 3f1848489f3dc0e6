//! A multiset based on a lazily sorted `SmallVec<T>`.
use crate::iterators::SetIter;
use crate::shape::KeyOnly;
use crate::sorted_vec::{Duplicates, SortedVec, State};
use smallvec::{Array, CollectionAllocErr, SmallVec};
use std::borrow::Borrow;
use std::fmt::Debug;
use std::iter::FromIterator;
use std::ops::{Index, Range};

/// A multiset backed by a lazily sorted `SmallVec<T>`. Every inserted element is kept.
///
/// There is no `PartialEq`, `Eq` or `Hash`, since comparing needs a sort and so `&mut self`.
/// Compare [FlatMultiSet::as_slice] instead.
pub struct FlatMultiSet<A: Array>(SortedVec<A, KeyOnly>);

/// A [FlatMultiSet] with an inline capacity of 2.
pub type FlatMultiSet2<T> = FlatMultiSet<[T; 2]>;

impl<A: Array> Debug for FlatMultiSet<A>
where
    A::Item: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FlatMultiSet").field(&self.0).finish()
    }
}

impl<A: Array> Clone for FlatMultiSet<A>
where
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<A: Array> Default for FlatMultiSet<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Array> Index<usize> for FlatMultiSet<A> {
    type Output = A::Item;

    fn index(&self, index: usize) -> &A::Item {
        &self.0.raw_slice()[index]
    }
}

impl<A: Array> FlatMultiSet<A> {
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

    /// number of elements, counting duplicates. Does not sort.
    pub fn len(&self) -> usize {
        self.0.raw_len()
    }

    pub fn capacity(&self) -> usize {
        self.0.capacity()
    }

    pub fn as_unsorted_slice(&self) -> &[A::Item] {
        self.0.raw_slice()
    }

    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_at(&mut self, index: usize) -> usize {
        self.0.remove_at(index)
    }

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

impl<T: Ord, A: Array<Item = T>> FlatMultiSet<A> {
    pub fn insert(&mut self, value: T) {
        self.0.push(value)
    }

    pub fn try_insert(&mut self, value: T) -> Result<(), CollectionAllocErr> {
        self.0.try_push(value)
    }

    pub fn sort(&mut self) {
        self.0.ensure_sorted()
    }

    pub fn as_slice(&mut self) -> &[T] {
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

    pub fn iter(&mut self) -> SetIter<'_, T> {
        SetIter(self.0.as_sorted_slice().iter())
    }

    pub fn find<Q>(&mut self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.find(value)
    }

    pub fn lower_bound<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.lower_bound(value)
    }

    pub fn upper_bound<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.upper_bound(value)
    }

    pub fn equal_range<Q>(&mut self, value: &Q) -> Range<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.equal_range(value)
    }

    /// number of copies of `value`
    pub fn count<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.count(value)
    }

    pub fn contains<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.find(value).is_some()
    }

    /// all stored copies of `value`, in insertion order
    pub fn get_all<Q>(&mut self, value: &Q) -> &[T]
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.run(value)
    }

    /// Remove all copies of `value`. Does not sort.
    pub fn remove<Q>(&mut self, value: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.remove_key(value)
    }
}

impl<T: Ord, A: Array<Item = T>> FromIterator<T> for FlatMultiSet<A> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut res = Self::new();
        res.extend(iter);
        res
    }
}

impl<T: Ord, A: Array<Item = T>> Extend<T> for FlatMultiSet<A> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for FlatMultiSet2<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().cloned())
    }
}

impl<T: Ord, A: Array<Item = T>> IntoIterator for FlatMultiSet<A> {
    type Item = T;
    type IntoIter = smallvec::IntoIter<A>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_sorted_vec().into_iter()
    }
}
