//! The lazily sorted vector that all flat containers are built on.
//!
//! Inserts are plain appends that mark the vector dirty. The first order dependent query after
//! that does one stable sort of the whole vector and, if the container collapses duplicates,
//! one dedup pass. Removals work on the storage as it is and never change the state.
use crate::dedup::{collapse_runs, Keep};
use crate::shape::Shape;
use smallvec::{Array, CollectionAllocErr, SmallVec};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Range;

/// Whether the storage is known to be in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// ordered by key, and free of duplicates if the container collapses them
    Sorted,
    /// elements have been appended since the last sort
    Dirty,
}

/// What a sort does with elements that share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Duplicates {
    /// all elements survive, runs stay in insertion order
    Retain,
    /// every run is collapsed to one element
    Collapse(Keep),
}

pub struct SortedVec<A: Array, S> {
    data: SmallVec<A>,
    state: State,
    duplicates: Duplicates,
    shape: PhantomData<S>,
}

impl<A: Array, S> Clone for SortedVec<A, S>
where
    A::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            state: self.state,
            duplicates: self.duplicates,
            shape: PhantomData,
        }
    }
}

impl<A: Array, S> Debug for SortedVec<A, S>
where
    A::Item: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortedVec")
            .field("state", &self.state)
            .field("elements", &self.data.as_slice())
            .finish()
    }
}

impl<A: Array, S> SortedVec<A, S> {
    pub fn new(duplicates: Duplicates) -> Self {
        Self {
            data: SmallVec::new(),
            state: State::Sorted,
            duplicates,
            shape: PhantomData,
        }
    }

    pub fn with_capacity(capacity: usize, duplicates: Duplicates) -> Self {
        Self {
            data: SmallVec::with_capacity(capacity),
            state: State::Sorted,
            duplicates,
            shape: PhantomData,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn duplicates(&self) -> Duplicates {
        self.duplicates
    }

    /// changing the mode only affects the next sort
    pub fn set_duplicates(&mut self, duplicates: Duplicates) {
        self.duplicates = duplicates;
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// number of stored elements, including duplicates that have not been collapsed yet
    pub fn raw_len(&self) -> usize {
        self.data.len()
    }

    /// the storage in whatever order it currently has
    pub fn raw_slice(&self) -> &[A::Item] {
        self.data.as_slice()
    }

    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    pub fn push(&mut self, elem: A::Item) {
        self.data.push(elem);
        self.state = State::Dirty;
    }

    pub fn try_push(&mut self, elem: A::Item) -> Result<(), CollectionAllocErr> {
        self.data.try_reserve(1)?;
        self.push(elem);
        Ok(())
    }

    pub fn extend<I: IntoIterator<Item = A::Item>>(&mut self, iter: I) {
        let before = self.data.len();
        self.data.extend(iter);
        if self.data.len() != before {
            self.state = State::Dirty;
        }
    }

    /// remove the element at `index`, returning the position of its successor
    pub fn remove_at(&mut self, index: usize) -> usize {
        self.data.remove(index);
        index
    }

    /// remove a contiguous block, returning the position of the element after it
    pub fn remove_range(&mut self, range: Range<usize>) -> usize {
        let start = range.start;
        self.data.drain(range);
        start
    }

    pub fn retain<F: FnMut(&A::Item) -> bool>(&mut self, mut f: F) {
        self.data.retain(|elem| f(elem))
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.state = State::Sorted;
    }

    pub fn reserve(&mut self, additional: usize) {
        self.data.reserve(additional)
    }

    pub fn try_reserve(&mut self, additional: usize) -> Result<(), CollectionAllocErr> {
        self.data.try_reserve(additional)
    }

    pub fn shrink_to_fit(&mut self) {
        self.data.shrink_to_fit()
    }

    /// exchange storage, state and duplicate mode with another vector
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other)
    }
}

impl<A: Array, S: Shape<A::Item>> SortedVec<A, S> {
    /// sort if anything was appended since the last sort
    pub fn ensure_sorted(&mut self) {
        if self.state == State::Dirty {
            self.sort();
        }
    }

    /// unconditionally sort, and collapse duplicates according to the configured mode
    pub fn sort(&mut self) {
        match self.duplicates {
            Duplicates::Retain => self.sort_retaining(),
            Duplicates::Collapse(keep) => self.sort_collapsing(keep),
        }
    }

    fn sort_stable(&mut self) {
        log::trace!("sorting {} elements ({:?})", self.data.len(), self.duplicates);
        if self.data.len() > 1 {
            self.data.sort_by(|a, b| S::key(a).cmp(S::key(b)));
        }
    }

    pub fn sort_retaining(&mut self) {
        self.sort_stable();
        self.state = State::Sorted;
    }

    pub fn sort_collapsing(&mut self, keep: Keep) {
        self.sort_stable();
        let removed = collapse_runs(&mut self.data, S::key, keep);
        if removed > 0 {
            log::trace!("collapsed {} duplicates, keeping {:?}", removed, keep);
        }
        self.state = State::Sorted;
    }

    /// number of logical elements. Sorts first if duplicates get collapsed.
    pub fn len(&mut self) -> usize {
        if let Duplicates::Collapse(_) = self.duplicates {
            self.ensure_sorted();
        }
        self.data.len()
    }

    pub fn as_sorted_slice(&mut self) -> &[A::Item] {
        self.ensure_sorted();
        self.data.as_slice()
    }

    /// mutable access to the sorted storage. Callers must not change keys.
    pub fn as_sorted_mut_slice(&mut self) -> &mut [A::Item] {
        self.ensure_sorted();
        self.data.as_mut_slice()
    }

    pub fn into_sorted(mut self) -> SmallVec<A> {
        self.ensure_sorted();
        self.data
    }

    pub fn begin(&mut self) -> usize {
        self.ensure_sorted();
        0
    }

    pub fn end(&mut self) -> usize {
        self.ensure_sorted();
        self.data.len()
    }

    pub fn lower_bound<Q>(&mut self, key: &Q) -> usize
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.as_sorted_slice()
            .partition_point(|elem| S::key(elem).borrow().cmp(key) == Ordering::Less)
    }

    pub fn upper_bound<Q>(&mut self, key: &Q) -> usize
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.as_sorted_slice()
            .partition_point(|elem| S::key(elem).borrow().cmp(key) != Ordering::Greater)
    }

    pub fn equal_range<Q>(&mut self, key: &Q) -> Range<usize>
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let elements = self.as_sorted_slice();
        let start =
            elements.partition_point(|elem| S::key(elem).borrow().cmp(key) == Ordering::Less);
        let len = elements[start..]
            .partition_point(|elem| S::key(elem).borrow().cmp(key) == Ordering::Equal);
        start..start + len
    }

    /// position of the first element with the given key
    pub fn find<Q>(&mut self, key: &Q) -> Option<usize>
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let range = self.equal_range(key);
        if range.is_empty() {
            None
        } else {
            Some(range.start)
        }
    }

    pub fn count<Q>(&mut self, key: &Q) -> usize
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.equal_range(key).len()
    }

    /// the run of elements with the given key
    pub fn run<Q>(&mut self, key: &Q) -> &[A::Item]
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let range = self.equal_range(key);
        &self.data[range]
    }

    pub fn run_mut<Q>(&mut self, key: &Q) -> &mut [A::Item]
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let range = self.equal_range(key);
        &mut self.data[range]
    }

    /// Remove every element with the given key, in the current storage order.
    ///
    /// Returns the position the first removed element had, which now holds its successor,
    /// or the storage length if nothing matched.
    pub fn remove_key<Q>(&mut self, key: &Q) -> usize
    where
        S::Key: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let matches = |elem: &A::Item| S::key(elem).borrow().cmp(key) == Ordering::Equal;
        match self.data.iter().position(|elem| matches(elem)) {
            Some(first) => {
                self.data.retain(|elem| !matches(elem));
                first
            }
            None => self.data.len(),
        }
    }
}
