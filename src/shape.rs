//! The two element shapes a flat container can store.
//!
//! Ordering, searching and deduplication only ever look at the key of an element. For the
//! set family the element is its own key, for the map family it is the first half of a
//! `(K, V)` pair and the value is opaque payload.

/// Describes how to get the comparison key out of a stored element of type `T`.
pub trait Shape<T> {
    type Key: Ord;

    fn key(elem: &T) -> &Self::Key;
}

/// Elements are bare keys. Used by the set family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyOnly;

/// Elements are `(K, V)` pairs ordered by `K`. Used by the map family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyValue;

impl<T: Ord> Shape<T> for KeyOnly {
    type Key = T;

    fn key(elem: &T) -> &T {
        elem
    }
}

impl<K: Ord, V> Shape<(K, V)> for KeyValue {
    type Key = K;

    fn key(elem: &(K, V)) -> &K {
        &elem.0
    }
}
