// borrowing iterators over the sorted storage of the flat containers
use sorted_iter::sorted_iterator::SortedByItem;
use sorted_iter::sorted_pair_iterator::SortedByKey;
use std::iter::FusedIterator;
use std::slice;

macro_rules! delegate_iterator {
    ($name:ident<$($lt:lifetime),*; $($p:ident),*>, $item:ty, |$x:ident| $map:expr) => {
        impl<$($lt,)* $($p),*> Iterator for $name<$($lt,)* $($p),*> {
            type Item = $item;

            fn next(&mut self) -> Option<Self::Item> {
                self.0.next().map(|$x| $map)
            }

            fn size_hint(&self) -> (usize, Option<usize>) {
                self.0.size_hint()
            }
        }

        impl<$($lt,)* $($p),*> DoubleEndedIterator for $name<$($lt,)* $($p),*> {
            fn next_back(&mut self) -> Option<Self::Item> {
                self.0.next_back().map(|$x| $map)
            }
        }

        impl<$($lt,)* $($p),*> ExactSizeIterator for $name<$($lt,)* $($p),*> {}
        impl<$($lt,)* $($p),*> FusedIterator for $name<$($lt,)* $($p),*> {}
    };
}

/// An iterator over the entries of a flat map or multimap, in key order.
pub struct Iter<'a, K, V>(pub(crate) slice::Iter<'a, (K, V)>);

/// An iterator over the keys of a flat map or multimap, in order.
pub struct Keys<'a, K, V>(pub(crate) slice::Iter<'a, (K, V)>);

/// An iterator over the values of a flat map or multimap, in key order.
pub struct Values<'a, K, V>(pub(crate) slice::Iter<'a, (K, V)>);

/// A mutable iterator over the values of a flat map or multimap, in key order.
pub struct ValuesMut<'a, K, V>(pub(crate) slice::IterMut<'a, (K, V)>);

/// An iterator over the elements of a flat set or multiset, in order.
pub struct SetIter<'a, T>(pub(crate) slice::Iter<'a, T>);

delegate_iterator!(Iter<'a; K, V>, (&'a K, &'a V), |x| (&x.0, &x.1));
delegate_iterator!(Keys<'a; K, V>, &'a K, |x| &x.0);
delegate_iterator!(Values<'a; K, V>, &'a V, |x| &x.1);
delegate_iterator!(ValuesMut<'a; K, V>, &'a mut V, |x| &mut x.1);
delegate_iterator!(SetIter<'a; T>, &'a T, |x| x);

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<'a, T> Clone for SetIter<'a, T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

// "sorted" in the sorted-iter sense means non-decreasing, which the multi containers satisfy too
impl<'a, K, V> SortedByKey for Iter<'a, K, V> {}
impl<'a, K, V> SortedByItem for Keys<'a, K, V> {}
impl<'a, T> SortedByItem for SetIter<'a, T> {}
