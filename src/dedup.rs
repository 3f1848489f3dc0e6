use smallvec::{Array, SmallVec};

/// Which element of a run of equal keys survives deduplication.
///
/// Runs are formed by a stable sort, so inside a run the elements are in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keep {
    /// the element that was inserted first wins
    First,
    /// the element that was inserted last wins, like repeated inserts into a map
    Last,
}

impl Default for Keep {
    fn default() -> Self {
        Keep::Last
    }
}

/// deduplicate a slice by key, moving the duplicates to the end.
/// returns the number of unique elements.
///
/// the head of every run of equal keys is kept. The slice must be sorted by key.
pub(crate) fn dedup_by_key<T, K, F>(d: &mut [T], key: F) -> usize
where
    K: Eq + ?Sized,
    F: Fn(&T) -> &K,
{
    if !d.is_empty() {
        let mut j = 0;
        for i in 1..d.len() {
            if key(&d[i]) != key(&d[j]) {
                j += 1;
                if i != j {
                    d.swap(i, j);
                }
            }
        }
        j + 1
    } else {
        0
    }
}

/// For every run of equal keys, swap the last element of the run into the first slot.
///
/// Walks from the end of the slice backwards. A run that extends to index 0 is swapped as well.
pub(crate) fn promote_last<T, K, F>(d: &mut [T], key: F)
where
    K: Eq + ?Sized,
    F: Fn(&T) -> &K,
{
    let mut end = d.len();
    while end > 0 {
        let last = end - 1;
        let mut first = last;
        while first > 0 && key(&d[first - 1]) == key(&d[last]) {
            first -= 1;
        }
        if first != last {
            d.swap(first, last);
        }
        end = first;
    }
}

/// Collapse every run of equal keys in a key-sorted vector to a single element.
///
/// Returns the number of elements that were dropped.
pub(crate) fn collapse_runs<A, K, F>(data: &mut SmallVec<A>, key: F, keep: Keep) -> usize
where
    A: Array,
    K: Eq + ?Sized,
    F: Fn(&A::Item) -> &K,
{
    let n = data.len();
    if n < 2 {
        return 0;
    }
    if keep == Keep::Last {
        promote_last(data.as_mut_slice(), &key);
    }
    let unique = dedup_by_key(data.as_mut_slice(), &key);
    data.truncate(unique);
    n - unique
}
