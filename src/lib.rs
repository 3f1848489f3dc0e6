//! Lazily sorted flat collections backed by a [smallvec::SmallVec].
//!
//! Inserts append to the end of the storage and mark the collection as unsorted. The first
//! query after that sorts the storage with a stable sort, so elements with equal keys stay in
//! insertion order. [FlatMap] and [FlatSet] then collapse every run of equal keys to a single
//! element, by default the one that was inserted last. [FlatMultiMap] and [FlatMultiSet] keep
//! all of them.
//!
//! Positions returned by queries are indices into the sorted storage. They stay valid until the
//! next insert.
#[cfg(test)]
extern crate quickcheck;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

#[cfg(test)]
#[macro_use]
mod test_macros;

#[macro_use]
mod macros;

mod dedup;
mod shape;
mod sorted_vec;

mod iterators;

mod flat_map;
mod flat_multimap;

mod flat_multiset;
mod flat_set;

pub use dedup::Keep;
pub use flat_map::*;
pub use flat_multimap::*;
pub use flat_multiset::*;
pub use flat_set::*;
pub use iterators::*;
pub use smallvec::CollectionAllocErr;
