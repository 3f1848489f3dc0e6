/// checks the dirty/sorted protocol that all flat containers share.
///
/// `$elem` turns a `u8` key into an element. It must be strictly increasing, so that equal
/// keys give equal elements and sorting elements is the same as sorting keys.
macro_rules! lazy_sort_laws {
    ($test:ty, $elem:expr) => {
        #[quickcheck]
        fn sorted_after_query(xs: Vec<u8>, probe: u8) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let dirty = xs.is_empty() || !c.is_sorted();
            c.lower_bound(&probe);
            let sorted = c.as_unsorted_slice().windows(2).all(|w| w[0] <= w[1]);
            dirty && sorted && c.is_sorted()
        }

        #[quickcheck]
        fn idempotent_query(xs: Vec<u8>) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let first = c.as_slice().to_vec();
            c.upper_bound(&0u8);
            first.as_slice() == c.as_unsorted_slice()
        }

        #[quickcheck]
        fn insert_marks_dirty(xs: Vec<u8>, x: u8) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            c.begin();
            let sorted = c.is_sorted();
            c.extend(std::iter::once(make(x)));
            sorted && !c.is_sorted()
        }

        #[quickcheck]
        fn remove_keeps_state(xs: Vec<u8>, x: u8) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            c.end();
            c.remove(&x);
            c.is_sorted() && c.find(&x).is_none()
        }

        #[test]
        fn clear_restores_sorted() {
            let make = $elem;
            let mut c: $test = Default::default();
            assert!(c.is_sorted());
            c.extend(std::iter::once(make(1)));
            assert!(!c.is_sorted());
            c.clear();
            assert!(c.is_sorted());
            assert!(c.is_empty());
        }
    };
}

/// checks properties of the containers that collapse duplicate keys
macro_rules! unique_laws {
    ($test:ty, $elem:expr) => {
        #[quickcheck]
        fn unique_after_sort(xs: Vec<u8>) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let mut distinct = xs.clone();
            distinct.sort();
            distinct.dedup();
            let expected: Vec<_> = distinct.into_iter().map(make).collect();
            c.len() == expected.len() && c.as_slice() == expected.as_slice()
        }

        #[quickcheck]
        fn count_is_presence(xs: Vec<u8>, probe: u8) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let expected = if xs.contains(&probe) { 1 } else { 0 };
            c.count(&probe) == expected && c.equal_range(&probe).len() == expected
        }

        #[quickcheck]
        fn explicit_sort_is_idempotent(xs: Vec<u8>) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            c.sort_with(crate::Keep::First);
            let first = c.as_unsorted_slice().to_vec();
            c.sort_with(crate::Keep::Last);
            first.as_slice() == c.as_unsorted_slice()
        }
    };
}

/// checks properties of the containers that keep duplicate keys
macro_rules! multi_laws {
    ($test:ty, $elem:expr) => {
        #[quickcheck]
        fn len_counts_everything(xs: Vec<u8>) -> bool {
            let make = $elem;
            let c: $test = xs.iter().cloned().map(make).collect();
            c.len() == xs.len() && (xs.is_empty() || !c.is_sorted())
        }

        #[quickcheck]
        fn count_matches_range(xs: Vec<u8>, probe: u8) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let expected = xs.iter().filter(|x| **x == probe).count();
            c.count(&probe) == expected && c.equal_range(&probe).len() == expected
        }

        #[quickcheck]
        fn keeps_all_elements(xs: Vec<u8>) -> bool {
            let make = $elem;
            let mut c: $test = xs.iter().cloned().map(make).collect();
            let mut sorted = xs;
            sorted.sort();
            let expected: Vec<_> = sorted.into_iter().map(make).collect();
            c.as_slice() == expected.as_slice()
        }
    };
}
