#[macro_export]
macro_rules! flatset {
    () => ({
        $crate::FlatSet::default()
    });
    ($($x:expr),*$(,)*) => ({
        let mut set = $crate::FlatSet::default();
        $(set.insert($x);)*
        set
    });
}

#[macro_export]
macro_rules! flatmultiset {
    () => ({
        $crate::FlatMultiSet::default()
    });
    ($($x:expr),*$(,)*) => ({
        let mut set = $crate::FlatMultiSet::default();
        $(set.insert($x);)*
        set
    });
}

#[macro_export]
macro_rules! flatmap {
    ($($key:expr => $value:expr,)+) => { flatmap!($($key => $value),+) };
    ($($key:expr => $value:expr),*) => {
        {
            let mut _map = $crate::FlatMap::default();
            $(
                _map.insert($key, $value);
            )*
            _map
        }
    };
}

#[macro_export]
macro_rules! flatmultimap {
    ($($key:expr => $value:expr,)+) => { flatmultimap!($($key => $value),+) };
    ($($key:expr => $value:expr),*) => {
        {
            let mut _map = $crate::FlatMultiMap::default();
            $(
                _map.insert($key, $value);
            )*
            _map
        }
    };
}
