use std::cmp::Ordering;

/// Common interface of every sort in this crate. Used by the experiment harness, the benchmarks
/// and the shared test suite to treat the algorithms interchangeably.
pub trait Sort {
    fn name() -> String;

    fn sort<T>(arr: &mut [T]) -> Result<(), SortError>
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F) -> Result<(), SortError>
    where
        F: FnMut(&T, &T) -> Ordering;
}

// In-place sorts can't fail, sorts that need scratch memory report allocation failure.
macro_rules! sort_impl {
    ($name:expr) => {
        pub struct SortImpl;

        impl $crate::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T]) -> Result<(), $crate::SortError>
            where
                T: Ord,
            {
                sort(arr);
                Ok(())
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F) -> Result<(), $crate::SortError>
            where
                F: FnMut(&T, &T) -> std::cmp::Ordering,
            {
                sort_by(arr, compare);
                Ok(())
            }
        }
    };
    ($name:expr, scratch) => {
        pub struct SortImpl;

        impl $crate::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            #[inline]
            fn sort<T>(arr: &mut [T]) -> Result<(), $crate::SortError>
            where
                T: Ord,
            {
                sort(arr)
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F) -> Result<(), $crate::SortError>
            where
                F: FnMut(&T, &T) -> std::cmp::Ordering,
            {
                sort_by(arr, compare)
            }
        }
    };
}

mod algorithm;
mod error;
mod primitives;

pub mod experiment;
pub mod patterns;
pub mod stable;
pub mod unstable;

pub use algorithm::{sort_len, Algorithm, ParseAlgorithmError};
pub use error::SortError;
