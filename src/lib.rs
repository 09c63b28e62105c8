//! SortKit, a small family of classical comparison sorts over `&mut [T]`.
//!
//! Every algorithm lives in its own module under [`stable`] or [`unstable`] and exposes the same
//! surface: `sort`, `sort_by`, `try_sort_by` and a `SortImpl` type implementing
//! [`sort_test_tools::Sort`]. [`Algorithm`] selects one at runtime, [`float`] adapts `f64`
//! slices with a documented NaN placement.

use core::cmp::Ordering;

macro_rules! sort_impl {
    ($name:expr) => {
        sort_impl!($name, usize::MAX);
    };
    ($name:expr, $max_len:expr) => {
        pub struct SortImpl;

        impl sort_test_tools::Sort for SortImpl {
            fn name() -> String {
                $name.into()
            }

            fn max_len() -> usize {
                $max_len
            }

            #[inline]
            fn sort<T>(arr: &mut [T])
            where
                T: Ord,
            {
                sort(arr);
            }

            #[inline]
            fn sort_by<T, F>(arr: &mut [T], compare: F)
            where
                F: FnMut(&T, &T) -> core::cmp::Ordering,
            {
                sort_by(arr, compare);
            }
        }
    };
}

/// Generates the `try_sort_by` entry point for an algorithm whose core takes an `is_less`
/// predicate and never allocates.
macro_rules! try_sort_impl {
    ($core:path) => {
        /// Sorts `v` with a fallible comparator.
        ///
        /// The first `Err` returned by `compare` is latched and returned once the sort has
        /// finished. `compare` is not called again after it failed, and `v` holds a permutation
        /// of its original elements in unspecified order.
        pub fn try_sort_by<T, F, E>(v: &mut [T], compare: F) -> Result<(), $crate::SortError<E>>
        where
            F: FnMut(&T, &T) -> Result<core::cmp::Ordering, E>,
        {
            if core::mem::size_of::<T>() == 0 {
                return Ok(());
            }

            let mut latch = $crate::error::CompareLatch::new(compare);
            $core(v, &mut |a: &T, b: &T| latch.is_less(a, b));
            latch.finish()
        }
    };
}

pub mod algorithm;
pub mod error;
pub mod float;
pub mod smallsort;
pub mod stable;
pub mod unstable;

pub use algorithm::Algorithm;
pub use error::SortError;

/// Turns a three-way comparator into the `is_less` predicate every core routine is written
/// against.
#[inline(always)]
pub(crate) fn is_less_from<T, F>(mut compare: F) -> impl FnMut(&T, &T) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    move |a, b| compare(a, b) == Ordering::Less
}
