//! Top-down merge sort. *O*(*n* \* log(*n*)), one buffer of `n / 2` elements, stable.

use std::cmp::Ordering;

use crate::error::CompareLatch;
use crate::smallsort::insertion_sort_shift_left;
use crate::stable::merging::{merge, try_alloc_buf};
use crate::SortError;

sort_impl!("sortkit_merge_stable");

/// Slices up to this length are insertion sorted instead of split further.
pub const SMALL_SORT_THRESHOLD: usize = 16;

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by(v, T::cmp);
}

/// Sorts `v` with `compare`.
///
/// # Panics
///
/// Panics if the merge buffer cannot be allocated, like `Vec::with_capacity` does. Use
/// [`try_sort_by`] to handle that case.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if std::mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    let mut buf = Vec::with_capacity(v.len() / 2);
    merge_sort(v, &mut buf, &mut crate::is_less_from(compare));
}

/// Sorts `v` with a fallible comparator.
///
/// Fails with [`SortError::AllocationFailed`] before touching `v` if the merge buffer cannot be
/// allocated. A comparator error is latched and returned after the sort finished, `v` then holds
/// a permutation of its original elements.
pub fn try_sort_by<T, F, E>(v: &mut [T], compare: F) -> Result<(), SortError<E>>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if std::mem::size_of::<T>() == 0 || v.len() < 2 {
        return Ok(());
    }

    let mut buf = try_alloc_buf(v.len() / 2).map_err(SortError::widen)?;

    let mut latch = CompareLatch::new(compare);
    merge_sort(v, &mut buf, &mut |a: &T, b: &T| latch.is_less(a, b));
    latch.finish()
}

/// Sorts `v` using `buf` for merging. `buf` must be empty with capacity for `v.len() / 2`
/// elements.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn merge_sort<T, F>(v: &mut [T], buf: &mut Vec<T>, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len <= SMALL_SORT_THRESHOLD {
        if len >= 2 {
            insertion_sort_shift_left(v, 1, is_less);
        }
        return;
    }

    let mid = len / 2;
    {
        let (left, right) = v.split_at_mut(mid);
        merge_sort(left, buf, is_less);
        merge_sort(right, buf, is_less);
    }

    // Halves that are already in order need no merge.
    if is_less(&v[mid], &v[mid - 1]) {
        merge(v, mid, buf, is_less);
    }
}
