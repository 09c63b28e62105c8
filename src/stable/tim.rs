//! Tim sort without galloping mode.
//!
//! Runs are detected left to right, short runs are extended to `min_run` with binary insertion
//! sort, and the run stack is kept balanced by merging adjacent runs. Merging is the plain
//! stable merge shared with merge sort; galloping would reduce comparisons when runs interleave
//! in long blocks, but doesn't change the asymptotic bounds.

use std::cmp::{self, Ordering};

use crate::error::CompareLatch;
use crate::stable::binary_insertion::binary_insertion_sort_from;
use crate::stable::merging::{find_streak, merge, try_alloc_buf};
use crate::SortError;

sort_impl!("sortkit_tim_stable");

/// Capacity reserved for the run stack. The balance invariants bound its height by
/// `log_phi(len / 32) + 3`, which stays below this for any `usize` length.
const RUN_STACK_CAPACITY: usize = 128;

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
/// Panics if the merge buffer cannot be allocated. Use [`try_sort_by`] to handle that case.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if std::mem::size_of::<T>() == 0 || v.len() < 2 {
        return;
    }

    let mut buf = Vec::with_capacity(v.len() / 2);
    let mut runs = Vec::with_capacity(RUN_STACK_CAPACITY);
    tim_sort(v, &mut buf, &mut runs, &mut crate::is_less_from(compare));
}

/// Sorts `v` with a fallible comparator.
///
/// Fails with [`SortError::AllocationFailed`] before touching `v` if the merge buffer or the run
/// stack cannot be allocated. A comparator error is latched and returned after the sort
/// finished, `v` then holds a permutation of its original elements.
pub fn try_sort_by<T, F, E>(v: &mut [T], compare: F) -> Result<(), SortError<E>>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    if std::mem::size_of::<T>() == 0 || v.len() < 2 {
        return Ok(());
    }

    let mut buf = try_alloc_buf(v.len() / 2).map_err(SortError::widen)?;
    let mut runs = try_alloc_buf(RUN_STACK_CAPACITY).map_err(SortError::widen)?;

    let mut latch = CompareLatch::new(compare);
    tim_sort(v, &mut buf, &mut runs, &mut |a: &T, b: &T| latch.is_less(a, b));
    latch.finish()
}

/// Returns the minimum run length for an input of `len` elements.
///
/// Inputs shorter than 64 elements form a single run. Otherwise the result lies in `32..=64`
/// and is chosen so that `len / min_run` is close to, but not above, a power of two, which
/// keeps the final merges balanced.
pub fn min_run(len: usize) -> usize {
    let mut n = len;
    let mut r = 0;
    while n >= 64 {
        r |= n & 1;
        n >>= 1;
    }

    n + r
}

/// A run on the merge stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimSortRun {
    pub start: usize,
    pub len: usize,
}

/// Sorts `v` using `buf` for merging and `runs` as the pending-merge stack. `buf` must be empty
/// with capacity for `v.len() / 2` elements.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn tim_sort<T, F>(
    v: &mut [T],
    buf: &mut Vec<T>,
    runs: &mut Vec<TimSortRun>,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    let min_run = min_run(len);
    runs.clear();

    let mut start = 0;
    while start < len {
        let (streak_len, was_reversed) = find_streak(&v[start..], is_less);
        let mut end = start + streak_len;
        if was_reversed {
            v[start..end].reverse();
        }

        // Extend short runs with binary insertion sort.
        let forced_end = cmp::min(start + min_run, len);
        if end < forced_end {
            binary_insertion_sort_from(&mut v[start..forced_end], end - start, is_less);
            end = forced_end;
        }

        runs.push(TimSortRun {
            start,
            len: end - start,
        });
        start = end;

        // Merge some pairs of adjacent runs to satisfy the invariants.
        while let Some(r) = collapse(runs.as_slice(), len) {
            let left = runs[r];
            let right = runs[r + 1];
            merge(
                &mut v[left.start..right.start + right.len],
                left.len,
                buf,
                is_less,
            );
            runs[r + 1] = TimSortRun {
                start: left.start,
                len: left.len + right.len,
            };
            runs.remove(r);
        }
    }

    // Finally, exactly one run must remain in the stack.
    debug_assert!(runs.len() == 1 && runs[0].start == 0 && runs[0].len == len);
}

/// Examines the stack of runs and identifies the next pair of runs to merge. More specifically,
/// if `Some(r)` is returned, that means `runs[r]` and `runs[r + 1]` must be merged next. If the
/// algorithm should continue building a new run instead, `None` is returned.
///
/// The invariants are enforced on the top four runs, checking only the top three is not
/// sufficient for them to hold on the whole stack. Once the top run ends at `stop` every call
/// demands a merge until the stack is collapsed.
fn collapse(runs: &[TimSortRun], stop: usize) -> Option<usize> {
    let n = runs.len();
    if n >= 2
        && (runs[n - 1].start + runs[n - 1].len == stop
            || runs[n - 2].len <= runs[n - 1].len
            || (n >= 3 && runs[n - 3].len <= runs[n - 2].len + runs[n - 1].len)
            || (n >= 4 && runs[n - 4].len <= runs[n - 3].len + runs[n - 2].len))
    {
        if n >= 3 && runs[n - 3].len < runs[n - 1].len {
            Some(n - 3)
        } else {
            Some(n - 2)
        }
    } else {
        None
    }
}
