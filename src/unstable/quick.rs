//! Quick sort with median-of-three pivots, Hoare partitioning, smaller-side-first recursion and
//! a heapsort fallback.

use std::cmp::Ordering;

use crate::smallsort::insertion_sort_shift_left;
use crate::unstable::heap::heapsort;

sort_impl!("sortkit_quick_unstable");

try_sort_impl!(quicksort);

/// Slices up to this length are insertion sorted.
pub const SMALL_SORT_THRESHOLD: usize = 16;

/// From this length on the pivot is a recursive median-of-three over sampled positions.
const PSEUDO_MEDIAN_REC_THRESHOLD: usize = 64;

#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    sort_by(v, T::cmp);
}

#[inline]
pub fn sort_by<T, F>(v: &mut [T], compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    // Sorting has no meaningful behavior on zero-sized types.
    if std::mem::size_of::<T>() == 0 {
        return;
    }

    quicksort(v, &mut crate::is_less_from(compare));
}

/// Sorts `v` in place. *O*(*n* \* log(*n*)) worst-case, stack depth *O*(log(*n*)).
pub fn quicksort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    // Limit the number of partition rounds to `2 * floor(log2(len))`.
    // The binary OR by one is used to eliminate the zero-check in the logarithm.
    let limit = 2 * (len | 1).ilog2();

    recurse(v, is_less, None, limit);
}

/// Sorts `v` recursively.
///
/// If the slice had a predecessor in the original array, it is specified as `ancestor_pivot`.
///
/// `limit` is the number of allowed partition rounds before switching to `heapsort`. If zero,
/// this function will immediately switch to heapsort.
fn recurse<'a, T, F>(
    mut v: &'a mut [T],
    is_less: &mut F,
    mut ancestor_pivot: Option<&'a T>,
    mut limit: u32,
) where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        if v.len() <= SMALL_SORT_THRESHOLD {
            if v.len() >= 2 {
                insertion_sort_shift_left(v, 1, is_less);
            }
            return;
        }

        // If too many bad pivot choices were made, simply fall back to heapsort in order to
        // guarantee `O(n * log(n))` worst-case.
        if limit == 0 {
            tracing::debug!(len = v.len(), "quick sort falls back to heapsort");
            heapsort(v, is_less);
            return;
        }

        limit -= 1;

        let pivot_pos = choose_pivot(v, is_less);

        // If the chosen pivot is equal to the predecessor, then it's the smallest element in the
        // slice. Partition the slice into elements equal to and elements greater than the pivot.
        // This case is usually hit when the slice contains many duplicate elements.
        if let Some(p) = ancestor_pivot {
            if !is_less(p, &v[pivot_pos]) {
                let mid = partition(v, pivot_pos, &mut |a, b| !is_less(b, a));

                // `v[..=mid]` is equal to the pivot and in its final position.
                v = &mut v[(mid + 1)..];
                ancestor_pivot = None;
                continue;
            }
        }

        let mid = partition(v, pivot_pos, is_less);

        // Split the slice into `left`, `pivot`, and `right`.
        let (left, right) = v.split_at_mut(mid);
        let (pivot, right) = right.split_at_mut(1);
        let pivot = &pivot[0];

        // Recurse into the shorter side and continue with the longer one, this bounds the stack
        // depth to `log2(len)` frames.
        if left.len() < right.len() {
            recurse(left, is_less, ancestor_pivot, limit);
            v = right;
            ancestor_pivot = Some(pivot);
        } else {
            recurse(right, is_less, Some(pivot), limit);
            v = left;
        }
    }
}

/// Selects a pivot position in `v`.
///
/// Short slices use the median of the first, middle and last element. Longer slices take the
/// median of three samples recursively, which approximates the median of `n^0.63` elements.
fn choose_pivot<T, F>(v: &[T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    debug_assert!(len > SMALL_SORT_THRESHOLD);

    if len < PSEUDO_MEDIAN_REC_THRESHOLD {
        return median3(v, 0, len / 2, len - 1, is_less);
    }

    let len_div_8 = len / 8;
    let a = 0;
    let b = len_div_8 * 4;
    let c = len_div_8 * 7;

    median3_rec(v, a, b, c, len_div_8, is_less)
}

/// Calculates an approximate median of 3 positions by recursively taking the median of three
/// samples spread over `n` elements following each position.
fn median3_rec<T, F>(
    v: &[T],
    mut a: usize,
    mut b: usize,
    mut c: usize,
    n: usize,
    is_less: &mut F,
) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    if n * 8 >= PSEUDO_MEDIAN_REC_THRESHOLD {
        let n8 = n / 8;
        a = median3_rec(v, a, a + n8 * 4, a + n8 * 7, n8, is_less);
        b = median3_rec(v, b, b + n8 * 4, b + n8 * 7, n8, is_less);
        c = median3_rec(v, c, c + n8 * 4, c + n8 * 7, n8, is_less);
    }

    median3(v, a, b, c, is_less)
}

/// Returns the position of the median of `v[a]`, `v[b]` and `v[c]`.
fn median3<T, F>(v: &[T], a: usize, b: usize, c: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    // Compiler tends to make this branchless when sensible, and avoids the third comparison
    // when not needed.
    let x = is_less(&v[a], &v[b]);
    let y = is_less(&v[a], &v[c]);
    if x == y {
        // If x=y=0 then b, c <= a. In this case we want to return max(b, c).
        // If x=y=1 then a < b, c. In this case we want to return min(b, c).
        // By toggling the outcome of b < c using XOR x we get this behavior.
        let z = is_less(&v[b], &v[c]);
        if z ^ x {
            c
        } else {
            b
        }
    } else {
        // Either c <= a < b or b <= a < c, thus a is our median.
        a
    }
}

/// Takes the input slice `v` and re-arranges elements such that all elements that compare true
/// for `is_less(elem, pivot)` where `pivot == v[pivot_pos]` are on the left side of `v`,
/// followed by the pivot, followed by the other elements.
///
/// Returns the final position of the pivot.
///
/// If `is_less` does not implement a total order the resulting order is unspecified, but all
/// original elements remain in `v`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn partition<T, F>(v: &mut [T], pivot_pos: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    // Place the pivot at the beginning of slice.
    v.swap(0, pivot_pos);
    let (pivot, v_without_pivot) = v.split_at_mut(1);
    let pivot = &pivot[0];

    let num_lt = hoare_partition(v_without_pivot, pivot, is_less);

    // Place the pivot between the two partitions.
    v.swap(0, num_lt);

    num_lt
}

/// Hoare's scheme: scans from both ends and swaps out-of-place pairs. Returns the number of
/// elements less than `pivot`.
fn hoare_partition<T, F>(v: &mut [T], pivot: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut l = 0;
    let mut r = v.len();
    loop {
        // Find the first element greater than or equal to the pivot.
        while l < r && is_less(&v[l], pivot) {
            l += 1;
        }

        // Find the last element less than the pivot.
        while l < r && !is_less(&v[r - 1], pivot) {
            r -= 1;
        }

        if l >= r {
            break;
        }

        // Swap the found pair of out-of-order elements.
        r -= 1;
        v.swap(l, r);
        l += 1;
    }

    l
}
