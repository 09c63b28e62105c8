//! Shell sort, insertion sort over a decreasing sequence of strides.

use std::cmp::Ordering;

use crate::smallsort::insert_tail_gapped;

sort_impl!("sortkit_shell_unstable");

try_sort_impl!(shell_sort_default);

/// Gap sequences understood by [`sort_by_gaps`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Gaps {
    /// Marcin Ciura's empirically derived sequence, extended by a factor of 2.25 beyond 1750.
    #[default]
    Ciura,
    /// Shell's original `n/2, n/4, ..., 1`. *O*(*n*^2) worst-case.
    Halving,
}

/// Ciura's gaps. Larger gaps are derived with `gap * 9 / 4`.
const CIURA_GAPS: [usize; 9] = [1, 4, 10, 23, 57, 132, 301, 701, 1750];

/// Upper bound for the number of gaps used for any `usize` length.
const MAX_GAPS: usize = 64;

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
    sort_by_gaps(v, Gaps::default(), compare);
}

/// Sorts `v` with an explicit gap sequence.
pub fn sort_by_gaps<T, F>(v: &mut [T], gaps: Gaps, compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    if std::mem::size_of::<T>() == 0 {
        return;
    }

    shell_sort(v, gaps, &mut crate::is_less_from(compare));
}

fn shell_sort_default<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    shell_sort(v, Gaps::default(), is_less);
}

/// Sorts `v` in place, O(1) extra space.
pub fn shell_sort<T, F>(v: &mut [T], gaps: Gaps, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    if len < 2 {
        return;
    }

    match gaps {
        Gaps::Ciura => {
            let (table, count) = ciura_gaps(len);
            for &gap in table[..count].iter().rev() {
                gapped_insertion_pass(v, gap, is_less);
            }
        }
        Gaps::Halving => {
            let mut gap = len / 2;
            while gap > 0 {
                gapped_insertion_pass(v, gap, is_less);
                gap /= 2;
            }
        }
    }
}

/// Returns the ascending Ciura gaps smaller than `len` and how many there are. Always contains 1
/// for `len >= 2`.
pub fn ciura_gaps(len: usize) -> ([usize; MAX_GAPS], usize) {
    let mut table = [0; MAX_GAPS];
    let mut count = 0;

    for &gap in CIURA_GAPS.iter().take_while(|&&gap| gap < len) {
        table[count] = gap;
        count += 1;
    }

    if count == CIURA_GAPS.len() {
        let mut gap = CIURA_GAPS[CIURA_GAPS.len() - 1];
        while let Some(next) = gap.checked_mul(9).map(|g| g / 4) {
            if next >= len || count == MAX_GAPS {
                break;
            }
            table[count] = next;
            count += 1;
            gap = next;
        }
    }

    (table, count)
}

/// Insertion sorts each of the `gap` interleaved chains of `v`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
fn gapped_insertion_pass<T, F>(v: &mut [T], gap: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in gap..v.len() {
        insert_tail_gapped(v, i, gap, is_less);
    }
}
