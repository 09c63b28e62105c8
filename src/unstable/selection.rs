//! Selection sort. *O*(*n*^2) comparisons, at most `n - 1` swaps. Kept as a correctness
//! baseline.

use std::cmp::Ordering;

sort_impl!("sortkit_selection_unstable", 5_000);

try_sort_impl!(selection_sort);

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
    if std::mem::size_of::<T>() == 0 {
        return;
    }

    selection_sort(v, &mut crate::is_less_from(compare));
}

pub fn selection_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    for i in 0..len.saturating_sub(1) {
        // First minimum wins.
        let mut min = i;
        for j in (i + 1)..len {
            if is_less(&v[j], &v[min]) {
                min = j;
            }
        }

        v.swap(i, min);
    }
}
