//! Binary insertion sort. *O*(*n* \* log(*n*)) comparisons, *O*(*n*^2) moves, stable.

use std::cmp::Ordering;

use crate::smallsort::binary_insertion_point;

sort_impl!("sortkit_binary_insertion_stable", 100_000);

try_sort_impl!(binary_insertion_sort);

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

    binary_insertion_sort(v, &mut crate::is_less_from(compare));
}

pub fn binary_insertion_sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    binary_insertion_sort_from(v, 1, is_less);
}

/// Sorts `v` assuming `v[..offset]` is already sorted.
pub fn binary_insertion_sort_from<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    for i in offset.max(1)..v.len() {
        let pos = binary_insertion_point(v, i, is_less);

        // All comparisons are done before anything moves, a panicking `is_less` leaves `v`
        // untouched for this element.
        v[pos..=i].rotate_right(1);
    }
}
