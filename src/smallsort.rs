//! Elementary routines shared by several algorithms.
//!
//! Swapping two elements and reversing a range are `<[T]>::swap` and `<[T]>::reverse`. What
//! lives here is insertion of a single element into a sorted (possibly strided) prefix, plain
//! insertion sort for small ranges and the binary search used by binary insertion sort.

use core::mem::ManuallyDrop;
use core::ptr;

/// Inserts `v[i]` into the sorted chain `v[i - gap], v[i - 2 * gap], ...` so that the chain
/// ending at `i` becomes sorted. With `gap == 1` this is the classic insertion sort step.
///
/// Equal elements are not moved past each other, so for `gap == 1` repeated application is
/// stable.
///
/// # Panics
///
/// Panics if `gap == 0`, `i < gap` or `i >= v.len()`.
#[cfg_attr(feature = "no_inline_sub_functions", inline(never))]
pub fn insert_tail_gapped<T, F>(v: &mut [T], i: usize, gap: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    assert!(gap != 0 && i >= gap && i < v.len());

    let v_base = v.as_mut_ptr();

    // SAFETY: `i` and `i - gap` are in bounds per the assert above. The loop only visits
    // `j - gap` with `j >= gap`, which stays in bounds as well.
    unsafe {
        let v_i = v_base.add(i);

        // Compare in place first. If the element is already in position nothing is moved and no
        // copy of it was seen by `is_less`.
        if !is_less(&*v_i, &*v_i.sub(gap)) {
            return;
        }

        // From here on only the value held by `gap_guard` is compared, it is the one that ends
        // up back in `v`.
        //
        // If `is_less` panics, `gap_guard` gets dropped and writes the value into the slot whose
        // content was already copied elsewhere. So `v` holds every element exactly once.
        let mut gap_guard = GapGuard {
            pos: v_i.sub(gap),
            value: ManuallyDrop::new(ptr::read(v_i)),
        };
        ptr::copy_nonoverlapping(gap_guard.pos, v_i, 1);

        let mut j = i - gap;
        while j >= gap {
            let v_j = v_base.add(j - gap);
            if !is_less(&*gap_guard.value, &*v_j) {
                break;
            }

            ptr::copy_nonoverlapping(v_j, gap_guard.pos, 1);
            gap_guard.pos = v_j;
            j -= gap;
        }
        // `gap_guard` gets dropped and fills the remaining slot.
    }
}

/// Sort `v` assuming `v[..offset]` is already sorted.
///
/// Stable. *O*(*n*^2) worst-case, linear for already sorted input.
pub fn insertion_sort_shift_left<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // This would be a logic bug in other code.
    debug_assert!(offset <= len);

    // A one element prefix is always sorted.
    for i in offset.max(1)..len {
        insert_tail_gapped(v, i, 1, is_less);
    }
}

/// Returns the position at which `v[i]` has to be inserted into the sorted prefix `v[..i]`.
///
/// That is the first position whose element compares greater than `v[i]`, so `v[i]` lands
/// behind all elements equal to it. Uses `ceil(log2(i + 1))` comparisons.
pub fn binary_insertion_point<T, F>(v: &[T], i: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let (prefix, rest) = v.split_at(i);
    let elem = &rest[0];

    let mut lo = 0;
    let mut hi = prefix.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if is_less(elem, &prefix[mid]) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    lo
}

/// When dropped, copies `value` into `pos`.
struct GapGuard<T> {
    pos: *mut T,
    value: ManuallyDrop<T>,
}

impl<T> Drop for GapGuard<T> {
    fn drop(&mut self) {
        // SAFETY: `pos` points to a slot of the slice whose previous content has been copied
        // elsewhere, and `value` was moved out of that slice.
        unsafe {
            ptr::copy_nonoverlapping(&*self.value, self.pos, 1);
        }
    }
}
