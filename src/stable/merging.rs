//! Building blocks shared by merge sort and tim sort: the stable merge of two adjacent runs,
//! the merge buffer, and streak detection.

use std::ptr;

use crate::SortError;

/// Allocates an empty buffer able to hold `len` elements, without aborting on failure.
pub(crate) fn try_alloc_buf<T>(len: usize) -> Result<Vec<T>, SortError> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(len).is_err() {
        tracing::warn!(len, "failed to allocate merge buffer");
        return Err(SortError::AllocationFailed { requested: len });
    }

    Ok(buf)
}

/// Finds a streak of presorted elements starting at the beginning of the slice. Returns the first
/// value that is not part of said streak, and a bool denoting wether the streak was reversed.
/// Streaks can be non-descending or strictly descending, so reversing one keeps equal elements
/// in order.
pub(crate) fn find_streak<T, F>(v: &[T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    if is_less(&v[1], &v[0]) {
        while end < len && is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, true)
    } else {
        while end < len && !is_less(&v[end], &v[end - 1]) {
            end += 1;
        }

        (end, false)
    }
}

/// Merges non-decreasing runs `v[..mid]` and `v[mid..]` using `buf` as temporary storage, and
/// stores the result into `v[..]`. On ties the element of the left run goes first.
///
/// `buf` must be empty and have capacity for the shorter run. It is left empty.
///
/// # Panics
///
/// Panics if `mid` is not strictly inside `v` or `buf` is too small.
#[inline(never)]
pub(crate) fn merge<T, F>(v: &mut [T], mid: usize, buf: &mut Vec<T>, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();
    assert!(mid > 0 && mid < len);
    assert!(buf.is_empty() && buf.capacity() >= mid.min(len - mid));
    // Pointer arithmetic below would be meaningless for zero-sized types, and the callers
    // filter them out.
    debug_assert!(std::mem::size_of::<T>() != 0);

    let buf = buf.as_mut_ptr();
    let arr_ptr = v.as_mut_ptr();

    // The merge process first copies the shorter run into `buf`. Then it traces the newly copied
    // run and the longer run forwards (or backwards), comparing their next unconsumed elements and
    // copying the lesser (or greater) one into `v`.
    //
    // As soon as the shorter run is fully consumed, the process is done. If the longer run gets
    // consumed first, then we must copy whatever is left of the shorter run into the remaining
    // hole in `v`.
    //
    // Intermediate state of the process is always tracked by `hole`, which serves two purposes:
    // 1. Protects integrity of `v` from panics in `is_less`.
    // 2. Fills the remaining hole in `v` if the longer run gets consumed first.
    //
    // SAFETY: `mid` is in bounds per the assert above and `buf` has room for the shorter run. All
    // pointers stay within `v` or the copied part of `buf`.
    unsafe {
        let (v_mid, v_end) = (arr_ptr.add(mid), arr_ptr.add(len));
        let mut hole;

        if mid <= len - mid {
            // The left run is shorter.
            ptr::copy_nonoverlapping(arr_ptr, buf, mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(mid),
                dest: arr_ptr,
            };

            // Initially, these pointers point to the beginnings of their arrays.
            let left = &mut hole.start;
            let mut right = v_mid;
            let out = &mut hole.dest;

            while *left < hole.end && right < v_end {
                // Consume the lesser side.
                // If equal, prefer the left run to maintain stability.
                if is_less(&*right, &**left) {
                    ptr::copy_nonoverlapping(right, *out, 1);
                    right = right.add(1);
                } else {
                    ptr::copy_nonoverlapping(*left, *out, 1);
                    *left = left.add(1);
                }
                *out = out.add(1);
            }
        } else {
            // The right run is shorter.
            ptr::copy_nonoverlapping(v_mid, buf, len - mid);
            hole = MergeHole {
                start: buf,
                end: buf.add(len - mid),
                dest: v_mid,
            };

            // Initially, these pointers point past the ends of their arrays.
            let left = &mut hole.dest;
            let right = &mut hole.end;
            let mut out = v_end;

            while arr_ptr < *left && buf < *right {
                // Consume the greater side.
                // If equal, prefer the right run to maintain stability.
                out = out.sub(1);
                if is_less(&*right.sub(1), &*left.sub(1)) {
                    *left = left.sub(1);
                    ptr::copy_nonoverlapping(*left, out, 1);
                } else {
                    *right = right.sub(1);
                    ptr::copy_nonoverlapping(*right, out, 1);
                }
            }
        }
        // Finally, `hole` gets dropped. If the shorter run was not fully consumed, whatever
        // remains of it will now be copied into the hole in `v`.
    }

    // When dropped, copies the range `start..end` into `dest..`.
    struct MergeHole<T> {
        start: *mut T,
        end: *mut T,
        dest: *mut T,
    }

    impl<T> Drop for MergeHole<T> {
        fn drop(&mut self) {
            // SAFETY: `T` is not a zero-sized type, and these are pointers into a slice's
            // elements or the initialized part of the buffer.
            unsafe {
                let len = self.end.offset_from(self.start) as usize;
                ptr::copy_nonoverlapping(self.start, self.dest, len);
            }
        }
    }
}
