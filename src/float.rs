//! Sorting `f64` values, and the column-vector entry point for host environments.
//!
//! `f64` is not `Ord`, and raw `<`/`==` leave the position of NaN unspecified. This module
//! fixes one total preorder:
//!
//! * Every NaN, whatever its sign or payload, sorts after all other values
//!   ([`NanPlacement::Last`], the default) or before them ([`NanPlacement::First`]).
//! * NaNs compare `Equal` to each other.
//! * All other values compare by IEEE `<` and `==`. In particular `-0.0` and `+0.0` compare
//!   `Equal`, so stable algorithms keep them in input order.

use std::cmp::Ordering;

use crate::{Algorithm, SortError};

/// Where NaN values end up after sorting.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum NanPlacement {
    #[default]
    Last,
    First,
}

/// Compares two `f64` values according to the module's total preorder.
#[inline]
pub fn compare_f64(a: &f64, b: &f64, placement: NanPlacement) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => {
            if a < b {
                Ordering::Less
            } else if a == b {
                Ordering::Equal
            } else {
                Ordering::Greater
            }
        }
        (true, true) => Ordering::Equal,
        (true, false) => match placement {
            NanPlacement::Last => Ordering::Greater,
            NanPlacement::First => Ordering::Less,
        },
        (false, true) => match placement {
            NanPlacement::Last => Ordering::Less,
            NanPlacement::First => Ordering::Greater,
        },
    }
}

/// [`compare_f64`] with NaNs last.
#[inline]
pub fn total_order(a: &f64, b: &f64) -> Ordering {
    compare_f64(a, b, NanPlacement::Last)
}

/// Sorts `v` in place with NaNs last.
pub fn sort_f64(v: &mut [f64], algorithm: Algorithm) {
    sort_f64_with(v, algorithm, NanPlacement::default());
}

pub fn sort_f64_with(v: &mut [f64], algorithm: Algorithm, placement: NanPlacement) {
    algorithm.sort_by(v, |a, b| compare_f64(a, b, placement));
}

/// Returns a sorted copy of a `rows x cols` matrix that must be a column vector.
///
/// This is the shape of a host-runtime gateway: the input is validated, copied into a freshly
/// allocated output and only the copy is sorted. `data` is never modified.
pub fn sorted_column(
    data: &[f64],
    rows: usize,
    cols: usize,
    algorithm: Algorithm,
) -> Result<Vec<f64>, SortError> {
    if cols != 1 {
        return Err(SortError::NotColumnVector { cols });
    }

    if rows.checked_mul(cols) != Some(data.len()) {
        return Err(SortError::ShapeMismatch {
            len: data.len(),
            rows,
            cols,
        });
    }

    tracing::trace!(rows, %algorithm, "sorting column vector");

    let mut out = Vec::new();
    if out.try_reserve_exact(rows).is_err() {
        tracing::warn!(rows, "failed to allocate output column");
        return Err(SortError::AllocationFailed { requested: rows });
    }
    out.extend_from_slice(data);

    sort_f64(&mut out, algorithm);

    Ok(out)
}
