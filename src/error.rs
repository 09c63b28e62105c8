//! Error type shared by all algorithms, the algorithm selector and the float adapter.
//!
//! Sorting itself cannot fail with an infallible comparator. Errors come from three places:
//!
//! 1. A fallible comparator passed to one of the `try_sort_by` functions returned `Err`.
//! 2. The temporary buffer of merge sort or tim sort, or the output copy of
//!    [`sorted_column`](crate::float::sorted_column), could not be allocated.
//! 3. Caller input at the boundary layer was inconsistent: a length larger than the slice, an
//!    unknown algorithm name, or a non column-vector shape.
//!
//! In every case the caller's slice still holds a permutation of its original elements.

use core::convert::Infallible;
use core::fmt::{self, Debug, Display, Formatter};
use std::error::Error;

/// Error type for SortKit operations.
///
/// `E` is the error type of a fallible comparator. APIs that take no fallible comparator use
/// the default `Infallible`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError<E = Infallible> {
    /// The requested length exceeds the storage of the slice.
    LengthOutOfBounds {
        /// Number of elements that should have been sorted.
        len: usize,
        /// Number of elements actually available.
        capacity: usize,
    },

    /// A temporary buffer of `requested` elements could not be reserved.
    AllocationFailed {
        /// Number of elements requested.
        requested: usize,
    },

    /// The comparator failed. The first failure is reported.
    Comparator(E),

    /// No algorithm is known under this name.
    UnknownAlgorithm(String),

    /// Input is a matrix with more than one column.
    NotColumnVector {
        /// Number of columns of the input.
        cols: usize,
    },

    /// The data length does not match the declared shape.
    ShapeMismatch {
        /// Number of values supplied.
        len: usize,
        /// Declared number of rows.
        rows: usize,
        /// Declared number of columns.
        cols: usize,
    },
}

impl SortError<Infallible> {
    /// Widens an error produced without a comparator into one that can carry comparator errors.
    pub fn widen<E>(self) -> SortError<E> {
        match self {
            Self::LengthOutOfBounds { len, capacity } => {
                SortError::LengthOutOfBounds { len, capacity }
            }
            Self::AllocationFailed { requested } => SortError::AllocationFailed { requested },
            Self::Comparator(never) => match never {},
            Self::UnknownAlgorithm(name) => SortError::UnknownAlgorithm(name),
            Self::NotColumnVector { cols } => SortError::NotColumnVector { cols },
            Self::ShapeMismatch { len, rows, cols } => SortError::ShapeMismatch { len, rows, cols },
        }
    }
}

impl<E: Display> Display for SortError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::LengthOutOfBounds { len, capacity } => {
                write!(f, "Length out of bounds: {len} (slice holds {capacity})")
            }
            Self::AllocationFailed { requested } => {
                write!(f, "Failed to allocate a buffer of {requested} elements")
            }
            Self::Comparator(err) => write!(f, "Comparator failed: {err}"),
            Self::UnknownAlgorithm(name) => write!(f, "Unknown sort algorithm: '{name}'"),
            Self::NotColumnVector { cols } => {
                write!(f, "Input must be a column vector, got {cols} columns")
            }
            Self::ShapeMismatch { len, rows, cols } => {
                write!(f, "Shape mismatch: {len} values for a {rows}x{cols} matrix")
            }
        }
    }
}

impl<E: Debug + Display> Error for SortError<E> {}

/// Adapts a fallible comparator to the `is_less` predicate used by the sort cores.
///
/// After the first `Err` the comparator is never called again and every pair compares as not
/// less, which every algorithm handles as a run of equal elements.
pub(crate) struct CompareLatch<F, E> {
    compare: F,
    error: Option<E>,
}

impl<F, E> CompareLatch<F, E> {
    pub(crate) fn new(compare: F) -> Self {
        Self {
            compare,
            error: None,
        }
    }

    #[inline]
    pub(crate) fn is_less<T>(&mut self, a: &T, b: &T) -> bool
    where
        F: FnMut(&T, &T) -> Result<core::cmp::Ordering, E>,
    {
        if self.error.is_some() {
            return false;
        }

        match (self.compare)(a, b) {
            Ok(ord) => ord == core::cmp::Ordering::Less,
            Err(err) => {
                tracing::debug!("comparator failed, finishing sort without further comparisons");
                self.error = Some(err);
                false
            }
        }
    }

    pub(crate) fn finish(self) -> Result<(), SortError<E>> {
        match self.error {
            Some(err) => Err(SortError::Comparator(err)),
            None => Ok(()),
        }
    }
}
