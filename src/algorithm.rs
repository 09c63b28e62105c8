//! Runtime selection of a sorting algorithm.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::stable::{binary_insertion, merge, tim};
use crate::unstable::{heap, quick, selection, shell};
use crate::SortError;

/// One of the algorithms provided by this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Shell,
    Selection,
    BinaryInsertion,
    Heap,
    Quick,
    Merge,
    Tim,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Shell,
        Algorithm::Selection,
        Algorithm::BinaryInsertion,
        Algorithm::Heap,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Tim,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Shell => "shell",
            Algorithm::Selection => "selection",
            Algorithm::BinaryInsertion => "binary_insertion",
            Algorithm::Heap => "heap",
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Tim => "tim",
        }
    }

    /// Whether elements comparing equal keep their relative order.
    pub fn is_stable(self) -> bool {
        matches!(
            self,
            Algorithm::BinaryInsertion | Algorithm::Merge | Algorithm::Tim
        )
    }

    pub fn sort<T: Ord>(self, v: &mut [T]) {
        self.sort_by(v, T::cmp);
    }

    pub fn sort_by<T, F>(self, v: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        match self {
            Algorithm::Shell => shell::sort_by(v, compare),
            Algorithm::Selection => selection::sort_by(v, compare),
            Algorithm::BinaryInsertion => binary_insertion::sort_by(v, compare),
            Algorithm::Heap => heap::sort_by(v, compare),
            Algorithm::Quick => quick::sort_by(v, compare),
            Algorithm::Merge => merge::sort_by(v, compare),
            Algorithm::Tim => tim::sort_by(v, compare),
        }
    }

    pub fn try_sort_by<T, F, E>(self, v: &mut [T], compare: F) -> Result<(), SortError<E>>
    where
        F: FnMut(&T, &T) -> Result<Ordering, E>,
    {
        match self {
            Algorithm::Shell => shell::try_sort_by(v, compare),
            Algorithm::Selection => selection::try_sort_by(v, compare),
            Algorithm::BinaryInsertion => binary_insertion::try_sort_by(v, compare),
            Algorithm::Heap => heap::try_sort_by(v, compare),
            Algorithm::Quick => quick::try_sort_by(v, compare),
            Algorithm::Merge => merge::try_sort_by(v, compare),
            Algorithm::Tim => tim::try_sort_by(v, compare),
        }
    }

    /// Sorts the first `len` elements of `v`, leaving the rest untouched.
    ///
    /// This is the `sort(sequence, length)` form where the length travels separately from the
    /// storage. A `len` larger than `v.len()` is rejected before anything is compared.
    pub fn sort_prefix_by<T, F>(self, v: &mut [T], len: usize, compare: F) -> Result<(), SortError>
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        let capacity = v.len();
        let prefix = v
            .get_mut(..len)
            .ok_or(SortError::LengthOutOfBounds { len, capacity })?;
        self.sort_by(prefix, compare);

        Ok(())
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    /// Accepts the names returned by [`Algorithm::name`], case-insensitive, with `-` in place
    /// of `_` and an optional `_sort` suffix, e.g. `"Tim"`, `"binary-insertion"`, `"quick_sort"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        let base = normalized.strip_suffix("_sort").unwrap_or(&normalized);
        let base = base.strip_suffix("sort").unwrap_or(base);

        Algorithm::ALL
            .into_iter()
            .find(|algo| algo.name() == base)
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_owned()))
    }
}
