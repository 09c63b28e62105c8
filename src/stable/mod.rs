//! Sorts that preserve the relative order of elements comparing equal.

pub mod binary_insertion;
pub mod merge;
pub mod tim;

mod merging;
