//! Sorts that may reorder elements comparing equal.

pub mod heap;
pub mod quick;
pub mod selection;
pub mod shell;
