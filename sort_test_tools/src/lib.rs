/// Common surface of every sort implementation under test or benchmark.
pub trait Sort {
    fn name() -> String;

    /// Largest input length the shared test battery feeds to this implementation.
    ///
    /// Quadratic algorithms override this to keep debug-mode test runs tractable.
    fn max_len() -> usize {
        usize::MAX
    }

    fn sort<T>(arr: &mut [T])
    where
        T: Ord;

    fn sort_by<T, F>(arr: &mut [T], compare: F)
    where
        F: FnMut(&T, &T) -> std::cmp::Ordering;
}

pub mod patterns;
