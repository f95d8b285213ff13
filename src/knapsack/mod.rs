//! 0/1 knapsack solvers.
//!
//! Given items with weights $`w_i`$ and values $`v_i`$ and a capacity $`C`$,
//! a solver returns the maximum of $`\sum_{i \in S} v_i`$ over subsets $`S`$ with $`\sum_{i \in S} w_i \leq C`$.
//!
//! - [ReferenceSolver] runs the textbook DP with ordinary branching. It is the correctness oracle.
//! - [ObliviousSolver] runs the same recurrence through an [ObliviousOps](crate::oblivious::ObliviousOps) engine
//!   without any branch or memory access that depends on a weight or value.
//!
//! Items heavier than the capacity are never an error. They simply cannot be packed, so they drop out of the result.
//!
//! # Example
//!
//! ```
//! use oblivious_knapsack_auction::knapsack::{ObliviousSolver, ReferenceSolver};
//! use oblivious_knapsack_auction::oblivious::ClearEngine;
//! # fn try_main() -> Result<(), oblivious_knapsack_auction::AllocError> {
//!
//! let weights = vec![2u64, 3, 4, 5];
//! let values = vec![3u64, 4, 5, 6];
//!
//! let mut oblivious = ObliviousSolver::new(ClearEngine::new());
//! let reference = ReferenceSolver::<u64>::new();
//!
//! assert_eq!(oblivious.solve(&weights, &values, 5)?, 7);
//! assert_eq!(reference.solve(&weights, &values, 5)?, 7);
//! # Ok(())
//! # }
//! # fn main() {
//! #     try_main().unwrap();
//! # }
//! ```

use crate::error::AllocError;
use crate::Capacity;

pub mod oblivious;
pub use oblivious::ObliviousSolver;
pub mod reference;
pub use reference::{ReferenceSolver, Selection};
pub mod rotate;
pub use rotate::{rotate, rotate_range};

/// A knapsack item. Owned by the caller, borrowed read-only by the solvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Item<V> {
    /// Capacity consumed when packed.
    pub weight: V,
    /// Value gained when packed.
    pub value: V,
}

impl<V> Item<V> {
    /// Create an item.
    pub fn new(weight: V, value: V) -> Self {
        Self { weight, value }
    }
}

/// Common interface of the knapsack solvers.
pub trait KnapsackSolver {
    /// Representation of weights and values.
    type Value: Clone;

    /// Maximum total value packable into `capacity`.
    ///
    /// Fails with [AllocError::DimensionMismatch] if `weights` and `values` differ in length.
    fn solve(
        &mut self,
        weights: &[Self::Value],
        values: &[Self::Value],
        capacity: Capacity,
    ) -> Result<Self::Value, AllocError>;

    /// Same as [KnapsackSolver::solve], over a slice of [Item]s.
    fn solve_items(
        &mut self,
        items: &[Item<Self::Value>],
        capacity: Capacity,
    ) -> Result<Self::Value, AllocError> {
        let (weights, values): (Vec<_>, Vec<_>) = items
            .iter()
            .map(|item| (item.weight.clone(), item.value.clone()))
            .unzip();

        self.solve(&weights, &values, capacity)
    }
}

/// $`\lceil \log_2 n \rceil`$, with `ceil_log2(0) = ceil_log2(1) = 0`.
pub(crate) fn ceil_log2(n: usize) -> u32 {
    if n <= 1 {
        0
    } else {
        usize::BITS - (n - 1).leading_zeros()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oblivious::ClearEngine;

    #[test]
    fn test_ceil_log2() {
        assert_eq!(ceil_log2(0), 0);
        assert_eq!(ceil_log2(1), 0);
        assert_eq!(ceil_log2(2), 1);
        assert_eq!(ceil_log2(3), 2);
        assert_eq!(ceil_log2(4), 2);
        assert_eq!(ceil_log2(5), 3);
        assert_eq!(ceil_log2(1 << 10), 10);
        assert_eq!(ceil_log2((1 << 10) + 1), 11);
    }

    #[test]
    fn test_solve_items() {
        let items = vec![
            Item::new(2u64, 3u64),
            Item::new(3, 4),
            Item::new(4, 5),
            Item::new(5, 6),
        ];

        let mut oblivious = ObliviousSolver::new(ClearEngine::new());
        let mut reference = ReferenceSolver::<u64>::new();

        assert_eq!(oblivious.solve_items(&items, 5).unwrap(), 7);
        assert_eq!(reference.solve_items(&items, 5).unwrap(), 7);
    }
}
