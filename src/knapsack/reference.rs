//! Plain knapsack DP, used as the correctness oracle for [ObliviousSolver](super::ObliviousSolver).
//!
//! Never run this on secret inputs: it branches on every weight and value.

use super::KnapsackSolver;
use crate::error::{check_dimensions, AllocError};
use crate::Capacity;
use num_traits::{PrimInt, Unsigned, WrappingAdd};
use std::marker::PhantomData;
use tracing::debug;

/// Textbook bottom-up solver over unsigned primitive integers.
///
/// Sums wrap modulo $`2^{bits}`$, the same ring [ClearEngine](crate::oblivious::ClearEngine) computes in
/// for `u64`, so both solvers agree even on overflowing inputs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReferenceSolver<V>(PhantomData<V>);

/// Optimal value together with the items achieving it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selection<V> {
    /// Total value of the chosen items.
    pub value: V,
    /// Indices of the chosen items, in input order.
    pub items: Vec<usize>,
}

impl<V: PrimInt + Unsigned + WrappingAdd> ReferenceSolver<V> {
    /// Create a solver.
    pub fn new() -> Self {
        Self(PhantomData)
    }

    /// Maximum total value packable into `capacity`, using a single row of $`C + 1`$ values.
    pub fn solve(&self, weights: &[V], values: &[V], capacity: Capacity) -> Result<V, AllocError> {
        check_dimensions(weights, values)?;

        debug!(items = weights.len(), capacity, "reference knapsack");

        let mut best = vec![V::zero(); capacity + 1];

        for (w, v) in weights.iter().zip(values.iter()) {
            let Some(w) = fitting_weight(*w, capacity) else {
                continue;
            };

            for j in (w..=capacity).rev() {
                let candidate = best[j - w].wrapping_add(v);
                if candidate > best[j] {
                    best[j] = candidate;
                }
            }
        }

        Ok(best[capacity])
    }

    /// Same as [ReferenceSolver::solve], but keeps the whole $`(N + 1) \times (C + 1)`$ table
    /// to recover which items were packed.
    pub fn solve_with_selection(
        &self,
        weights: &[V],
        values: &[V],
        capacity: Capacity,
    ) -> Result<Selection<V>, AllocError> {
        check_dimensions(weights, values)?;

        let n = weights.len();
        let mut table = vec![vec![V::zero(); capacity + 1]; n + 1];

        for i in 1..=n {
            let w = fitting_weight(weights[i - 1], capacity);
            let v = values[i - 1];

            for j in 0..=capacity {
                let skip = table[i - 1][j];
                table[i][j] = match w {
                    Some(w) if j >= w => skip.max(table[i - 1][j - w].wrapping_add(&v)),
                    _ => skip,
                };
            }
        }

        let mut items = Vec::new();
        let mut j = capacity;
        for i in (1..=n).rev() {
            if table[i][j] != table[i - 1][j] {
                items.push(i - 1);
                // a row only differs from the previous one where the item fits
                j -= fitting_weight(weights[i - 1], capacity).unwrap_or(0);
            }
        }
        items.reverse();

        Ok(Selection {
            value: table[n][capacity],
            items,
        })
    }
}

fn fitting_weight<V: PrimInt>(w: V, capacity: Capacity) -> Option<usize> {
    w.to_usize().filter(|&w| w <= capacity)
}

impl<V: PrimInt + Unsigned + WrappingAdd> KnapsackSolver for ReferenceSolver<V> {
    type Value = V;

    fn solve(&mut self, weights: &[V], values: &[V], capacity: Capacity) -> Result<V, AllocError> {
        ReferenceSolver::solve(self, weights, values, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    // exhaustive search over all subsets
    fn brute_force(weights: &[u64], values: &[u64], capacity: usize) -> u64 {
        let n = weights.len();
        (0u32..(1 << n))
            .filter_map(|mask| {
                let (w, v) = (0..n)
                    .filter(|i| mask & (1 << i) != 0)
                    .fold((0u64, 0u64), |(w, v), i| (w + weights[i], v + values[i]));
                (w <= capacity as u64).then_some(v)
            })
            .max()
            .unwrap_or(0)
    }

    #[test]
    fn test_scenario() {
        let solver = ReferenceSolver::<u64>::new();

        assert_eq!(solver.solve(&[2, 3, 4, 5], &[3, 4, 5, 6], 5).unwrap(), 7);

        let selection = solver
            .solve_with_selection(&[2, 3, 4, 5], &[3, 4, 5, 6], 5)
            .unwrap();
        assert_eq!(
            selection,
            Selection {
                value: 7,
                items: vec![0, 1]
            }
        );
    }

    #[test]
    fn test_against_brute_force() {
        let mut rng = rand::thread_rng();
        let solver = ReferenceSolver::<u64>::new();

        for _ in 0..300 {
            let n = rng.gen_range(0..=10);
            let capacity = rng.gen_range(0..=30);
            let weights = (0..n).map(|_| rng.gen_range(0..=35)).collect::<Vec<u64>>();
            let values = (0..n).map(|_| rng.gen_range(0..=50)).collect::<Vec<u64>>();

            let expected = brute_force(&weights, &values, capacity);
            assert_eq!(solver.solve(&weights, &values, capacity).unwrap(), expected);

            let selection = solver
                .solve_with_selection(&weights, &values, capacity)
                .unwrap();
            assert_eq!(selection.value, expected);

            let total_weight: u64 = selection.items.iter().map(|&i| weights[i]).sum();
            let total_value: u64 = selection.items.iter().map(|&i| values[i]).sum();
            assert!(total_weight <= capacity as u64);
            assert_eq!(total_value, expected);
        }
    }

    #[test]
    fn test_other_widths() {
        let solver = ReferenceSolver::<u8>::new();
        assert_eq!(solver.solve(&[2, 3, 4, 5], &[3, 4, 5, 6], 5).unwrap(), 7);
        // 200 + 200 wraps to 144, so taking both loses to taking one
        assert_eq!(solver.solve(&[1, 1], &[200, 200], 2).unwrap(), 200);
        assert_eq!(solver.solve(&[1, 1], &[100, 100], 2).unwrap(), 200);

        let solver = ReferenceSolver::<u128>::new();
        assert_eq!(
            solver.solve(&[u128::MAX, 1], &[5, 3], 10).unwrap(),
            3
        );
    }

    #[test]
    fn test_err_1() {
        let solver = ReferenceSolver::<u64>::new();

        assert_eq!(
            solver.solve(&[1], &[1, 2], 3),
            Err(AllocError::DimensionMismatch {
                weights: 1,
                values: 2
            })
        );
        assert!(solver.solve_with_selection(&[1], &[], 3).is_err());
    }
}
