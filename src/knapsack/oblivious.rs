//! Knapsack DP without secret-dependent branches or indices.
//!
//! The plaintext recurrence
//!
//! ```math
//! M_i[j] = \max(M_{i-1}[j],\ M_{i-1}[j - w_i] + v_i) \quad (j \geq w_i)
//! ```
//!
//! reads `M[i-1][j - w_i]`, an address that depends on the secret weight.
//! Here the previous row is instead rotated left by $`(C + 1 - w_i) \bmod (C + 1)`$ with [rotate_reduced],
//! after which slot $`j`$ holds $`M_{i-1}[j - w_i]`$ and the update is a fixed sweep over every $`j`$.
//! Whether slot $`j`$ takes the candidate is decided by `select`, never by `if`.

use super::rotate::rotate_reduced;
use super::KnapsackSolver;
use crate::error::{check_dimensions, AllocError};
use crate::oblivious::ObliviousOps;
use crate::Capacity;
use tracing::debug;

/// Knapsack solver running over an oblivious engine `E`.
///
/// Memory use is three rows of $`C + 1`$ values: the two parity rows of the table and one scratch row for the rotation.
/// They are allocated once per [ObliviousSolver::solve] call and dropped at its end.
pub struct ObliviousSolver<E: ObliviousOps> {
    engine: E,
}

impl<E: ObliviousOps> ObliviousSolver<E> {
    /// Create a solver on top of `engine`.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// The underlying engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Unwrap the underlying engine.
    pub fn into_engine(self) -> E {
        self.engine
    }

    /// Maximum total value of items packable into `capacity`.
    ///
    /// `capacity` is public: it fixes the table width. Weights and values may be secret.
    /// An item heavier than `capacity` is excluded, exactly as if it had not been given.
    pub fn solve(
        &mut self,
        weights: &[E::Value],
        values: &[E::Value],
        capacity: Capacity,
    ) -> Result<E::Value, AllocError> {
        check_dimensions(weights, values)?;

        debug!(items = weights.len(), capacity, "oblivious knapsack");

        let engine = &mut self.engine;
        let width = capacity + 1;

        let zero = engine.constant(0);
        let capacity_v = engine.constant(capacity as u64);
        let width_v = engine.constant(width as u64);
        let slots = (0..width)
            .map(|j| engine.constant(j as u64))
            .collect::<Vec<_>>();

        let mut table = [vec![zero.clone(); width], vec![zero.clone(); width]];
        let mut carried = vec![zero.clone(); width];
        let mut ret = zero.clone();

        for (i, (w, v)) in weights.iter().zip(values.iter()).enumerate() {
            let [even, odd] = &mut table;
            let (current, previous) = if i % 2 == 0 {
                (even, &*odd)
            } else {
                (odd, &*even)
            };

            current.clone_from_slice(previous);
            carried.clone_from_slice(previous);

            // amount = (C + 1 - w) mod (C + 1); oversized items get 0, they are gated out below
            let fits = engine.cmp_ge(&capacity_v, w);
            let raw = engine.sub(&width_v, w);
            let amount = engine.select(&fits, &raw, &zero);
            let wraps = engine.cmp_ge(&amount, &width_v);
            let wrapped = engine.sub(&amount, &width_v);
            let amount = engine.select(&wraps, &wrapped, &amount);

            rotate_reduced(engine, &mut carried, &amount);

            for (j, slot) in slots.iter().enumerate() {
                let reachable = engine.cmp_ge(slot, w);
                let candidate = engine.add(&carried[j], v);
                let not_better = engine.cmp_ge(&current[j], &candidate);
                let better = engine.not(&not_better);
                let take = engine.and(&reachable, &better);
                current[j] = engine.select(&take, &candidate, &current[j]);
            }

            let last = &current[capacity];
            let improved = engine.cmp_ge(last, &ret);
            ret = engine.select(&improved, last, &ret);
        }

        Ok(ret)
    }
}

impl<E: ObliviousOps> KnapsackSolver for ObliviousSolver<E> {
    type Value = E::Value;

    fn solve(
        &mut self,
        weights: &[E::Value],
        values: &[E::Value],
        capacity: Capacity,
    ) -> Result<E::Value, AllocError> {
        ObliviousSolver::solve(self, weights, values, capacity)
    }
}
