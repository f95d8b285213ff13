//! # Oblivious knapsack and capacity auction
//!
//! Value-maximizing allocation of a shared capacity, in two regimes:
//!
//! - a plaintext [reference solver](knapsack::ReferenceSolver) for the 0/1 knapsack problem, and
//! - a data-oblivious [solver](knapsack::ObliviousSolver) whose control flow and memory accesses do not depend on
//!   secret weights or values, built on the [rotation](knapsack::rotate()) primitive and an abstract
//!   [engine](oblivious::ObliviousOps) supplied by a secure-computation backend.
//!
//! [auction] applies the same capacity abstraction to a sealed-bid auction ranked by bid density.
//! [batch] runs many independent instances on worker threads.
#![warn(missing_docs)]

pub mod auction;
pub mod batch;
pub mod cli_utils;
mod error;
pub mod instance_utils;
pub mod knapsack;
pub mod oblivious;
pub mod runner;

pub use error::AllocError;

/// Capacity of a knapsack or an auction, and the width of the DP table minus one.
pub type Capacity = usize;
