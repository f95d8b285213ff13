//! Parallel execution of independent instances.
//!
//! Instances are split into contiguous chunks, one per worker, and each worker runs on a scoped [crossbeam] thread.
//! Nothing mutable is shared: every instance gets a fresh solver (and, for the oblivious solver, a fresh engine).
//! The first failing instance aborts the whole batch, so no partial result is ever returned.

use crate::auction::{AuctionAllocator, Bidder, Winner};
use crate::knapsack::{ObliviousSolver, ReferenceSolver};
use crate::oblivious::ObliviousOps;
use crate::Capacity;
use anyhow::{anyhow, bail, Context, Result};
use itertools::Itertools;
use tracing::debug;

/// One knapsack instance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KnapsackInstance<V> {
    /// Item weights.
    pub weights: Vec<V>,
    /// Item values, same length as `weights`.
    pub values: Vec<V>,
    /// Capacity.
    pub capacity: Capacity,
}

/// One auction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Auction {
    /// Participating bidders.
    pub bidders: Vec<Bidder>,
    /// Capacity being auctioned.
    pub capacity: Capacity,
}

/// Solve every instance with an [ObliviousSolver] over an engine built by `make_engine`.
pub fn solve_batch_oblivious<E, F>(
    instances: &[KnapsackInstance<E::Value>],
    threads: usize,
    make_engine: F,
) -> Result<Vec<E::Value>>
where
    E: ObliviousOps,
    E::Value: Send + Sync,
    F: Fn() -> E + Sync,
{
    run_chunked(instances, threads, |idx, instance| {
        let mut solver = ObliviousSolver::new(make_engine());
        solver
            .solve(&instance.weights, &instance.values, instance.capacity)
            .with_context(|| format!("instance {} failed", idx))
    })
}

/// Solve every instance with the [ReferenceSolver].
pub fn solve_batch_reference(
    instances: &[KnapsackInstance<u64>],
    threads: usize,
) -> Result<Vec<u64>> {
    run_chunked(instances, threads, |idx, instance| {
        ReferenceSolver::<u64>::new()
            .solve(&instance.weights, &instance.values, instance.capacity)
            .with_context(|| format!("instance {} failed", idx))
    })
}

/// Allocate every auction.
pub fn allocate_batch(auctions: &[Auction], threads: usize) -> Result<Vec<Winner>> {
    run_chunked(auctions, threads, |idx, auction| {
        AuctionAllocator::new(auction.capacity)
            .allocate(&auction.bidders)
            .with_context(|| format!("auction {} failed", idx))
    })
}

fn run_chunked<T, R, F>(items: &[T], threads: usize, f: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> Result<R> + Sync,
{
    if threads == 0 {
        bail!("threads (={}) must be positive @{}:{}", threads, file!(), line!());
    }

    if items.is_empty() {
        return Ok(Vec::new());
    }

    let chunk_size = (items.len() + threads - 1) / threads;
    let f = &f;

    debug!(
        items = items.len(),
        workers = (items.len() + chunk_size - 1) / chunk_size,
        chunk_size,
        "running batch"
    );

    crossbeam::scope(|s| {
        let handles = items
            .chunks(chunk_size)
            .enumerate()
            .map(|(c, chunk)| {
                s.spawn(move |_| {
                    chunk
                        .iter()
                        .enumerate()
                        .map(|(k, item)| f(c * chunk_size + k, item))
                        .collect::<Result<Vec<_>>>()
                })
            })
            .collect_vec();

        let mut res = Vec::with_capacity(items.len());
        for handle in handles {
            let part = handle
                .join()
                .map_err(|_| anyhow!("worker thread panicked @{}:{}", file!(), line!()))??;
            res.extend(part);
        }

        Ok(res)
    })
    .map_err(|_| anyhow!("batch scope panicked @{}:{}", file!(), line!()))?
}
