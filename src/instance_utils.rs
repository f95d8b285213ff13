//! Utility functions for creating random knapsack instances and bidder sets.

use crate::auction::Bidder;
use crate::batch::{Auction, KnapsackInstance};
use crate::Capacity;
use anyhow::{bail, Result};
use rand::Rng;

/// Create `count` knapsack instances of `num_items` items each.
///
/// Weights are drawn from `0..=max_weight` and values from `0..=max_value`.
/// A `max_weight` above `capacity` yields some items that can never be packed, which is intended.
pub fn create_knapsack_instances<RNG: Rng>(
    count: usize,
    num_items: usize,
    capacity: Capacity,
    max_weight: u64,
    max_value: u64,
    rng: &mut RNG,
) -> Result<Vec<KnapsackInstance<u64>>> {
    if count == 0 {
        bail!("count (={}) == 0 @{}:{}", count, file!(), line!());
    }

    if max_value.checked_mul(num_items as u64).is_none() {
        bail!(
            "max_value (={}) * num_items (={}) overflows @{}:{}",
            max_value,
            num_items,
            file!(),
            line!()
        );
    }

    let instances = (0..count)
        .map(|_| KnapsackInstance {
            weights: (0..num_items)
                .map(|_| rng.gen_range(0..=max_weight))
                .collect(),
            values: (0..num_items)
                .map(|_| rng.gen_range(0..=max_value))
                .collect(),
            capacity,
        })
        .collect();

    Ok(instances)
}

/// Create `num_bidders` bidders with ids `0..num_bidders`.
///
/// Bids are drawn from `0..=max_bid` and allocations from `1..=max_allocation`.
pub fn create_bidders<RNG: Rng>(
    num_bidders: usize,
    max_bid: u64,
    max_allocation: u64,
    rng: &mut RNG,
) -> Result<Vec<Bidder>> {
    if max_allocation == 0 {
        bail!(
            "max_allocation (={}) must be positive @{}:{}",
            max_allocation,
            file!(),
            line!()
        );
    }

    let bidders = (0..num_bidders)
        .map(|id| {
            Bidder::new(
                id,
                rng.gen_range(0..=max_bid),
                rng.gen_range(1..=max_allocation),
            )
        })
        .collect();

    Ok(bidders)
}

/// Create `count` auctions over the same capacity.
pub fn create_auctions<RNG: Rng>(
    count: usize,
    num_bidders: usize,
    capacity: Capacity,
    max_bid: u64,
    max_allocation: u64,
    rng: &mut RNG,
) -> Result<Vec<Auction>> {
    if count == 0 {
        bail!("count (={}) == 0 @{}:{}", count, file!(), line!());
    }

    if num_bidders == 0 {
        bail!("num_bidders (={}) == 0 @{}:{}", num_bidders, file!(), line!());
    }

    (0..count)
        .map(|_| {
            Ok(Auction {
                bidders: create_bidders(num_bidders, max_bid, max_allocation, rng)?,
                capacity,
            })
        })
        .collect()
}
