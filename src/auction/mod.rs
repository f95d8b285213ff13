//! Sealed-bid capacity auction.
//!
//! Each [Bidder] asks for an allocation of a shared capacity and offers a bid for it.
//! [AuctionAllocator] ranks bidders by bid density ($`\text{bid} / \text{allocation}`$), admits them greedily
//! while the capacity lasts, and then lets that coalition compete against the single highest bidder.
//! The winner's total bid is therefore never below the highest single bid, but the greedy coalition
//! is not guaranteed to be optimal. [AuctionAllocator::exact_optimum] gives the optimum for comparison.
//!
//! # Example
//!
//! ```
//! use oblivious_knapsack_auction::auction::{AuctionAllocator, Bidder, Winner};
//!
//! let bidders = vec![
//!     Bidder::new(0, 100, 50),
//!     Bidder::new(1, 90, 40),
//!     Bidder::new(2, 500, 1000),
//! ];
//!
//! let winner = AuctionAllocator::new(100).allocate(&bidders).unwrap();
//!
//! // bidders 1 and 0 fit, but 90 + 100 < 500
//! assert_eq!(winner, Winner::Monopolist(bidders[2]));
//! ```

use crate::error::AllocError;
use crate::knapsack::{Item, ReferenceSolver, Selection};
use crate::Capacity;
use std::cmp::Ordering;
use tracing::debug;

/// Identifier of a bidder. Unique within one auction.
pub type BidderId = usize;

/// A sealed bid for part of the capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bidder {
    /// Bidder identifier.
    pub id: BidderId,
    /// Offered amount.
    pub bid: u64,
    /// Requested share of the capacity, in the same unit as the capacity.
    pub allocation: u64,
}

impl Bidder {
    /// Create a bidder.
    pub fn new(id: BidderId, bid: u64, allocation: u64) -> Self {
        Self {
            id,
            bid,
            allocation,
        }
    }

    /// Compare bid densities exactly, by cross multiplication.
    ///
    /// A zero allocation behaves as an infinite density: it ranks above every positive allocation,
    /// and all zero allocations compare equal whatever their bids.
    pub fn cmp_density(&self, other: &Self) -> Ordering {
        match (self.allocation, other.allocation) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Greater,
            (_, 0) => Ordering::Less,
            (a, b) => {
                let lhs = self.bid as u128 * b as u128;
                let rhs = other.bid as u128 * a as u128;
                lhs.cmp(&rhs)
            }
        }
    }

    /// The bidder as a knapsack item: the allocation is the weight and the bid the value.
    pub fn as_item(&self) -> Item<u64> {
        Item::new(self.allocation, self.bid)
    }
}

/// Outcome of an auction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Winner {
    /// Greedily packed bidders, in density order.
    Coalition(Vec<Bidder>),
    /// The single highest bidder.
    Monopolist(Bidder),
}

impl Winner {
    /// Winning bidders.
    pub fn bidders(&self) -> &[Bidder] {
        match self {
            Winner::Coalition(bidders) => bidders,
            Winner::Monopolist(bidder) => std::slice::from_ref(bidder),
        }
    }

    /// Sum of the winning bids.
    pub fn total_bid(&self) -> u128 {
        total_bid(self.bidders())
    }

    /// Whether the coalition won.
    pub fn is_coalition(&self) -> bool {
        matches!(self, Winner::Coalition(_))
    }
}

fn total_bid(bidders: &[Bidder]) -> u128 {
    bidders.iter().map(|b| b.bid as u128).sum()
}

/// Density-greedy allocator for a fixed capacity.
#[derive(Clone, Copy, Debug)]
pub struct AuctionAllocator {
    capacity: Capacity,
}

impl AuctionAllocator {
    /// Create an allocator for `capacity`.
    pub fn new(capacity: Capacity) -> Self {
        Self { capacity }
    }

    /// The capacity being auctioned.
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Determine the winner.
    ///
    /// 1. The highest single bidder is the one with the largest bid, the first one on ties.
    /// 2. Bidders are stably sorted by decreasing density.
    /// 3. They are admitted in that order while the accumulated allocation stays within the capacity.
    ///    The scan stops at the first bidder that does not fit.
    /// 4. The coalition wins only if its total bid is strictly greater than the highest single bid.
    ///
    /// Fails with [AllocError::EmptyBidderSet] when `bidders` is empty.
    pub fn allocate(&self, bidders: &[Bidder]) -> Result<Winner, AllocError> {
        let highest = highest_bidder(bidders).ok_or(AllocError::EmptyBidderSet)?;

        let mut ranked = bidders.to_vec();
        ranked.sort_by(|a, b| b.cmp_density(a));

        let capacity = self.capacity as u64;
        let mut used: u64 = 0;
        let mut coalition = Vec::new();

        for bidder in ranked {
            match used.checked_add(bidder.allocation) {
                Some(total) if total <= capacity => {
                    used = total;
                    coalition.push(bidder);
                }
                _ => break,
            }
        }

        let coalition_bid = total_bid(&coalition);

        debug!(
            bidders = bidders.len(),
            capacity,
            used,
            coalition = coalition.len(),
            coalition_bid = %coalition_bid,
            highest_bid = highest.bid,
            "auction allocated"
        );

        if coalition_bid > highest.bid as u128 {
            Ok(Winner::Coalition(coalition))
        } else {
            Ok(Winner::Monopolist(highest))
        }
    }

    /// The optimal subset of bidders for this capacity, found by the reference knapsack solver.
    ///
    /// Fails with [AllocError::EmptyBidderSet] when `bidders` is empty.
    pub fn exact_optimum(&self, bidders: &[Bidder]) -> Result<Selection<u64>, AllocError> {
        if bidders.is_empty() {
            return Err(AllocError::EmptyBidderSet);
        }

        let (weights, values): (Vec<u64>, Vec<u64>) = bidders
            .iter()
            .map(|b| {
                let item = b.as_item();
                (item.weight, item.value)
            })
            .unzip();

        ReferenceSolver::<u64>::new().solve_with_selection(&weights, &values, self.capacity)
    }
}

/// Shorthand for `AuctionAllocator::new(capacity).allocate(bidders)`.
pub fn allocate(bidders: &[Bidder], capacity: Capacity) -> Result<Winner, AllocError> {
    AuctionAllocator::new(capacity).allocate(bidders)
}

fn highest_bidder(bidders: &[Bidder]) -> Option<Bidder> {
    bidders
        .iter()
        .copied()
        .reduce(|best, b| if b.bid > best.bid { b } else { best })
}
