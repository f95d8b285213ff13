//! CLI (CommandLine Interface) utilities for the allocation runner.
//!
//! Here, you can know the options of the runner through enum types and structs.
//! See other modules for the actual implementation of the solvers or details of what options mean.

use clap::{Parser, ValueEnum};
use std::fmt::Display;

/// What the runner computes.
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Solve random knapsack instances obliviously and check them against the reference solver.
    /// See [knapsack](crate::knapsack).
    Knapsack,
    /// Rotate random arrays by random amounts and check them against a plain rotation.
    /// See [rotate](crate::knapsack::rotate()).
    Rotate,
    /// Allocate random auctions. See [auction](crate::auction).
    Auction,
}

impl Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Knapsack => write!(f, "knapsack"),
            Mode::Rotate => write!(f, "rotate"),
            Mode::Auction => write!(f, "auction"),
        }
    }
}

/// Oblivious engines. More details: [oblivious](crate::oblivious).
#[derive(Clone, Copy, ValueEnum, Debug, PartialEq, Eq)]
pub enum EngineType {
    /// Plaintext constant-time engine. See [ClearEngine](crate::oblivious::ClearEngine).
    Clear,
    /// Plaintext engine recording every primitive call. See [TranscriptEngine](crate::oblivious::TranscriptEngine).
    Transcript,
}

impl Display for EngineType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineType::Clear => write!(f, "clear"),
            EngineType::Transcript => write!(f, "transcript"),
        }
    }
}

/// Arguments for the allocation runner.
/// This struct implements [clap::Parser] to make that this binary has CommandLine Arguments.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, next_line_help = true)]
pub struct Args {
    /// What to run.
    #[arg(short = 'm', long, default_value_t = Mode::Knapsack)]
    pub mode: Mode,

    /// Oblivious engine.
    #[arg(short = 'e', long = "engine", default_value_t = EngineType::Clear)]
    pub engine_type: EngineType,

    /// Number of items per knapsack instance, bidders per auction, or array length for rotations.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub num_items: usize,

    /// Capacity shared by all items or bidders.
    #[arg(short = 'C', long, default_value_t = 50)]
    pub capacity: usize,

    /// Upper bound of item weights and bidder allocations.
    ///
    /// Weights above the capacity are allowed; such items are excluded by the solvers.
    #[arg(short = 'w', long, default_value_t = 60)]
    pub max_weight: u64,

    /// Upper bound of item values and bids.
    #[arg(short = 'v', long, default_value_t = 100)]
    pub max_value: u64,

    /// Number of independent instances.
    #[arg(short = 'i', long, default_value_t = 8)]
    pub instances: usize,

    /// Number of worker threads.
    #[arg(short = 't', long, default_value_t = 4)]
    pub threads: usize,

    /// Seed of the instance generator. Random if omitted.
    #[arg(short = 's', long)]
    pub seed: Option<u64>,

    /// Verbose mode.
    ///
    /// If specified, log every instance and its result.
    #[arg(long = "verbose", default_value_t = false)]
    pub verbose: bool,
}
