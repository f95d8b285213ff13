//! Command-line runner.
//!
//! Generates random instances, runs them through the oblivious solver, the rotation primitive or the auction allocator,
//! and cross-checks every result: oblivious against reference, rotation against a plain rotation,
//! auction winners against the highest single bid and the exact optimum.
//! With the transcript engine it additionally checks that all instances of the same shape record the same transcript.

mod bin;
pub use bin::run;
