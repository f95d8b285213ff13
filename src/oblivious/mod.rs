//! Oblivious primitive interface.
//!
//! Code running on top of a secret-sharing engine must not branch on, or index memory by, secret values.
//! Every decision is expressed through the primitives of [ObliviousOps] instead:
//! a comparison yields a secret bit, and that bit only ever flows into [ObliviousOps::select]
//! or [ObliviousOps::cond_swap].
//!
//! Two engines live in this crate:
//!
//! - [ClearEngine]: plaintext values over $`\mathbb{Z}_{2^{64}}`$, with constant-time compare and select from [subtle].
//! - [TranscriptEngine]: wraps another engine and records which primitives were called, in order.
//!   Two runs over inputs of the same shape must record the same transcript.
//!
//! A real MPC backend implements the same trait and plugs into the solvers unchanged.

pub mod clear;
pub use clear::ClearEngine;
pub mod transcript;
pub use transcript::{Op, TranscriptEngine};

/// Primitive operations supplied by the secure-computation engine.
///
/// `Value` is the (possibly secret-shared) integer representation and `Bit` a (possibly secret) boolean.
/// Arithmetic is ring arithmetic modulo $`2^{\text{value\_bits}}`$.
pub trait ObliviousOps {
    /// Secret integer.
    type Value: Clone;
    /// Secret boolean.
    type Bit: Clone;

    /// Bit width of [Self::Value].
    fn value_bits(&self) -> u32;

    /// Embed a public constant.
    fn constant(&mut self, x: u64) -> Self::Value;

    /// $`a + b`$
    fn add(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// $`a - b`$
    fn sub(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// $`a \cdot b`$
    fn mul(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// $`a \geq b`$ as unsigned integers.
    fn cmp_ge(&mut self, a: &Self::Value, b: &Self::Value) -> Self::Bit;

    /// $`a \land b`$
    fn and(&mut self, a: &Self::Bit, b: &Self::Bit) -> Self::Bit;

    /// $`\lnot a`$
    fn not(&mut self, a: &Self::Bit) -> Self::Bit;

    /// `a` if `cond` holds, otherwise `b`.
    fn select(&mut self, cond: &Self::Bit, a: &Self::Value, b: &Self::Value) -> Self::Value;

    /// The lowest `nbits` bits of `a`, least significant first.
    fn bit_decompose(&mut self, a: &Self::Value, nbits: u32) -> Vec<Self::Bit>;

    /// Swap `a` and `b` if `cond` holds. Both slots are written either way.
    fn cond_swap(&mut self, cond: &Self::Bit, a: &mut Self::Value, b: &mut Self::Value) {
        let x = self.select(cond, b, a);
        let y = self.select(cond, a, b);
        *a = x;
        *b = y;
    }
}
