//! Plaintext engine.
//!
//! Values are `u64` in the clear, but comparisons and selections go through [subtle]'s constant-time
//! primitives so that the engine itself introduces no data-dependent branch.

use super::ObliviousOps;
use subtle::{Choice, ConditionallySelectable, ConstantTimeGreater};

/// Engine over plaintext `u64` values with wrapping arithmetic.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClearEngine;

impl ClearEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }
}

impl ObliviousOps for ClearEngine {
    type Value = u64;
    type Bit = Choice;

    fn value_bits(&self) -> u32 {
        u64::BITS
    }

    #[inline]
    fn constant(&mut self, x: u64) -> u64 {
        x
    }

    #[inline]
    fn add(&mut self, a: &u64, b: &u64) -> u64 {
        a.wrapping_add(*b)
    }

    #[inline]
    fn sub(&mut self, a: &u64, b: &u64) -> u64 {
        a.wrapping_sub(*b)
    }

    #[inline]
    fn mul(&mut self, a: &u64, b: &u64) -> u64 {
        a.wrapping_mul(*b)
    }

    #[inline]
    fn cmp_ge(&mut self, a: &u64, b: &u64) -> Choice {
        !b.ct_gt(a)
    }

    #[inline]
    fn and(&mut self, a: &Choice, b: &Choice) -> Choice {
        *a & *b
    }

    #[inline]
    fn not(&mut self, a: &Choice) -> Choice {
        !*a
    }

    #[inline]
    fn select(&mut self, cond: &Choice, a: &u64, b: &u64) -> u64 {
        // conditional_select picks its second argument when the choice is set
        u64::conditional_select(b, a, *cond)
    }

    fn bit_decompose(&mut self, a: &u64, nbits: u32) -> Vec<Choice> {
        (0..nbits)
            .map(|i| Choice::from(((a >> i) & 1) as u8))
            .collect()
    }

    #[inline]
    fn cond_swap(&mut self, cond: &Choice, a: &mut u64, b: &mut u64) {
        u64::conditional_swap(a, b, *cond);
    }
}
