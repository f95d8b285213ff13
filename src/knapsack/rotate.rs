//! Oblivious cyclic rotation.
//!
//! Rotating left by a secret amount $`K`$ cannot be done by indexing `values[(i + K) % n]`:
//! the access pattern would reveal $`K`$. Instead, for each bit $`b`$ of $`K`$ (most significant first)
//! one pass conditionally shifts the array left by $`2^b`$, where every swap of the pass is gated by that bit.
//! Composing the passes shifts by $`\sum_b k_b 2^b = K`$.
//!
//! A pass shifting by $`s`$ swaps `values[i]` with `values[i + s]` for every `i` in `0..n - s`.
//! Afterwards the first $`n - s`$ slots are already correct, and the trailing $`s`$ slots hold the leading
//! block rotated left by $`n \bmod s`$. That block is fixed by the same sweep with shift
//! $`(s - n \bmod s) \bmod s`$, and so on until the shift reaches zero.
//! All loop bounds depend on $`n`$ and $`b`$ only.

use super::ceil_log2;
use crate::error::AllocError;
use crate::oblivious::ObliviousOps;
use tracing::trace;

/// Rotate `values` left by `k mod values.len()`.
///
/// Every slot is written and the same sequence of primitives is issued whatever the value of `k`.
/// Fails with [AllocError::InvalidRotation] on an empty slice.
///
/// # Example
///
/// ```
/// use oblivious_knapsack_auction::knapsack::rotate;
/// use oblivious_knapsack_auction::oblivious::ClearEngine;
///
/// let mut engine = ClearEngine::new();
/// let mut values = vec![1, 2, 3, 4, 5];
/// rotate(&mut engine, &mut values, &2).unwrap();
/// assert_eq!(values, vec![3, 4, 5, 1, 2]);
/// ```
pub fn rotate<E: ObliviousOps>(
    engine: &mut E,
    values: &mut [E::Value],
    k: &E::Value,
) -> Result<(), AllocError> {
    let len = values.len();
    rotate_range(engine, values, 0, len, k)
}

/// Rotate `values[start..end]` left by `k mod (end - start)`, leaving the rest untouched.
///
/// Fails with [AllocError::InvalidRotation] if `start > end`, `end > values.len()` or the range is empty.
pub fn rotate_range<E: ObliviousOps>(
    engine: &mut E,
    values: &mut [E::Value],
    start: usize,
    end: usize,
    k: &E::Value,
) -> Result<(), AllocError> {
    if start >= end || end > values.len() {
        return Err(AllocError::InvalidRotation {
            start,
            end,
            len: values.len(),
        });
    }

    let window = &mut values[start..end];
    let k = reduce_mod(engine, k, window.len());
    rotate_reduced(engine, window, &k);

    Ok(())
}

/// `k mod n` by restoring division: subtract $`n \cdot 2^s`$ whenever it fits, for every $`s`$ from the top down.
pub(crate) fn reduce_mod<E: ObliviousOps>(engine: &mut E, k: &E::Value, n: usize) -> E::Value {
    let width = engine.value_bits().min(u64::BITS);
    let n = n as u64;
    let n_bits = u64::BITS - n.leading_zeros();

    let mut k = k.clone();

    if n_bits > width {
        // n exceeds every representable value
        return k;
    }

    for s in (0..=(width - n_bits)).rev() {
        let t = engine.constant(n << s);
        let fits = engine.cmp_ge(&k, &t);
        let rest = engine.sub(&k, &t);
        k = engine.select(&fits, &rest, &k);
    }

    k
}

/// Rotate left by `k`, which must already be less than `values.len()`.
pub(crate) fn rotate_reduced<E: ObliviousOps>(
    engine: &mut E,
    values: &mut [E::Value],
    k: &E::Value,
) {
    let max_log_k = ceil_log2(values.len());
    let bits = engine.bit_decompose(k, max_log_k);

    for b in (0..max_log_k).rev() {
        maybe_shift(engine, values, 1 << b, &bits[b as usize]);
    }
}

/// Shift `values` left by `shift` if `cond` holds. Requires `0 < shift < values.len()`.
fn maybe_shift<E: ObliviousOps>(
    engine: &mut E,
    values: &mut [E::Value],
    shift: usize,
    cond: &E::Bit,
) {
    let mut start = 0;
    let mut len = values.len();
    let mut shift = shift;

    while shift != 0 {
        trace!(start, len, shift, "conditional shift sweep");

        for i in start..(start + len - shift) {
            let (lo, hi) = values.split_at_mut(i + shift);
            engine.cond_swap(cond, &mut lo[i], &mut hi[0]);
        }

        let rem = len % shift;
        start += len - shift;
        len = shift;
        shift = (shift - rem) % shift;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oblivious::{ClearEngine, TranscriptEngine};
    use rand::Rng;

    fn plain_rotate(values: &[u64], k: usize) -> Vec<u64> {
        let mut res = values.to_vec();
        res.rotate_left(k % values.len());
        res
    }

    fn inner<RNG: Rng>(n: usize, rng: &mut RNG) {
        let mut engine = ClearEngine::new();
        let values = (0..n).map(|_| rng.gen_range(0..1000)).collect::<Vec<u64>>();
        let k = rng.gen_range(0..n);

        let mut rotated = values.clone();
        rotate(&mut engine, &mut rotated, &(k as u64)).unwrap();

        assert_eq!(rotated, plain_rotate(&values, k), "n = {}, k = {}", n, k);
    }

    #[test]
    fn test_scenario() {
        let mut engine = ClearEngine::new();
        let mut values = vec![1, 2, 3, 4, 5];

        rotate(&mut engine, &mut values, &2).unwrap();

        assert_eq!(values, vec![3, 4, 5, 1, 2]);
    }

    #[test]
    fn test_exhaustive_small() {
        let mut engine = ClearEngine::new();

        for n in 1..=33 {
            let values = (0..n as u64).collect::<Vec<_>>();
            for k in 0..n {
                let mut rotated = values.clone();
                rotate(&mut engine, &mut rotated, &(k as u64)).unwrap();
                assert_eq!(rotated, plain_rotate(&values, k), "n = {}, k = {}", n, k);
            }
        }
    }

    #[test]
    fn test_random() {
        let mut rng = rand::thread_rng();

        for _ in 0..200 {
            let n = rng.gen_range(1..=300);
            inner(n, &mut rng);
        }
    }

    #[test]
    fn test_zero_is_identity() {
        let mut engine = ClearEngine::new();
        let mut rng = rand::thread_rng();

        for n in [1, 2, 7, 16, 100] {
            let values = (0..n).map(|_| rng.gen()).collect::<Vec<u64>>();
            let mut rotated = values.clone();
            rotate(&mut engine, &mut rotated, &0).unwrap();
            assert_eq!(rotated, values);
        }
    }

    #[test]
    fn test_amount_is_reduced() {
        let mut engine = ClearEngine::new();
        let values = vec![1, 2, 3, 4, 5];

        for k in [5u64, 7, 12, 1_000_003, u64::MAX] {
            let mut rotated = values.clone();
            rotate(&mut engine, &mut rotated, &k).unwrap();
            assert_eq!(rotated, plain_rotate(&values, (k % 5) as usize), "k = {}", k);
        }
    }

    #[test]
    fn test_composition() {
        let mut engine = ClearEngine::new();
        let mut rng = rand::thread_rng();

        for _ in 0..100 {
            let n = rng.gen_range(1..=64);
            let values = (0..n).map(|_| rng.gen()).collect::<Vec<u64>>();
            let k1 = rng.gen_range(0..n) as u64;
            let k2 = rng.gen_range(0..n) as u64;

            let mut twice = values.clone();
            rotate(&mut engine, &mut twice, &k1).unwrap();
            rotate(&mut engine, &mut twice, &k2).unwrap();

            let mut once = values.clone();
            rotate(&mut engine, &mut once, &((k1 + k2) % n as u64)).unwrap();

            assert_eq!(twice, once);
        }
    }

    #[test]
    fn test_range() {
        let mut engine = ClearEngine::new();
        let mut values = vec![0, 1, 2, 3, 4, 5, 6, 7];

        rotate_range(&mut engine, &mut values, 2, 6, &1).unwrap();

        assert_eq!(values, vec![0, 1, 3, 4, 5, 2, 6, 7]);
    }

    #[test]
    fn test_range_amount_is_reduced() {
        let rotated = |k: u64| {
            let mut engine = ClearEngine::new();
            let mut values = vec![0, 1, 2, 3, 4, 5, 6, 7];
            rotate_range(&mut engine, &mut values, 2, 6, &k).unwrap();
            values
        };

        assert_eq!(rotated(4), vec![0, 1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(rotated(6), vec![0, 1, 4, 5, 2, 3, 6, 7]);
        assert_eq!(rotated(6), rotated(2));
        assert_eq!(rotated(u64::MAX), vec![0, 1, 5, 2, 3, 4, 6, 7]);
    }

    #[test]
    fn test_range_transcript_independent_of_amount() {
        let transcript = |k: u64| {
            let mut engine = TranscriptEngine::new(ClearEngine::new());
            let mut values = (0..16).collect::<Vec<u64>>();
            rotate_range(&mut engine, &mut values, 3, 10, &k).unwrap();
            engine.take_transcript()
        };

        let base = transcript(0);
        assert!(!base.is_empty());
        for k in 1..16 {
            assert_eq!(transcript(k), base, "k = {}", k);
        }
        assert_eq!(transcript(u64::MAX), base);
    }

    #[test]
    fn test_transcript_independent_of_amount() {
        let transcript = |k: u64| {
            let mut engine = TranscriptEngine::new(ClearEngine::new());
            let mut values = (0..13).collect::<Vec<u64>>();
            rotate(&mut engine, &mut values, &k).unwrap();
            engine.take_transcript()
        };

        let base = transcript(0);
        assert!(!base.is_empty());
        for k in 1..13 {
            assert_eq!(transcript(k), base, "k = {}", k);
        }
        assert_eq!(transcript(u64::MAX), base);
    }

    #[test]
    fn test_err_1() {
        let mut engine = ClearEngine::new();
        let mut values: Vec<u64> = vec![];

        let res = rotate(&mut engine, &mut values, &0);

        assert_eq!(
            res,
            Err(AllocError::InvalidRotation {
                start: 0,
                end: 0,
                len: 0
            })
        );
    }

    #[test]
    fn test_err_2() {
        let mut engine = ClearEngine::new();
        let mut values = vec![1u64, 2, 3];

        assert!(rotate_range(&mut engine, &mut values, 2, 1, &0).is_err());
        assert!(rotate_range(&mut engine, &mut values, 0, 4, &0).is_err());
        assert!(rotate_range(&mut engine, &mut values, 1, 1, &0).is_err());
        assert_eq!(values, vec![1, 2, 3]);
    }
}
