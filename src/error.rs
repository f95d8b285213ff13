//! Error taxonomy shared by the solvers, the rotation primitive and the auction allocator.
//!
//! Every variant is a local validation failure raised before any oblivious primitive runs.
//! A weight larger than the capacity is *not* an error: such an item is excluded by the DP itself.

use thiserror::Error;

/// Validation failures of the allocation core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocError {
    /// `weights` and `values` have different lengths.
    #[error("dimension mismatch: {weights} weights but {values} values")]
    DimensionMismatch {
        /// Number of weights given.
        weights: usize,
        /// Number of values given.
        values: usize,
    },

    /// Rotation range is malformed or empty.
    #[error("invalid rotation range {start}..{end} over {len} values")]
    InvalidRotation {
        /// First index of the range.
        start: usize,
        /// One past the last index of the range.
        end: usize,
        /// Length of the whole slice.
        len: usize,
    },

    /// No bidders were given to the auction.
    #[error("no bidders to allocate")]
    EmptyBidderSet,
}

pub(crate) fn check_dimensions<W, V>(weights: &[W], values: &[V]) -> Result<(), AllocError> {
    if weights.len() != values.len() {
        return Err(AllocError::DimensionMismatch {
            weights: weights.len(),
            values: values.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&[1u64, 2], &[3u64, 4]).is_ok());
        assert!(check_dimensions::<u64, u64>(&[], &[]).is_ok());

        let err = check_dimensions(&[1u64, 2, 3], &[3u64]).unwrap_err();
        assert_eq!(
            err,
            AllocError::DimensionMismatch {
                weights: 3,
                values: 1
            }
        );
    }

    #[test]
    fn test_messages() {
        let err = AllocError::InvalidRotation {
            start: 3,
            end: 2,
            len: 5,
        };
        assert_eq!(err.to_string(), "invalid rotation range 3..2 over 5 values");
        assert_eq!(
            AllocError::EmptyBidderSet.to_string(),
            "no bidders to allocate"
        );
    }
}
