//! Utility functions for judging a tensor-train approximation
//!
//! This module provides tools for:
//! - Measuring reconstruction error against the dense original
//! - Summarizing storage and compression of a decomposition

use anyhow::{bail, Result};
use scirs2_core::numeric::{Float, NumCast};
use std::iter::Sum;
use tensorfact_core::{DenseND, TtTensor};

/// Summary of one tensor-train approximation
#[derive(Debug, Clone)]
pub struct TtStats<T> {
    /// Relative reconstruction error: ||X - X_approx|| / ||X||
    pub relative_error: T,

    /// Compression ratio: original_size / num_parameters
    pub compression_ratio: f64,

    /// Number of stored core entries
    pub num_parameters: usize,

    /// Number of entries of the dense array
    pub original_size: usize,

    /// Largest TT-rank
    pub max_rank: usize,
}

impl<T: Float> TtStats<T> {
    /// Check if the approximation meets an error threshold
    pub fn meets_threshold(&self, max_error: T) -> bool {
        self.relative_error <= max_error
    }
}

/// Relative error ||X - Y|| / ||X|| of a tensor train against a dense array
///
/// Returns the absolute error ||Y|| when X is zero.
///
/// # Errors
///
/// Fails if the shapes differ.
///
/// # Examples
///
/// ```
/// use tensorfact_core::DenseND;
/// use tensorfact_decomp::{tt_svd, utils::relative_error};
///
/// let tensor = DenseND::<f64>::random_uniform(&[6, 5, 4], 0.0, 1.0);
/// let tt = tt_svd(tensor.shape(), tensor.as_slice(), 1e-3)?;
///
/// assert!(relative_error(&tensor, &tt)? <= 1e-3);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn relative_error<T>(original: &DenseND<T>, approx: &TtTensor<T>) -> Result<T>
where
    T: Float + NumCast + Sum + 'static,
{
    if original.shape() != approx.size() {
        bail!(
            "Shape mismatch: dense array has shape {:?}, tensor train has size {:?}",
            original.shape(),
            approx.size()
        );
    }

    let recon = approx.full();
    let error_sq: T = original
        .as_slice()
        .iter()
        .zip(recon.as_slice())
        .map(|(&x, &y)| (x - y) * (x - y))
        .sum();

    let orig_norm = original.frobenius_norm();
    if orig_norm == T::zero() {
        return Ok(error_sq.sqrt());
    }
    Ok(error_sq.sqrt() / orig_norm)
}

/// Collect [`TtStats`] for a decomposition of `original`
pub fn tt_stats<T>(original: &DenseND<T>, approx: &TtTensor<T>) -> Result<TtStats<T>>
where
    T: Float + NumCast + Sum + 'static,
{
    let relative_error = relative_error(original, approx)?;

    Ok(TtStats {
        relative_error,
        compression_ratio: approx.compression_ratio(),
        num_parameters: approx.num_parameters(),
        original_size: original.len(),
        max_rank: approx.max_rank(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tt_svd::{tt_svd, tt_svd_max_rank};

    #[test]
    fn test_relative_error_exact() {
        let tensor = DenseND::<f64>::from_fn(&[4, 3, 5], |idx| (idx[0] * idx[1] + idx[2]) as f64);
        let tt = tt_svd(tensor.shape(), tensor.as_slice(), 0.0).unwrap();

        let err = relative_error(&tensor, &tt).unwrap();
        assert!(err < 1e-12);
    }

    #[test]
    fn test_relative_error_shape_mismatch() {
        let tensor = DenseND::<f64>::zeros(&[4, 3]);
        let tt = TtTensor::<f64>::new(&[3, 4], &[1, 1, 1]).unwrap();

        assert!(relative_error(&tensor, &tt).is_err());
    }

    #[test]
    fn test_relative_error_zero_original() {
        let tensor = DenseND::<f64>::zeros(&[2, 2]);
        let tt = TtTensor::<f64>::new(&[2, 2], &[1, 1, 1]).unwrap();

        assert_eq!(relative_error(&tensor, &tt).unwrap(), 0.0);
    }

    #[test]
    fn test_tt_stats() {
        let tensor = DenseND::<f64>::random_uniform(&[8, 8, 8, 8], 0.0, 1.0);
        let tt = tt_svd_max_rank(tensor.shape(), tensor.as_slice(), 3).unwrap();

        let stats = tt_stats(&tensor, &tt).unwrap();
        assert_eq!(stats.original_size, 4096);
        assert_eq!(stats.num_parameters, 8 * 3 + 3 * 3 * 8 * 2 + 3 * 8);
        assert_eq!(stats.max_rank, 3);
        assert!(stats.compression_ratio > 1.0);
        assert!(stats.relative_error > 0.0 && stats.relative_error < 1.0);
        assert!(stats.meets_threshold(1.0));
    }
}
