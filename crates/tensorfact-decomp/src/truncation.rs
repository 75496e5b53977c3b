//! Truncation policy shared by TT-SVD and TT rounding
//!
//! Both algorithms cut a sequence of d-1 bonds. With a relative tolerance τ
//! the global error budget τ·‖X‖ is split evenly in the 2-norm across the
//! bonds, so each bond may discard singular values whose tail energy is at
//! most
//!
//! ```text
//! δ = τ·‖X‖ / √(d-1)
//! ```
//!
//! which gives ‖X − Y‖ ≤ √(d-1)·δ = τ·‖X‖ overall. With a rank budget each
//! bond simply keeps the leading singular values.

use scirs2_core::numeric::{Float, NumCast};
use tensorfact_core::{Result, TtError};

/// How bonds are truncated
///
/// # Examples
///
/// ```
/// use tensorfact_decomp::Truncation;
///
/// assert!(Truncation::tolerance(1e-6).validate().is_ok());
/// assert!(Truncation::tolerance(-1.0).validate().is_err());
/// assert!(Truncation::max_rank(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Truncation {
    /// Relative accuracy τ: ‖X − Y‖ ≤ τ·‖X‖
    Tolerance(f64),

    /// Keep at most this many singular values per bond
    MaxRank(usize),
}

impl Default for Truncation {
    fn default() -> Self {
        Truncation::Tolerance(1e-10)
    }
}

impl Truncation {
    /// Truncate to a relative tolerance
    pub fn tolerance(relative_tolerance: f64) -> Self {
        Truncation::Tolerance(relative_tolerance)
    }

    /// Truncate to a fixed rank budget
    pub fn max_rank(max_rank: usize) -> Self {
        Truncation::MaxRank(max_rank)
    }

    /// Check the policy before any numeric work
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a negative or non-finite tolerance, or a zero
    /// rank budget.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Truncation::Tolerance(tol) => {
                if !tol.is_finite() || tol < 0.0 {
                    return Err(TtError::InvalidArgument(format!(
                        "Relative tolerance must be finite and non-negative, got {}",
                        tol
                    )));
                }
                if tol > 1.0 {
                    log::warn!(
                        "Relative tolerance {} exceeds 1; every bond will be cut to rank 1",
                        tol
                    );
                }
                Ok(())
            }
            Truncation::MaxRank(0) => Err(TtError::InvalidArgument(
                "Max rank must be positive".to_string(),
            )),
            Truncation::MaxRank(_) => Ok(()),
        }
    }

    /// Per-bond discard threshold for an array of norm `norm` with `ndim`
    /// modes, or `None` for a rank budget
    pub(crate) fn bond_threshold<T: Float + NumCast>(&self, norm: T, ndim: usize) -> Option<T> {
        match *self {
            Truncation::Tolerance(tol) => Some(per_bond_threshold(norm, tol, ndim)),
            Truncation::MaxRank(_) => None,
        }
    }

    /// Rank kept at one bond given its singular values (sorted descending)
    /// and the threshold from [`Truncation::bond_threshold`]
    pub(crate) fn select_rank<T: Float>(
        &self,
        singular_values: &[T],
        threshold: Option<T>,
    ) -> usize {
        match (*self, threshold) {
            (Truncation::MaxRank(max_rank), _) => max_rank.min(singular_values.len()).max(1),
            (Truncation::Tolerance(_), Some(delta)) => truncation_rank(singular_values, delta),
            (Truncation::Tolerance(_), None) => singular_values.len().max(1),
        }
    }
}

/// Per-bond threshold δ = τ·norm/√(ndim-1)
///
/// Returns zero when there are no bonds to cut.
pub fn per_bond_threshold<T: Float + NumCast>(norm: T, tolerance: f64, ndim: usize) -> T {
    if ndim < 2 {
        return T::zero();
    }
    let tol = <T as NumCast>::from(tolerance).unwrap_or_else(T::zero);
    let bonds = <T as NumCast>::from(ndim - 1).unwrap_or_else(T::one);
    tol * norm / bonds.sqrt()
}

/// Smallest rank r ≥ 1 with sqrt(Σ_{i≥r} σᵢ²) ≤ δ
///
/// A zero threshold keeps every singular value.
///
/// # Examples
///
/// ```
/// use tensorfact_decomp::truncation_rank;
///
/// let s = [10.0, 1.0, 0.1, 0.01];
/// assert_eq!(truncation_rank(&s, 0.0), 4);
/// assert_eq!(truncation_rank(&s, 0.05), 3);
/// assert_eq!(truncation_rank(&s, 0.2), 2);
/// assert_eq!(truncation_rank(&s, 100.0), 1);
/// ```
pub fn truncation_rank<T: Float>(singular_values: &[T], threshold: T) -> usize {
    let len = singular_values.len();
    if threshold <= T::zero() {
        return len.max(1);
    }

    let budget = threshold * threshold;
    let mut tail = T::zero();
    let mut rank = len;
    while rank > 1 {
        let sigma = singular_values[rank - 1];
        let next_tail = tail + sigma * sigma;
        if next_tail > budget {
            break;
        }
        tail = next_tail;
        rank -= 1;
    }
    rank.max(1)
}
