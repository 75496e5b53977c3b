//! TT-SVD: dense array to tensor train
//!
//! Computes a TT decomposition via sequential SVD with rank truncation
//! (Oseledets 2011, Algorithm 1).
//!
//! Starting from the (n₀ × n₁⋯n_{d-1}) unfolding of the input, each step
//! factors the current remainder, keeps the leading left singular vectors
//! as a core and carries diag(σ)·Vᵀ forward:
//!
//! ```text
//! C ← reshape(A, n₀, ∏_{k>0} nₖ)
//! for k = 0 .. d-2:
//!     C ← reshape(C, rₖ·nₖ, ∏_{j>k} nⱼ)
//!     U, σ, Vᵀ ← svd(C), truncated to rₖ₊₁
//!     Gₖ ← reshape(U, rₖ, rₖ₊₁, nₖ)
//!     C ← diag(σ)·Vᵀ
//! G_{d-1} ← reshape(C, r_{d-1}, 1, n_{d-1})
//! ```
//!
//! All reshapes follow the column-major convention of the input buffer:
//! the left bond index varies fastest within a merged row index.
//!
//! # Complexity
//!
//! Time: O(d × n × N × R) dominated by the first SVD (N = ∏ nₖ)

use crate::linalg::{thin_svd, TtScalar};
use crate::truncation::Truncation;
use scirs2_core::ndarray_ext::{Array2, Array3};
use tensorfact_core::{DenseND, Result, TtError, TtTensor};

/// TT-SVD to a relative tolerance
///
/// Returns Y with ‖A − Y‖ ≤ τ·‖A‖ and ranks chosen minimal per bond under
/// the even τ/√(d-1) error split.
///
/// # Arguments
///
/// * `size` - Mode sizes `[n₀, ..., n_{d-1}]`
/// * `array` - Dense array, column-major, length `∏ nₖ`
/// * `relative_tolerance` - τ ≥ 0; zero keeps full ranks
///
/// # Errors
///
/// `InvalidArgument` if the buffer length differs from `∏ size`, if `size`
/// is empty or contains a zero, or if τ is negative. `Linalg` if the SVD
/// backend fails.
///
/// # Examples
///
/// ```
/// use tensorfact_decomp::tt_svd;
///
/// // A(i, j, k) = 1 + i + j + k has TT-ranks [1, 2, 2, 1]
/// let size = [4, 5, 6];
/// let mut array = Vec::new();
/// for k in 0..6 {
///     for j in 0..5 {
///         for i in 0..4 {
///             array.push((1 + i + j + k) as f64);
///         }
///     }
/// }
///
/// let tt = tt_svd(&size, &array, 1e-10)?;
/// assert_eq!(tt.ranks(), &[1, 2, 2, 1]);
/// assert!((tt.eval(&[3, 4, 5])? - 13.0).abs() < 1e-10);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn tt_svd<T: TtScalar>(
    size: &[usize],
    array: &[T],
    relative_tolerance: f64,
) -> Result<TtTensor<T>> {
    tt_svd_with(size, array, Truncation::Tolerance(relative_tolerance))
}

/// TT-SVD with every interior bond capped at `max_rank`
///
/// # Errors
///
/// `InvalidArgument` if the buffer length differs from `∏ size`, if `size`
/// is empty or contains a zero, or if `max_rank` is zero.
pub fn tt_svd_max_rank<T: TtScalar>(
    size: &[usize],
    array: &[T],
    max_rank: usize,
) -> Result<TtTensor<T>> {
    tt_svd_with(size, array, Truncation::MaxRank(max_rank))
}

/// TT-SVD of a [`DenseND`]
pub fn tt_svd_dense<T: TtScalar>(
    tensor: &DenseND<T>,
    truncation: Truncation,
) -> Result<TtTensor<T>> {
    tt_svd_with(tensor.shape(), tensor.as_slice(), truncation)
}

/// TT-SVD under an explicit [`Truncation`] policy
pub fn tt_svd_with<T: TtScalar>(
    size: &[usize],
    array: &[T],
    truncation: Truncation,
) -> Result<TtTensor<T>> {
    truncation.validate()?;

    if size.is_empty() {
        return Err(TtError::InvalidArgument(
            "Size vector must have at least one mode".to_string(),
        ));
    }
    if let Some(k) = size.iter().position(|&n| n == 0) {
        return Err(TtError::InvalidArgument(format!("Mode {} has zero size", k)));
    }
    let total: usize = size.iter().product();
    if array.len() != total {
        return Err(TtError::InvalidArgument(format!(
            "Size {:?} requires {} elements, but the buffer has {}",
            size,
            total,
            array.len()
        )));
    }

    let n_modes = size.len();
    let norm = array.iter().map(|&x| x * x).sum::<T>().sqrt();

    if norm == T::zero() {
        log::debug!("TT-SVD of an all-zero array of size {:?}", size);
        return TtTensor::new(size, &vec![1; n_modes + 1]);
    }

    if n_modes == 1 {
        let core = Array3::from_shape_fn((1, 1, size[0]), |(_, _, i)| array[i]);
        return TtTensor::from_cores(vec![core]);
    }

    let threshold = truncation.bond_threshold(norm, n_modes);
    let mut cores = Vec::with_capacity(n_modes);

    // Remainder C as the (n₀ × rest) unfolding
    let mut c = Array2::from_shape_fn((size[0], total / size[0]), |(i, j)| array[i + size[0] * j]);
    let mut r_left = 1;

    for k in 0..n_modes - 1 {
        let n_k = size[k];
        let cols = c.ncols();

        let (u, sigma, vt) = thin_svd(&c).map_err(|e| match e {
            TtError::Linalg(msg) => TtError::Linalg(format!("mode {}: {}", k, msg)),
            other => other,
        })?;

        let sigma = sigma.to_vec();
        let r_right = truncation.select_rank(&sigma, threshold);
        log::debug!(
            "TT-SVD bond {}: kept rank {} of {} ({}x{} unfolding)",
            k + 1,
            r_right,
            sigma.len(),
            c.nrows(),
            cols
        );

        // Gₖ(α, β, i) = U(α + rₖ·i, β)
        let core =
            Array3::from_shape_fn((r_left, r_right, n_k), |(a, b, i)| u[[a + r_left * i, b]]);
        cores.push(core);

        // W = diag(σ)·Vᵀ, then fold the next mode into the rows
        let n_next = size[k + 1];
        let next_cols = cols / n_next;
        c = Array2::from_shape_fn((r_right * n_next, next_cols), |(row, j)| {
            let b = row % r_right;
            let i = row / r_right;
            sigma[b] * vt[[b, i + n_next * j]]
        });
        r_left = r_right;
    }

    // C is now (r_{d-1}·n_{d-1} × 1)
    let n_last = size[n_modes - 1];
    let last = Array3::from_shape_fn((r_left, 1, n_last), |(a, _, i)| c[[a + r_left * i, 0]]);
    cores.push(last);

    TtTensor::from_cores(cores)
}
