//! TT-rounding: rank reduction of an existing tensor train
//!
//! Applies a right-to-left orthogonalization followed by a left-to-right
//! truncated-SVD sweep (Oseledets 2011, Algorithm 2).
//!
//! After the first sweep cores 1..d-1 are right-orthonormal, so the norm of
//! the whole array equals the Frobenius norm of core 0 and the singular
//! values seen by the second sweep are those of the true bond unfoldings.
//! That makes the per-bond truncation rule identical to TT-SVD's.
//!
//! Rounding never increases a rank. It is the tool to call after additions,
//! which grow ranks additively.
//!
//! # Complexity
//!
//! Time: O(d × n × R³) where R = max TT-rank

use crate::linalg::{thin_qr, thin_svd, TtScalar};
use crate::truncation::Truncation;
use scirs2_core::ndarray_ext::{Array2, Array3, Axis};
use tensorfact_core::{Result, TtTensor};

/// Round to a relative tolerance
///
/// # Errors
///
/// `InvalidArgument` if τ is negative or non-finite; `Linalg` on backend
/// failure.
///
/// # Examples
///
/// ```
/// use tensorfact_core::DenseND;
/// use tensorfact_decomp::{tt_round, tt_svd};
///
/// let tensor = DenseND::<f64>::random_uniform(&[4, 4, 4], 0.0, 1.0);
/// let tt = tt_svd(tensor.shape(), tensor.as_slice(), 1e-12)?;
///
/// // X + X has doubled ranks; rounding brings them back
/// let doubled = tt.add(&tt)?;
/// let rounded = tt_round(&doubled, 1e-10)?;
/// assert_eq!(rounded.ranks(), tt.ranks());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn tt_round<T: TtScalar>(tt: &TtTensor<T>, relative_tolerance: f64) -> Result<TtTensor<T>> {
    tt_round_with(tt, Truncation::Tolerance(relative_tolerance))
}

/// Round with every interior bond capped at `max_rank`
///
/// # Errors
///
/// `InvalidArgument` if `max_rank` is zero.
pub fn tt_round_max_rank<T: TtScalar>(tt: &TtTensor<T>, max_rank: usize) -> Result<TtTensor<T>> {
    tt_round_with(tt, Truncation::MaxRank(max_rank))
}

/// Round a borrowed tensor train under an explicit [`Truncation`] policy
pub fn tt_round_with<T: TtScalar>(tt: &TtTensor<T>, truncation: Truncation) -> Result<TtTensor<T>> {
    truncation.validate()?;
    round_in_place(tt.clone(), truncation)
}

/// Round an owned tensor train, rewriting its cores
///
/// The input is consumed; on error nothing is returned.
pub fn round_in_place<T: TtScalar>(tt: TtTensor<T>, truncation: Truncation) -> Result<TtTensor<T>> {
    truncation.validate()?;

    let n_modes = tt.ndim();
    if n_modes == 1 {
        return Ok(tt);
    }

    let size = tt.size().to_vec();
    let input_ranks = tt.ranks().to_vec();
    let mut cores = tt.into_cores();

    // Step 1: right-to-left orthogonalization
    for k in (1..n_modes).rev() {
        let (r_left, r_right, n_k) = cores[k].dim();

        // Transposed unfolding: Gₖᵀ (r_right·n_k × r_left)
        let core = &cores[k];
        let mat_t = Array2::from_shape_fn((r_right * n_k, r_left), |(row, a)| {
            core[[a, row % r_right, row / r_right]]
        });

        // Gₖᵀ = Q·R, so Gₖ = Rᵀ·Qᵀ
        let (q, r_mat) = thin_qr(&mat_t)?;
        let m = q.ncols();

        cores[k] =
            Array3::from_shape_fn((m, r_right, n_k), |(a, b, i)| q[[b + r_right * i, a]]);

        // Absorb Rᵀ into the right bond of the previous core
        let prev = &cores[k - 1];
        let (p_left, _, p_n) = prev.dim();
        let r_t = r_mat.t();
        let mut absorbed = Array3::zeros((p_left, m, p_n));
        for i in 0..p_n {
            let slice = prev.index_axis(Axis(2), i).dot(&r_t);
            absorbed.index_axis_mut(Axis(2), i).assign(&slice);
        }
        cores[k - 1] = absorbed;
    }

    let norm = cores[0].iter().map(|&x| x * x).sum::<T>().sqrt();
    if norm == T::zero() {
        log::debug!("TT-rounding of a zero tensor train of size {:?}", size);
        return TtTensor::new(&size, &vec![1; n_modes + 1]);
    }

    let threshold = truncation.bond_threshold(norm, n_modes);

    // Step 2: left-to-right truncation
    for k in 0..n_modes - 1 {
        let (r_left, r_right, n_k) = cores[k].dim();

        // Left unfolding (r_left·n_k × r_right), left bond fastest
        let core = &cores[k];
        let mat = Array2::from_shape_fn((r_left * n_k, r_right), |(row, b)| {
            core[[row % r_left, b, row / r_left]]
        });

        let (u, sigma, vt) = thin_svd(&mat)?;
        let sigma = sigma.to_vec();
        let rank = truncation.select_rank(&sigma, threshold);
        log::debug!(
            "TT-rounding bond {}: rank {} -> {}",
            k + 1,
            input_ranks[k + 1],
            rank
        );

        cores[k] =
            Array3::from_shape_fn((r_left, rank, n_k), |(a, b, i)| u[[a + r_left * i, b]]);

        // Push diag(σ)·Vᵀ into the left bond of the next core
        let s_vt = Array2::from_shape_fn((rank, r_right), |(b, c)| sigma[b] * vt[[b, c]]);
        let next = &cores[k + 1];
        let (_, next_right, next_n) = next.dim();
        let mut pushed = Array3::zeros((rank, next_right, next_n));
        for i in 0..next_n {
            let slice = s_vt.dot(&next.index_axis(Axis(2), i));
            pushed.index_axis_mut(Axis(2), i).assign(&slice);
        }
        cores[k + 1] = pushed;
    }

    TtTensor::from_cores(cores)
}
