//! SVD and QR on top of `scirs2_linalg`
//!
//! Both factorizations come back in economy shape with k = min(m, n), and
//! backend failures surface as [`TtError::Linalg`].
//!
//! # SVD refinement
//!
//! The backend SVD is not accurate enough for error-controlled truncation
//! (reconstruction errors around 1e-5·‖A‖ on small tall matrices). It is used
//! only as a starting basis: the right singular vectors are orthonormalized
//! with QR and then polished by one-sided Jacobi (Hestenes) sweeps on the tall
//! orientation of A. The sweeps keep `W = A·V` with V orthogonal to working
//! precision, so the result satisfies ‖A − U·diag(σ)·Vᵀ‖ = O(ε)·‖A‖ no
//! matter how rough the starting basis was. If the backend basis is unusable
//! the sweeps start from the identity.
//!
//! # Wide QR
//!
//! `scirs2_linalg::qr` requires rows ≥ columns. A wide A = [A₁ A₂] with A₁
//! square is factored as A₁ = Q·R₁, giving R = [R₁ Qᵀ·A₂].

use scirs2_core::ndarray_ext::{s, Array1, Array2, ScalarOperand};
use scirs2_core::numeric::{Float, NumAssign, NumCast};
use scirs2_linalg::{qr, svd};
use std::fmt::{Debug, Display};
use std::iter::Sum;
use tensorfact_core::{Result, TtError};

/// Upper bound on Jacobi sweeps; a warm start converges in two or three
const MAX_SWEEPS: usize = 60;

/// Element types accepted by the factorization routines (`f32`, `f64`)
pub trait TtScalar:
    Float + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + Debug + Display + 'static
{
}

impl<T> TtScalar for T where
    T: Float + NumCast + NumAssign + Sum + Send + Sync + ScalarOperand + Debug + Display + 'static
{
}

/// Economy SVD: A (m × n) = U · diag(σ) · Vᵀ with k = min(m, n)
///
/// Returns U (m × k), σ (k, descending, non-negative) and Vᵀ (k × n).
/// Columns of U belonging to a zero singular value are zero.
///
/// # Errors
///
/// `Linalg` if the backend fails or the sweeps do not converge.
pub fn thin_svd<T: TtScalar>(a: &Array2<T>) -> Result<(Array2<T>, Array1<T>, Array2<T>)> {
    let (m, n) = a.dim();
    let k = m.min(n);

    let (u0, _, vt0) = svd(&a.view(), false, None)
        .map_err(|e| TtError::Linalg(format!("SVD of {}x{} matrix failed: {}", m, n, e)))?;

    if m >= n {
        // tall: polish the right singular vectors of A
        let start = (vt0.nrows() >= k && vt0.ncols() == n)
            .then(|| vt0.slice(s![..k, ..]).t().to_owned());
        let (u, sigma, v) = jacobi_svd(a, start)?;
        Ok((u, sigma, v.t().to_owned()))
    } else {
        // wide: Aᵀ = V·Σ·Uᵀ, whose right singular vectors are the left ones of A
        let start =
            (u0.nrows() == m && u0.ncols() >= k).then(|| u0.slice(s![.., ..k]).to_owned());
        let at = a.t().to_owned();
        let (v, sigma, u) = jacobi_svd(&at, start)?;
        Ok((u, sigma, v.t().to_owned()))
    }
}

/// Economy QR: A (m × n) = Q · R with k = min(m, n)
///
/// Returns Q (m × k) with orthonormal columns and R (k × n).
pub fn thin_qr<T: TtScalar>(a: &Array2<T>) -> Result<(Array2<T>, Array2<T>)> {
    let (m, n) = a.dim();
    if m >= n {
        return tall_qr(a);
    }

    let (q, r_head) = tall_qr(&a.slice(s![.., ..m]).to_owned())?;
    let r_tail = q.t().dot(&a.slice(s![.., m..]));

    let mut r = Array2::zeros((m, n));
    r.slice_mut(s![.., ..m]).assign(&r_head);
    r.slice_mut(s![.., m..]).assign(&r_tail);
    Ok((q, r))
}

fn tall_qr<T: TtScalar>(a: &Array2<T>) -> Result<(Array2<T>, Array2<T>)> {
    let (m, n) = a.dim();

    let (q, r) = qr(&a.view(), None)
        .map_err(|e| TtError::Linalg(format!("QR of {}x{} matrix failed: {}", m, n, e)))?;

    if q.nrows() != m || q.ncols() < n || r.nrows() < n || r.ncols() != n {
        return Err(TtError::Linalg(format!(
            "QR of {}x{} matrix returned factors of shape {:?}, {:?}",
            m,
            n,
            q.dim(),
            r.dim()
        )));
    }

    Ok((
        q.slice(s![.., ..n]).to_owned(),
        r.slice(s![..n, ..]).to_owned(),
    ))
}

/// One-sided Jacobi SVD of a tall matrix (rows ≥ cols)
///
/// Returns U (m × n), σ and V (n × n), sorted by descending σ.
fn jacobi_svd<T: TtScalar>(
    a: &Array2<T>,
    start: Option<Array2<T>>,
) -> Result<(Array2<T>, Array1<T>, Array2<T>)> {
    let (m, n) = a.dim();
    let eps = T::epsilon();

    let mut v = start
        .and_then(|basis| orthonormal_basis(&basis))
        .unwrap_or_else(|| Array2::eye(n));
    let mut w = a.dot(&v);

    let tol = eps * <T as NumCast>::from(m).unwrap_or_else(T::one);
    let mut converged = false;

    for _ in 0..MAX_SWEEPS {
        let mut rotated = false;
        for p in 0..n {
            for q in p + 1..n {
                let (alpha, beta, gamma) = {
                    let wp = w.column(p);
                    let wq = w.column(q);
                    (wp.dot(&wp), wq.dot(&wq), wp.dot(&wq))
                };
                if gamma == T::zero() || gamma.abs() <= tol * (alpha * beta).sqrt() {
                    continue;
                }
                rotated = true;

                let two = T::one() + T::one();
                let zeta = (beta - alpha) / (two * gamma);
                let t = zeta.signum() / (zeta.abs() + (T::one() + zeta * zeta).sqrt());
                let c = T::one() / (T::one() + t * t).sqrt();
                let sn = c * t;

                rotate_columns(&mut w, p, q, c, sn);
                rotate_columns(&mut v, p, q, c, sn);
            }
        }
        if !rotated {
            converged = true;
            break;
        }
    }

    if !converged {
        return Err(TtError::Linalg(format!(
            "Jacobi SVD of {}x{} matrix did not converge in {} sweeps",
            m, n, MAX_SWEEPS
        )));
    }

    let norms: Vec<T> = (0..n).map(|j| w.column(j).dot(&w.column(j)).sqrt()).collect();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&i, &j| {
        norms[j]
            .partial_cmp(&norms[i])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let sigma = Array1::from_shape_fn(n, |j| norms[order[j]]);
    let u = Array2::from_shape_fn((m, n), |(i, j)| {
        let s = norms[order[j]];
        if s > T::zero() {
            w[[i, order[j]]] / s
        } else {
            T::zero()
        }
    });
    let v_sorted = Array2::from_shape_fn((n, n), |(i, j)| v[[i, order[j]]]);

    Ok((u, sigma, v_sorted))
}

/// [W_p W_q] ← [W_p W_q] · [[c, s], [-s, c]]
fn rotate_columns<T: TtScalar>(w: &mut Array2<T>, p: usize, q: usize, c: T, s: T) {
    for i in 0..w.nrows() {
        let wp = w[[i, p]];
        let wq = w[[i, q]];
        w[[i, p]] = c * wp - s * wq;
        w[[i, q]] = s * wp + c * wq;
    }
}

/// Q factor of a square starting basis, if it is orthogonal to working
/// precision
fn orthonormal_basis<T: TtScalar>(basis: &Array2<T>) -> Option<Array2<T>> {
    let n = basis.nrows();
    if basis.ncols() != n || basis.iter().any(|x| !x.is_finite()) {
        return None;
    }

    let (q, _) = tall_qr(basis).ok()?;
    let gram = q.t().dot(&q);
    let limit = T::epsilon() * <T as NumCast>::from(64 * n.max(1)).unwrap_or_else(T::one);
    let orthogonal = gram.indexed_iter().all(|((i, j), &g)| {
        let target = if i == j { T::one() } else { T::zero() };
        (g - target).abs() <= limit
    });

    orthogonal.then_some(q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;
    use tensorfact_core::DenseND;

    fn max_abs_diff(a: &Array2<f64>, b: &Array2<f64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max)
    }

    fn frobenius(a: &Array2<f64>) -> f64 {
        a.iter().map(|x| x * x).sum::<f64>().sqrt()
    }

    fn random_matrix(m: usize, n: usize) -> Array2<f64> {
        let dense = DenseND::<f64>::random_uniform(&[m, n], -1.0, 1.0);
        Array2::from_shape_vec((m, n), dense.into_vec()).unwrap()
    }

    fn check_svd(a: &Array2<f64>) {
        let (m, n) = a.dim();
        let k = m.min(n);
        let (u, sigma, vt) = thin_svd(a).unwrap();

        assert_eq!(u.dim(), (m, k));
        assert_eq!(sigma.len(), k);
        assert_eq!(vt.dim(), (k, n));
        for j in 1..k {
            assert!(sigma[j - 1] >= sigma[j]);
        }

        let us = Array2::from_shape_fn((m, k), |(i, j)| u[[i, j]] * sigma[j]);
        let err = frobenius(&(&us.dot(&vt) - a));
        assert!(err <= 1e-12 * frobenius(a), "{}x{}: error {}", m, n, err);

        assert!(max_abs_diff(&u.t().dot(&u), &Array2::eye(k)) < 1e-12);
        assert!(max_abs_diff(&vt.dot(&vt.t()), &Array2::eye(k)) < 1e-12);
    }

    #[test]
    fn test_thin_svd_shapes_and_reconstruction() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        check_svd(&a);
    }

    #[test]
    fn test_thin_svd_random_tall_wide_square() {
        for &(m, n) in &[(20, 3), (3, 20), (6, 6), (12, 1), (1, 9)] {
            check_svd(&random_matrix(m, n));
        }
    }

    #[test]
    fn test_thin_svd_rank_deficient() {
        // rank 2: every row is a combination of (1, 0, 1, 0) and (0, 1, 0, 1)
        let a = Array2::from_shape_fn((8, 4), |(i, j)| {
            let a0 = (i + 1) as f64;
            let a1 = (i * i) as f64 - 3.0;
            if j % 2 == 0 {
                a0
            } else {
                a1
            }
        });
        let (_, sigma, _) = thin_svd(&a).unwrap();

        assert!(sigma[1] > 1.0);
        assert!(sigma[2] < 1e-12 * sigma[0]);
        assert!(sigma[3] < 1e-12 * sigma[0]);
    }

    #[test]
    fn test_thin_svd_zero_matrix() {
        let a = Array2::<f64>::zeros((3, 5));
        let (u, sigma, vt) = thin_svd(&a).unwrap();

        assert!(sigma.iter().all(|&s| s == 0.0));
        assert_eq!(u.dim(), (3, 3));
        assert_eq!(vt.dim(), (3, 5));
    }

    #[test]
    fn test_thin_qr_tall() {
        let a = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0], [7.0, 8.0]];
        let (q, r) = thin_qr(&a).unwrap();

        assert_eq!(q.dim(), (4, 2));
        assert_eq!(r.dim(), (2, 2));

        let gram = q.t().dot(&q);
        assert!(max_abs_diff(&gram, &Array2::eye(2)) < 1e-12);
        assert!(max_abs_diff(&q.dot(&r), &a) < 1e-12);
    }

    #[test]
    fn test_thin_qr_wide() {
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let (q, r) = thin_qr(&a).unwrap();

        assert_eq!(q.dim(), (2, 2));
        assert_eq!(r.dim(), (2, 3));
        assert!(max_abs_diff(&q.t().dot(&q), &Array2::eye(2)) < 1e-12);
        assert!(max_abs_diff(&q.dot(&r), &a) < 1e-12);
    }

    #[test]
    fn test_thin_qr_random_wide() {
        for &(m, n) in &[(2, 6), (3, 4), (4, 8), (1, 5)] {
            let a = random_matrix(m, n);
            let (q, r) = thin_qr(&a).unwrap();

            assert_eq!(q.dim(), (m, m));
            assert_eq!(r.dim(), (m, n));
            assert!(max_abs_diff(&q.t().dot(&q), &Array2::eye(m)) < 1e-12);
            assert!(max_abs_diff(&q.dot(&r), &a) < 1e-12);
        }
    }
}
