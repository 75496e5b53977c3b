//! Closed-form TT arithmetic
//!
//! Scaling, addition and linear combinations are structural operations on
//! the cores: no SVD and no element-by-element work. Addition is exact but
//! rank-additive, so long chains of additions should be followed by
//! rounding (`tensorfact_decomp::tt_round`).
//!
//! # Addition layout
//!
//! For Z = X + Y with cores Xₖ, Yₖ, every mode slice of Zₖ is:
//!
//! ```text
//! first core:     [X₀[i]  Y₀[i]]            (concatenated along right bond)
//! interior cores: [Xₖ[i]    0  ]
//!                 [  0    Yₖ[i]]            (block diagonal)
//! last core:      [X_{d-1}[i]]
//!                 [Y_{d-1}[i]]              (concatenated along left bond)
//! ```

use crate::error::{Result, TtError};
use crate::tt::TtTensor;
use scirs2_core::ndarray_ext::{s, Array2, Array3, Axis};
use scirs2_core::numeric::{Float, NumCast};

/// Multiply a TT-tensor by a scalar
///
/// Only the first core is scaled; the remaining cores are copied. Ranks
/// and sizes are unchanged.
///
/// # Examples
///
/// ```
/// use tensorfact_core::{arith, TtTensor};
/// use scirs2_core::ndarray_ext::Array3;
///
/// let core = Array3::from_elem((1, 1, 3), 2.0);
/// let tt = TtTensor::from_cores(vec![core]).unwrap();
/// let scaled = arith::scale(&tt, -1.5);
/// assert_eq!(scaled.eval(&[1]).unwrap(), -3.0);
/// ```
pub fn scale<T>(tt: &TtTensor<T>, alpha: T) -> TtTensor<T>
where
    T: Float + NumCast + 'static,
{
    let mut scaled = tt.clone();
    scaled.first_core_mut().mapv_inplace(|x| x * alpha);
    scaled
}

/// Add two TT-tensors of the same size
///
/// The interior ranks of the result are `x.ranks()[k] + y.ranks()[k]`.
///
/// # Errors
///
/// `InvalidArgument` if `x.size() != y.size()`.
pub fn add<T>(x: &TtTensor<T>, y: &TtTensor<T>) -> Result<TtTensor<T>>
where
    T: Float + NumCast + 'static,
{
    if x.size() != y.size() {
        return Err(TtError::InvalidArgument(format!(
            "Cannot add TT-tensors of sizes {:?} and {:?}",
            x.size(),
            y.size()
        )));
    }

    let ndim = x.ndim();
    if ndim == 1 {
        let sum = &x.cores()[0] + &y.cores()[0];
        return TtTensor::from_cores(vec![sum]);
    }

    let mut cores = Vec::with_capacity(ndim);
    for (k, (xc, yc)) in x.cores().iter().zip(y.cores().iter()).enumerate() {
        let (xl, xr, n) = xc.dim();
        let (yl, yr, _) = yc.dim();

        let core = if k == 0 {
            let mut core = Array3::zeros((1, xr + yr, n));
            core.slice_mut(s![.., ..xr, ..]).assign(xc);
            core.slice_mut(s![.., xr.., ..]).assign(yc);
            core
        } else if k == ndim - 1 {
            let mut core = Array3::zeros((xl + yl, 1, n));
            core.slice_mut(s![..xl, .., ..]).assign(xc);
            core.slice_mut(s![xl.., .., ..]).assign(yc);
            core
        } else {
            let mut core = Array3::zeros((xl + yl, xr + yr, n));
            core.slice_mut(s![..xl, ..xr, ..]).assign(xc);
            core.slice_mut(s![xl.., xr.., ..]).assign(yc);
            core
        };
        cores.push(core);
    }

    TtTensor::from_cores(cores)
}

/// Subtract `y` from `x`
///
/// # Errors
///
/// `InvalidArgument` if `x.size() != y.size()`.
pub fn sub<T>(x: &TtTensor<T>, y: &TtTensor<T>) -> Result<TtTensor<T>>
where
    T: Float + NumCast + 'static,
{
    add(x, &scale(y, -T::one()))
}

/// Linear combination `a·x + b·y`
///
/// # Errors
///
/// `InvalidArgument` if `x.size() != y.size()`.
pub fn axpby<T>(a: T, x: &TtTensor<T>, b: T, y: &TtTensor<T>) -> Result<TtTensor<T>>
where
    T: Float + NumCast + 'static,
{
    add(&scale(x, a), &scale(y, b))
}

/// Inner product ⟨x, y⟩ = Σ x(i)·y(i) computed without forming dense arrays
///
/// Sweeps left to right carrying the transfer matrix
/// Wₖ₊₁ = Σᵢ Xₖ\[i\]ᵀ · Wₖ · Yₖ\[i\], starting from W₀ = \[1\].
///
/// # Errors
///
/// `InvalidArgument` if `x.size() != y.size()`.
///
/// # Complexity
///
/// Time: O(d × n × R³)
pub fn inner<T>(x: &TtTensor<T>, y: &TtTensor<T>) -> Result<T>
where
    T: Float + NumCast + 'static,
{
    if x.size() != y.size() {
        return Err(TtError::InvalidArgument(format!(
            "Cannot take inner product of TT-tensors of sizes {:?} and {:?}",
            x.size(),
            y.size()
        )));
    }

    Ok(transfer_sweep(x, y))
}

/// Left-to-right transfer-matrix contraction; sizes must already agree
pub(crate) fn transfer_sweep<T>(x: &TtTensor<T>, y: &TtTensor<T>) -> T
where
    T: Float + NumCast + 'static,
{
    let mut w: Array2<T> = Array2::from_elem((1, 1), T::one());
    for (xc, yc) in x.cores().iter().zip(y.cores().iter()) {
        let (_, xr, n) = xc.dim();
        let (_, yr, _) = yc.dim();
        let mut next = Array2::zeros((xr, yr));
        for i in 0..n {
            let xs = xc.index_axis(Axis(2), i);
            let ys = yc.index_axis(Axis(2), i);
            next = next + xs.t().dot(&w).dot(&ys);
        }
        w = next;
    }

    w[[0, 0]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tt::tests::index_sum_tt;

    fn for_each_index(size: &[usize], mut f: impl FnMut(&[usize])) {
        let total: usize = size.iter().product();
        let mut idx = vec![0usize; size.len()];
        for _ in 0..total {
            f(&idx);
            for (k, i) in idx.iter_mut().enumerate() {
                *i += 1;
                if *i < size[k] {
                    break;
                }
                *i = 0;
            }
        }
    }

    #[test]
    fn test_scalar_multiplication() {
        let size = [5, 3, 6, 4];
        let tt = index_sum_tt(&size);
        let doubled = scale(&tt, 2.0);

        assert_eq!(doubled.ranks(), tt.ranks());
        assert_eq!(doubled.size(), tt.size());
        // only the first core changes
        for k in 1..4 {
            assert_eq!(doubled.core(k), tt.core(k));
        }

        for_each_index(&size, |idx| {
            let expected = 2.0 * idx.iter().sum::<usize>() as f64;
            assert!((doubled.eval(idx).unwrap() - expected).abs() < 1e-15);
        });
    }

    #[test]
    fn test_addition() {
        let size = [5, 3, 6, 4];
        let x = scale(&index_sum_tt(&size), 5.0);
        let y = scale(&index_sum_tt(&size), -2.0);
        let z = add(&x, &y).unwrap();

        assert_eq!(z.ranks(), &[1, 4, 4, 4, 1]);

        for_each_index(&size, |idx| {
            let expected = 3.0 * idx.iter().sum::<usize>() as f64;
            assert!((z.eval(idx).unwrap() - expected).abs() < 1e-13);
        });
    }

    #[test]
    fn test_addition_mixed_ranks() {
        let size = [3, 4, 2];
        let x = index_sum_tt(&size);
        let y = TtTensor::<f64>::new(&size, &[1, 3, 1, 1]).unwrap();
        let z = add(&x, &y).unwrap();
        assert_eq!(z.ranks(), &[1, 5, 3, 1]);

        for_each_index(&size, |idx| {
            let expected = x.eval(idx).unwrap() + y.eval(idx).unwrap();
            assert!((z.eval(idx).unwrap() - expected).abs() < 1e-14);
        });
    }

    #[test]
    fn test_addition_single_mode() {
        let mut a = Array3::zeros((1, 1, 3));
        let mut b = Array3::zeros((1, 1, 3));
        for i in 0..3 {
            a[[0, 0, i]] = i as f64;
            b[[0, 0, i]] = 10.0;
        }
        let x = TtTensor::from_cores(vec![a]).unwrap();
        let y = TtTensor::from_cores(vec![b]).unwrap();
        let z = add(&x, &y).unwrap();
        assert_eq!(z.ranks(), &[1, 1]);
        assert_eq!(z.eval(&[2]).unwrap(), 12.0);
    }

    #[test]
    fn test_addition_size_mismatch() {
        let x = index_sum_tt(&[5, 3, 6, 4]);
        let y = index_sum_tt(&[5, 3, 6, 5]);
        assert!(matches!(add(&x, &y), Err(TtError::InvalidArgument(_))));
        assert!(matches!(inner(&x, &y), Err(TtError::InvalidArgument(_))));
    }

    #[test]
    fn test_sub_and_axpby() {
        let size = [4, 3, 5];
        let x = index_sum_tt(&size);
        let diff = sub(&x, &x).unwrap();
        let combo = axpby(3.0, &x, -1.0, &x).unwrap();

        for_each_index(&size, |idx| {
            assert!(diff.eval(idx).unwrap().abs() < 1e-13);
            let expected = 2.0 * idx.iter().sum::<usize>() as f64;
            assert!((combo.eval(idx).unwrap() - expected).abs() < 1e-13);
        });
    }

    #[test]
    fn test_inner_matches_dense() {
        let size = [3, 4, 5];
        let x = index_sum_tt(&size);
        let y = scale(&index_sum_tt(&size), 0.5);

        let xd = x.full();
        let yd = y.full();
        let expected: f64 = xd
            .as_slice()
            .iter()
            .zip(yd.as_slice())
            .map(|(a, b)| a * b)
            .sum();

        let ip = inner(&x, &y).unwrap();
        assert!((ip - expected).abs() < 1e-10 * expected.abs());
    }
}
