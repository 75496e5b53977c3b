//! Integration tests for TT-vectors
//!
//! These tests exercise the public container and arithmetic API on the
//! index-sum tensor X(i₀, ..., i_{d-1}) = i₀ + ... + i_{d-1}.

use scirs2_core::ndarray_ext::Array3;
use tensorfact_core::{arith, TtError, TtVector};

/// Create a TT-vector with X(i₀, ..., i_{d-1}) = i₀ + ... + i_{d-1}
fn create_test_tt_vector(dims: &[usize]) -> TtVector<f64> {
    let ndim = dims.len();
    let mut cores = Vec::with_capacity(ndim);

    let mut first = Array3::zeros((1, 2, dims[0]));
    for i in 0..dims[0] {
        first[[0, 0, i]] = i as f64;
        first[[0, 1, i]] = 1.0;
    }
    cores.push(first);

    for &n in &dims[1..ndim - 1] {
        let mut core = Array3::zeros((2, 2, n));
        for i in 0..n {
            core[[0, 0, i]] = 1.0;
            core[[1, 0, i]] = i as f64;
            core[[0, 1, i]] = 0.0;
            core[[1, 1, i]] = 1.0;
        }
        cores.push(core);
    }

    let mut last = Array3::zeros((2, 1, dims[ndim - 1]));
    for i in 0..dims[ndim - 1] {
        last[[0, 0, i]] = 1.0;
        last[[1, 0, i]] = i as f64;
    }
    cores.push(last);

    TtVector::from_cores(cores).unwrap()
}

fn assert_evaluates_to(tt: &TtVector<f64>, factor: f64) {
    for l in 0..4 {
        for k in 0..6 {
            for j in 0..3 {
                for i in 0..5 {
                    let value = tt.eval(&[i, j, k, l]).unwrap();
                    let expected = factor * (i + j + k + l) as f64;
                    assert!(
                        (value - expected).abs() < 1e-15,
                        "X({}, {}, {}, {}) = {}, expected {}",
                        i,
                        j,
                        k,
                        l,
                        value,
                        expected
                    );
                }
            }
        }
    }
}

#[test]
fn test_construct_from_dims_and_ranks() {
    let tt = TtVector::<f64>::new(&[3, 7, 5], &[1, 2, 3, 1]).unwrap();

    assert_eq!(tt.ndim(), 3);
    assert_eq!(tt.size(), &[3, 7, 5]);
    assert_eq!(tt.ranks(), &[1, 2, 3, 1]);
    assert_eq!(tt.max_rank(), 3);

    assert_eq!(tt.core(0).unwrap(), &Array3::<f64>::zeros((1, 2, 3)));
    assert_eq!(tt.core(1).unwrap(), &Array3::<f64>::zeros((2, 3, 7)));
    assert_eq!(tt.core(2).unwrap(), &Array3::<f64>::zeros((3, 1, 5)));
}

#[test]
fn test_construct_from_cores() {
    let tt = create_test_tt_vector(&[5, 3, 6, 4]);

    assert_eq!(tt.ndim(), 4);
    assert_eq!(tt.size(), &[5, 3, 6, 4]);
    assert_eq!(tt.ranks(), &[1, 2, 2, 2, 1]);
    assert_eq!(tt.max_rank(), 2);

    assert_evaluates_to(&tt, 1.0);
}

#[test]
fn test_scalar_multiplication() {
    let tt = create_test_tt_vector(&[5, 3, 6, 4]);
    let doubled = tt.scale(2.0);

    assert_evaluates_to(&doubled, 2.0);
}

#[test]
fn test_vector_addition() {
    let tt1 = create_test_tt_vector(&[5, 3, 6, 4]).scale(5.0);
    let tt2 = arith::scale(&create_test_tt_vector(&[5, 3, 6, 4]), -2.0);

    let sum = tt1.add(&tt2).unwrap();

    assert_eq!(sum.ranks(), &[1, 4, 4, 4, 1]);
    assert_evaluates_to(&sum, 3.0);
}

#[test]
fn test_addition_rejects_mismatched_sizes() {
    let tt1 = create_test_tt_vector(&[5, 3, 6, 4]);
    let tt2 = create_test_tt_vector(&[5, 3, 4]);

    assert!(matches!(tt1.add(&tt2), Err(TtError::InvalidArgument(_))));
}

#[test]
fn test_eval_out_of_range() {
    let tt = create_test_tt_vector(&[5, 3, 6, 4]);

    assert!(matches!(tt.eval(&[0, 3, 0, 0]), Err(TtError::OutOfRange(_))));
    assert!(matches!(tt.eval(&[0, 0]), Err(TtError::InvalidArgument(_))));
}

#[test]
fn test_full_reconstruction_is_column_major() {
    let tt = create_test_tt_vector(&[5, 3, 6, 4]);
    let dense = tt.full();

    assert_eq!(dense.shape(), &[5, 3, 6, 4]);
    for (offset, &value) in dense.as_slice().iter().enumerate() {
        let i = offset % 5;
        let j = (offset / 5) % 3;
        let k = (offset / 15) % 6;
        let l = offset / 90;
        assert!((value - (i + j + k + l) as f64).abs() < 1e-14);
    }
}
