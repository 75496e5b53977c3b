//! # tensorfact-core
//!
//! Tensor-train (TT) containers and closed-form TT arithmetic.
//!
//! This crate provides the data-structure half of the tensorfact stack:
//!
//! - **TT container** ([`TtTensor`]) with validated construction from
//!   sizes/ranks or from cores, rank queries and multi-index evaluation
//! - **Arithmetic** ([`arith`]): scaling, addition, subtraction, linear
//!   combinations and inner products, all exact and SVD-free
//! - **Dense tensors** ([`DenseND`]) in column-major order, used as TT-SVD
//!   input and as the target of full reconstruction
//!
//! Factorization (TT-SVD) and recompression (rounding) live in
//! `tensorfact-decomp`.
//!
//! ## Core Layout
//!
//! Core k has shape `(ranks[k], ranks[k+1], size[k])`, i.e. (left bond,
//! right bond, mode index), and an entry is the product of the mode slices:
//!
//! ```
//! use tensorfact_core::TtTensor;
//! use scirs2_core::ndarray_ext::Array3;
//!
//! // X(i, j) = (i + 1) * (j + 1), a rank-1 matrix
//! let mut a = Array3::zeros((1, 1, 3));
//! let mut b = Array3::zeros((1, 1, 4));
//! for i in 0..3 { a[[0, 0, i]] = (i + 1) as f64; }
//! for j in 0..4 { b[[0, 0, j]] = (j + 1) as f64; }
//!
//! let tt = TtTensor::from_cores(vec![a, b])?;
//! assert_eq!(tt.ranks(), &[1, 1, 1]);
//! assert_eq!(tt.eval(&[2, 3])?, 12.0);
//!
//! let sum = tt.add(&tt.scale(2.0))?;
//! assert_eq!(sum.ranks(), &[1, 2, 1]);
//! assert_eq!(sum.eval(&[2, 3])?, 36.0);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! TT operations return [`Result`] with a typed [`TtError`]; dense-tensor
//! construction returns `anyhow::Result`.

pub mod arith;
pub mod dense;
pub mod error;
pub mod tt;


pub use dense::DenseND;
pub use error::{Result, TtError};
pub use tt::{TtTensor, TtVector};
