//! # tensorfact-decomp - Tensor-Train Factorization and Rounding
//!
//! SVD-based algorithms that produce and recompress tensor trains.
//!
//! ## Overview
//!
//! A tensor train represents a d-way array as a chain of 3-way cores:
//!
//! ```text
//! X(i₀,...,i_{d-1}) = G₀[i₀] × G₁[i₁] × ... × G_{d-1}[i_{d-1}]
//! ```
//!
//! This crate provides the two algorithms that need linear algebra:
//!
//! - `tt_svd`: Sequential SVD with rank truncation, dense array to TT
//! - `tt_round`: Orthogonalize then truncate, TT to lower-rank TT
//!
//! Both accept either a relative tolerance τ, guaranteeing
//! ‖X − Y‖ ≤ τ·‖X‖, or a per-bond rank budget (see [`Truncation`]).
//!
//! ## Quick Start
//!
//! ```
//! use tensorfact_core::DenseND;
//! use tensorfact_decomp::{tt_round, tt_svd, utils::tt_stats};
//!
//! let tensor = DenseND::<f64>::random_uniform(&[8, 8, 8, 8], 0.0, 1.0);
//!
//! // TT-SVD to 10% relative accuracy
//! let tt = tt_svd(tensor.shape(), tensor.as_slice(), 0.1)?;
//! println!("TT-ranks: {:?}", tt.ranks());
//!
//! // Addition doubles the ranks; rounding brings them back down
//! let sum = tt.add(&tt)?;
//! let rounded = tt_round(&sum, 1e-8)?;
//! assert!(rounded.max_rank() <= tt.max_rank());
//!
//! let stats = tt_stats(&tensor, &tt)?;
//! println!("Compression: {:.2}x", stats.compression_ratio);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## SciRS2 Integration
//!
//! SVD and QR come from `scirs2_linalg`, arrays from
//! `scirs2_core::ndarray_ext`.
//!
//! ## Logging
//!
//! Chosen bond ranks are reported at `debug` level through the `log` facade.
//!
//! ## References
//!
//! - Oseledets (2011), "Tensor-Train Decomposition"

pub mod linalg;
pub mod round;
pub mod truncation;
pub mod tt_svd;
pub mod utils;


// Re-exports
pub use linalg::TtScalar;
pub use round::*;
pub use truncation::*;
pub use tt_svd::*;
pub use utils::{relative_error, tt_stats, TtStats};
