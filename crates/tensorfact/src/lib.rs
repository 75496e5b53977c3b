//! # tensorfact - Tensor-Train Factorization
//!
//! Low-rank tensor-train (TT) representation of high-order arrays, with
//! TT-SVD compression, exact arithmetic in TT format and rounding.
//!
//! This is the **meta crate** that re-exports the tensorfact components.
//!
//! ## Quick Start
//!
//! ```
//! use tensorfact::prelude::*;
//!
//! let tensor = DenseND::<f64>::random_uniform(&[6, 6, 6, 6], 0.0, 1.0);
//!
//! let tt = tt_svd(tensor.shape(), tensor.as_slice(), 1e-2)?;
//! let twice = tt.add(&tt)?;
//! let rounded = tt_round(&twice, 1e-8)?;
//!
//! assert_eq!(rounded.size(), &[6, 6, 6, 6]);
//! assert!(relative_error(&tensor, &rounded.scale(0.5))? <= 1e-2 + 1e-6);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### TT Container and Arithmetic ([`core`])
//!
//! [`TtTensor`](core::TtTensor) with validated construction, evaluation,
//! full reconstruction and closed-form scale/add/inner product.
//!
//! ```
//! use tensorfact::core::TtVector;
//!
//! let tt = TtVector::<f64>::new(&[3, 7, 5], &[1, 2, 3, 1]).unwrap();
//! assert_eq!(tt.max_rank(), 3);
//! assert_eq!(tt.eval(&[2, 6, 4]).unwrap(), 0.0);
//! ```
//!
//! ### Factorization and Rounding ([`decomp`])
//!
//! TT-SVD and TT rounding under a relative tolerance or a rank budget.
//!
//! ```
//! use tensorfact::decomp::{tt_svd_with, Truncation};
//!
//! let data: Vec<f64> = (0..24).map(|x| x as f64).collect();
//! let tt = tt_svd_with(&[2, 3, 4], &data, Truncation::max_rank(1)).unwrap();
//! assert_eq!(tt.ranks(), &[1, 1, 1, 1]);
//! ```
//!
//! ## Features
//!
//! - `serde`: Serialize/deserialize dense tensors and truncation policies

pub use tensorfact_core as core;
pub use tensorfact_decomp as decomp;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use tensorfact::prelude::*;
    //!
    //! let tt = TtTensor::<f64>::new(&[4, 4], &[1, 2, 1]).unwrap();
    //! ```

    // Core types
    pub use crate::core::{arith, DenseND, TtError, TtTensor, TtVector};

    // Factorization and rounding
    pub use crate::decomp::{
        relative_error, tt_round, tt_round_max_rank, tt_stats, tt_svd, tt_svd_max_rank,
        Truncation,
    };
}
