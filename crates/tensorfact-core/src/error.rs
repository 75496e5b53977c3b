//! Error type shared by the tensor-train crates

use thiserror::Error;

/// Errors raised by tensor-train construction, arithmetic and factorization
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TtError {
    /// Malformed size/rank vectors, bad tolerance or rank budget,
    /// mismatched operands or a buffer whose length disagrees with its size
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Multi-index outside the declared size bounds
    #[error("Index out of range: {0}")]
    OutOfRange(String),

    /// Failure reported by the SVD/QR backend
    #[error("Linear algebra error: {0}")]
    Linalg(String),
}

/// Result alias used throughout the tensor-train crates
pub type Result<T> = std::result::Result<T, TtError>;
