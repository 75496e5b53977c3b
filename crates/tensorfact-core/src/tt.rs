//! Tensor-train container
//!
//! A tensor train (TT) represents a d-way array as a chain of 3-way cores:
//!
//! X(i₀, i₁, ..., i_{d-1}) = G₀\[i₀\] × G₁\[i₁\] × ... × G_{d-1}\[i_{d-1}\]
//!
//! Where:
//! - Gₖ is a TT-core with shape (rₖ, rₖ₊₁, nₖ): (left bond, right bond, mode)
//! - Gₖ\[i\] is the rₖ × rₖ₊₁ matrix slice at mode index i
//! - r₀ = r_d = 1 (boundary conditions), so the product is 1 × 1
//!
//! Storage is Σₖ rₖ·nₖ·rₖ₊₁ instead of ∏ₖ nₖ.
//!
//! The container enforces the shape invariant on construction and exposes
//! no mutable access to individual cores. Arithmetic lives in
//! [`crate::arith`]; SVD-based factorization and rounding live in
//! `tensorfact-decomp`.

use crate::dense::DenseND;
use crate::error::{Result, TtError};
use scirs2_core::ndarray_ext::{s, Array2, Array3, Axis};
use scirs2_core::numeric::{Float, NumCast};

/// Tensor in TT format
///
/// # Structure
///
/// Each core `cores[k]` has shape `(ranks[k], ranks[k+1], size[k])` where:
/// - `ranks[k]` is the left TT-rank
/// - `ranks[k+1]` is the right TT-rank
/// - `size[k]` is the mode size
///
/// Boundary conditions: `ranks[0] = ranks[d] = 1`
///
/// # Examples
///
/// ```
/// use tensorfact_core::TtTensor;
///
/// let tt = TtTensor::<f64>::new(&[3, 7, 5], &[1, 2, 3, 1]).unwrap();
/// assert_eq!(tt.ndim(), 3);
/// assert_eq!(tt.max_rank(), 3);
/// assert_eq!(tt.core(1).unwrap().dim(), (2, 3, 7));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TtTensor<T> {
    cores: Vec<Array3<T>>,
    size: Vec<usize>,
    ranks: Vec<usize>,
}

/// A tensor train with one mode index per core
pub type TtVector<T> = TtTensor<T>;

impl<T> TtTensor<T>
where
    T: Float + NumCast + 'static,
{
    /// Create a TT-tensor with zero-filled cores
    ///
    /// # Arguments
    ///
    /// * `size` - Mode sizes `[n₀, ..., n_{d-1}]`
    /// * `ranks` - TT-ranks `[1, r₁, ..., r_{d-1}, 1]`
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `ranks.len() != size.len() + 1`, if a boundary
    /// rank is not 1, or if any size or interior rank is zero.
    pub fn new(size: &[usize], ranks: &[usize]) -> Result<Self> {
        if size.is_empty() {
            return Err(TtError::InvalidArgument(
                "TT-tensor must have at least one mode".to_string(),
            ));
        }
        if ranks.len() != size.len() + 1 {
            return Err(TtError::InvalidArgument(format!(
                "Expected {} ranks for {} modes, got {}",
                size.len() + 1,
                size.len(),
                ranks.len()
            )));
        }
        if ranks[0] != 1 || ranks[size.len()] != 1 {
            return Err(TtError::InvalidArgument(format!(
                "Boundary ranks must be 1, got {:?}",
                ranks
            )));
        }
        if let Some(k) = size.iter().position(|&n| n == 0) {
            return Err(TtError::InvalidArgument(format!(
                "Mode {} has zero size",
                k
            )));
        }
        if let Some(k) = ranks.iter().position(|&r| r == 0) {
            return Err(TtError::InvalidArgument(format!("Rank {} is zero", k)));
        }

        let cores = size
            .iter()
            .enumerate()
            .map(|(k, &n)| Array3::zeros((ranks[k], ranks[k + 1], n)))
            .collect();

        Ok(Self {
            cores,
            size: size.to_vec(),
            ranks: ranks.to_vec(),
        })
    }

    /// Create a TT-tensor from its cores
    ///
    /// Sizes and ranks are derived from the core shapes.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the chain is empty, if the outer bonds are not
    /// 1, if the right bond of a core differs from the left bond of the next,
    /// or if any core has a zero extent.
    pub fn from_cores(cores: Vec<Array3<T>>) -> Result<Self> {
        let ndim = cores.len();
        if ndim == 0 {
            return Err(TtError::InvalidArgument(
                "TT-tensor must have at least one core".to_string(),
            ));
        }

        let mut size = Vec::with_capacity(ndim);
        let mut ranks = Vec::with_capacity(ndim + 1);
        ranks.push(cores[0].dim().0);

        for (k, core) in cores.iter().enumerate() {
            let (r_left, r_right, n) = core.dim();
            if r_left == 0 || r_right == 0 || n == 0 {
                return Err(TtError::InvalidArgument(format!(
                    "Core {} has zero extent: {:?}",
                    k,
                    core.dim()
                )));
            }
            if r_left != ranks[k] {
                return Err(TtError::InvalidArgument(format!(
                    "Bond mismatch between cores {} and {}: {} != {}",
                    k - 1,
                    k,
                    ranks[k],
                    r_left
                )));
            }
            ranks.push(r_right);
            size.push(n);
        }

        if ranks[0] != 1 || ranks[ndim] != 1 {
            return Err(TtError::InvalidArgument(format!(
                "Boundary ranks must be 1, got {} and {}",
                ranks[0], ranks[ndim]
            )));
        }

        Ok(Self { cores, size, ranks })
    }

    /// Number of modes d
    pub fn ndim(&self) -> usize {
        self.size.len()
    }

    /// Mode sizes `[n₀, ..., n_{d-1}]`
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// TT-ranks `[1, r₁, ..., r_{d-1}, 1]`
    pub fn ranks(&self) -> &[usize] {
        &self.ranks
    }

    /// Largest TT-rank
    pub fn max_rank(&self) -> usize {
        self.ranks.iter().copied().max().unwrap_or(1)
    }

    /// Core `k`, or `None` if `k >= ndim()`
    pub fn core(&self, k: usize) -> Option<&Array3<T>> {
        self.cores.get(k)
    }

    /// All cores, left to right
    pub fn cores(&self) -> &[Array3<T>] {
        &self.cores
    }

    /// Shapes must not be changed through this reference
    pub(crate) fn first_core_mut(&mut self) -> &mut Array3<T> {
        &mut self.cores[0]
    }

    /// Consume the tensor and return its cores
    pub fn into_cores(self) -> Vec<Array3<T>> {
        self.cores
    }

    /// Evaluate a single entry
    ///
    /// Computes G₀\[i₀\] · G₁\[i₁\] · ... · G_{d-1}\[i_{d-1}\].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `index.len() != ndim()`, `OutOfRange` if any
    /// `index[k] >= size[k]`.
    ///
    /// # Complexity
    ///
    /// Time: O(d × R²) where R = max TT-rank
    pub fn eval(&self, index: &[usize]) -> Result<T> {
        if index.len() != self.ndim() {
            return Err(TtError::InvalidArgument(format!(
                "Expected {} indices, got {}",
                self.ndim(),
                index.len()
            )));
        }
        for (k, (&i, &n)) in index.iter().zip(self.size.iter()).enumerate() {
            if i >= n {
                return Err(TtError::OutOfRange(format!(
                    "Index {} of mode {} exceeds size {}",
                    i, k, n
                )));
            }
        }

        // Row vector of shape (1, r₁)
        let mut acc: Array2<T> = self.cores[0].index_axis(Axis(2), index[0]).to_owned();
        for (core, &i) in self.cores.iter().zip(index.iter()).skip(1) {
            acc = acc.dot(&core.index_axis(Axis(2), i));
        }

        Ok(acc[[0, 0]])
    }

    /// Contract the chain into a dense column-major tensor
    ///
    /// # Complexity
    ///
    /// Time: O(∏ₖ nₖ × R²), Space: O(∏ₖ nₖ × R)
    pub fn full(&self) -> DenseND<T> {
        // acc has one row per column-major prefix index (i₀, ..., iₖ)
        // and one column per right bond of core k
        let mut acc: Array2<T> = Array2::from_elem((1, 1), T::one());

        for core in &self.cores {
            let (_, r_right, n) = core.dim();
            let prefix = acc.nrows();
            let mut next = Array2::zeros((prefix * n, r_right));
            for i in 0..n {
                let block = acc.dot(&core.index_axis(Axis(2), i));
                next.slice_mut(s![prefix * i..prefix * (i + 1), ..])
                    .assign(&block);
            }
            acc = next;
        }

        let data: Vec<T> = acc.column(0).iter().copied().collect();
        DenseND::from_parts(self.size.clone(), data)
    }

    /// Frobenius norm computed in TT format
    pub fn norm(&self) -> T {
        crate::arith::transfer_sweep(self, self)
            .max(T::zero())
            .sqrt()
    }

    /// Scale by a constant, see [`crate::arith::scale`]
    pub fn scale(&self, alpha: T) -> Self {
        crate::arith::scale(self, alpha)
    }

    /// Add another TT-tensor, see [`crate::arith::add`]
    pub fn add(&self, other: &Self) -> Result<Self> {
        crate::arith::add(self, other)
    }

    /// Total number of stored core entries
    pub fn num_parameters(&self) -> usize {
        self.cores.iter().map(|core| core.len()).sum()
    }

    /// Number of dense entries divided by the number of stored core entries
    pub fn compression_ratio(&self) -> f64 {
        let full_size: usize = self.size.iter().product();
        full_size as f64 / self.num_parameters() as f64
    }
}
