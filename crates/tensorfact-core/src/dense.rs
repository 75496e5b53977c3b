//! Column-major dense tensors
//!
//! `DenseND<T>` is the dense counterpart of a tensor train: the input of
//! TT-SVD and the output of full reconstruction. Elements are stored in a
//! flat buffer in column-major (Fortran) order, so the first index varies
//! fastest:
//!
//! ```text
//! offset(i₀, i₁, ..., i_{d-1}) = i₀ + n₀·(i₁ + n₁·(i₂ + ...))
//! ```
//!
//! The offset mapping is part of the public contract; callers that hand a
//! raw buffer to TT-SVD must lay it out this way.

use scirs2_core::numeric::{Float, NumCast};

/// Dense N-dimensional tensor stored in column-major order
///
/// # Examples
///
/// ```
/// use tensorfact_core::DenseND;
///
/// let tensor = DenseND::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
/// assert_eq!(tensor.shape(), &[2, 3]);
/// // column-major: (1, 0) is the second element of the buffer
/// assert_eq!(tensor[&[1, 0]], 2.0);
/// assert_eq!(tensor[&[0, 1]], 3.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseND<T> {
    shape: Vec<usize>,
    data: Vec<T>,
}

impl<T> DenseND<T>
where
    T: Float,
{
    /// Create a tensor from a column-major buffer with the given shape
    ///
    /// # Errors
    ///
    /// Fails if the shape is empty, contains a zero extent, or if the
    /// buffer length differs from the product of the extents.
    pub fn from_vec(data: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        if shape.is_empty() {
            anyhow::bail!("Shape must have at least one mode");
        }
        if let Some(k) = shape.iter().position(|&n| n == 0) {
            anyhow::bail!("Mode {} has zero extent in shape {:?}", k, shape);
        }
        let total: usize = shape.iter().product();
        if data.len() != total {
            anyhow::bail!(
                "Shape {:?} requires {} elements, but got {}",
                shape,
                total,
                data.len()
            );
        }
        Ok(Self {
            shape: shape.to_vec(),
            data,
        })
    }

    /// Caller guarantees `data.len()` equals the product of `shape`
    pub(crate) fn from_parts(shape: Vec<usize>, data: Vec<T>) -> Self {
        debug_assert_eq!(shape.iter().product::<usize>(), data.len());
        Self { shape, data }
    }

    /// Create a tensor of zeros
    pub fn zeros(shape: &[usize]) -> Self {
        let total: usize = shape.iter().product();
        Self {
            shape: shape.to_vec(),
            data: vec![T::zero(); total],
        }
    }

    /// Create a tensor whose entries are computed from their multi-index
    ///
    /// # Examples
    ///
    /// ```
    /// use tensorfact_core::DenseND;
    ///
    /// let t = DenseND::<f64>::from_fn(&[3, 4], |idx| (idx[0] * 10 + idx[1]) as f64);
    /// assert_eq!(t[&[2, 3]], 23.0);
    /// ```
    pub fn from_fn<F>(shape: &[usize], mut f: F) -> Self
    where
        F: FnMut(&[usize]) -> T,
    {
        let total: usize = shape.iter().product();
        let mut data = Vec::with_capacity(total);
        let mut idx = vec![0usize; shape.len()];
        for _ in 0..total {
            data.push(f(&idx));
            // column-major odometer: first index fastest
            for (k, i) in idx.iter_mut().enumerate() {
                *i += 1;
                if *i < shape[k] {
                    break;
                }
                *i = 0;
            }
        }
        Self {
            shape: shape.to_vec(),
            data,
        }
    }

    /// Create a tensor with random values from a uniform distribution
    ///
    /// Uses `scirs2_core::random` for the RNG.
    ///
    /// # Arguments
    ///
    /// * `shape` - The shape of the tensor
    /// * `low` - Lower bound (inclusive)
    /// * `high` - Upper bound (exclusive)
    pub fn random_uniform(shape: &[usize], low: f64, high: f64) -> Self {
        use scirs2_core::random::quick::random_f64;
        let total: usize = shape.iter().product();
        let range = high - low;
        let data = (0..total)
            .map(|_| {
                let sample = low + random_f64() * range;
                <T as NumCast>::from(sample).unwrap_or_else(T::zero)
            })
            .collect();
        Self {
            shape: shape.to_vec(),
            data,
        }
    }

    /// Number of modes
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent of every mode
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The column-major buffer
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the tensor and return its column-major buffer
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Column-major offset of a multi-index, or `None` if it is out of bounds
    pub fn linear_index(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        let mut stride = 1;
        for (&i, &n) in index.iter().zip(self.shape.iter()) {
            if i >= n {
                return None;
            }
            offset += i * stride;
            stride *= n;
        }
        Some(offset)
    }

    /// Bounds-checked element access
    pub fn get(&self, index: &[usize]) -> Option<T> {
        self.linear_index(index).map(|offset| self.data[offset])
    }

    /// Frobenius norm: sqrt(Σ x²)
    pub fn frobenius_norm(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt()
    }
}

impl<T> std::ops::Index<&[usize]> for DenseND<T>
where
    T: Float,
{
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        match self.linear_index(index) {
            Some(offset) => &self.data[offset],
            None => panic!(
                "Index {:?} out of bounds for tensor of shape {:?}",
                index, self.shape
            ),
        }
    }
}
