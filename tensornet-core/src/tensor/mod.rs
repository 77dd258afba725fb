//! Owned, mutable, multi-dimensional numeric buffers.

pub mod factory;

pub use factory::{CpuTensorFactory, TensorFactory};

use crate::error::TensorNetError;
use crate::kernel;

/// An owned n-dimensional `f32` buffer stored contiguously in row-major
/// order.
///
/// The dimension vector is fixed at construction (arity ≥ 1, every size
/// > 0) and the flat buffer length always equals the product of the
/// dimensions. Operations that change shape (`trans`, `matrix_mul`,
/// `convert`) return new tensors; the element-wise arithmetic operations
/// mutate the receiver in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    dims: Vec<usize>,
    data: Vec<f32>,
}

impl Tensor {
    /// Creates a tensor from raw content and an explicit dimension vector.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::TensorCreationError`] if the dimension
    /// vector is empty, contains a zero, or its product does not equal
    /// `data.len()`.
    pub fn new(data: Vec<f32>, dims: Vec<usize>) -> Result<Self, TensorNetError> {
        check_dims(&dims, data.len())?;
        Ok(Self { dims, data })
    }

    /// Creates a zero-filled tensor with the given dimensions.
    pub fn zeros(dims: Vec<usize>) -> Result<Self, TensorNetError> {
        let len = checked_volume(&dims)?;
        Ok(Self {
            dims,
            data: vec![0.0; len],
        })
    }

    /// Creates a tensor with every element set to `value`.
    pub fn filled(dims: Vec<usize>, value: f32) -> Result<Self, TensorNetError> {
        let len = checked_volume(&dims)?;
        Ok(Self {
            dims,
            data: vec![value; len],
        })
    }

    /// The dimension sizes, in order.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Number of dimensions.
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// A tensor always holds at least one element.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The flat content buffer, row-major.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable access to the flat content buffer.
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Returns the element at the given index vector.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::IndexOutOfBounds`] if the index arity does
    /// not match the rank or any coordinate exceeds its dimension.
    pub fn get(&self, index: &[usize]) -> Result<f32, TensorNetError> {
        let offset = self.offset(index)?;
        Ok(self.data[offset])
    }

    /// Writes the element at the given index vector.
    ///
    /// # Errors
    ///
    /// Same bounds check as [`get`](Tensor::get).
    pub fn set(&mut self, index: &[usize], value: f32) -> Result<(), TensorNetError> {
        let offset = self.offset(index)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Overwrites every element with `value`.
    pub fn fill(&mut self, value: f32) {
        self.data.fill(value);
    }

    /// Deep copy. The duplicate shares no storage with the original.
    pub fn duplicate(&self) -> Tensor {
        self.clone()
    }

    /// Element-wise addition in place. Operand dims must match exactly.
    pub fn add(&mut self, other: &Tensor) -> Result<(), TensorNetError> {
        self.zip_in_place("add", other, |a, b| a + b)
    }

    /// Element-wise subtraction in place. Operand dims must match exactly.
    pub fn sub(&mut self, other: &Tensor) -> Result<(), TensorNetError> {
        self.zip_in_place("sub", other, |a, b| a - b)
    }

    /// Element-wise multiplication in place. Operand dims must match exactly.
    pub fn mul(&mut self, other: &Tensor) -> Result<(), TensorNetError> {
        self.zip_in_place("mul", other, |a, b| a * b)
    }

    /// Element-wise division in place. Operand dims must match exactly.
    pub fn div(&mut self, other: &Tensor) -> Result<(), TensorNetError> {
        self.zip_in_place("div", other, |a, b| a / b)
    }

    /// Adds a scalar to every element in place.
    pub fn add_scalar(&mut self, value: f32) {
        for x in &mut self.data {
            *x += value;
        }
    }

    /// Subtracts a scalar from every element in place.
    pub fn sub_scalar(&mut self, value: f32) {
        for x in &mut self.data {
            *x -= value;
        }
    }

    /// Multiplies every element by a scalar in place.
    pub fn mul_scalar(&mut self, value: f32) {
        for x in &mut self.data {
            *x *= value;
        }
    }

    /// Divides every element by a scalar in place.
    pub fn div_scalar(&mut self, value: f32) {
        for x in &mut self.data {
            *x /= value;
        }
    }

    /// Matrix multiplication, 2-D only: `[M, K] × [K, N] → [M, N]`.
    ///
    /// Each output row is produced by the parallel vector × matrix kernel.
    /// Operands are left unchanged.
    ///
    /// # Errors
    ///
    /// * [`TensorNetError::UnsupportedRank`] if either operand is not 2-D.
    /// * [`TensorNetError::IncompatibleShapes`] if the inner dimensions
    ///   differ.
    pub fn matrix_mul(&self, other: &Tensor) -> Result<Tensor, TensorNetError> {
        self.require_rank("matrix_mul", 2)?;
        other.require_rank("matrix_mul", 2)?;
        let (m, k) = (self.dims[0], self.dims[1]);
        let (k2, n) = (other.dims[0], other.dims[1]);
        if k != k2 {
            return Err(TensorNetError::IncompatibleShapes {
                shape1: self.dims.clone(),
                shape2: other.dims.clone(),
                operation: "matrix_mul".to_string(),
            });
        }
        let parallelism = kernel::default_parallelism();
        let mut data = Vec::with_capacity(m * n);
        for i in 0..m {
            let row = &self.data[i * k..(i + 1) * k];
            let product = kernel::vec_mat_mul(row, &other.data, k, n, parallelism)?;
            data.extend(product);
        }
        Tensor::new(data, vec![m, n])
    }

    /// Transpose, 2-D only. Returns a new tensor; the receiver is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::UnsupportedRank`] if the tensor is not 2-D.
    pub fn trans(&self) -> Result<Tensor, TensorNetError> {
        self.trans_with(kernel::default_parallelism())
    }

    /// Transpose with an explicit parallelism degree.
    pub fn trans_with(&self, parallelism: usize) -> Result<Tensor, TensorNetError> {
        self.require_rank("trans", 2)?;
        let (rows, cols) = (self.dims[0], self.dims[1]);
        let data = kernel::transpose(&self.data, rows, cols, parallelism)?;
        Tensor::new(data, vec![cols, rows])
    }

    /// Visits every element in flat order.
    pub fn for_each<F: FnMut(f32)>(&self, mut f: F) {
        for &x in &self.data {
            f(x);
        }
    }

    /// Maps every element into a new tensor of the same dims.
    pub fn convert<F: Fn(f32) -> f32>(&self, f: F) -> Tensor {
        Tensor {
            dims: self.dims.clone(),
            data: self.data.iter().map(|&x| f(x)).collect(),
        }
    }

    fn zip_in_place<F: Fn(f32, f32) -> f32>(
        &mut self,
        operation: &str,
        other: &Tensor,
        f: F,
    ) -> Result<(), TensorNetError> {
        if self.dims != other.dims {
            return Err(TensorNetError::ShapeMismatch {
                expected: self.dims.clone(),
                actual: other.dims.clone(),
                operation: operation.to_string(),
            });
        }
        for (a, &b) in self.data.iter_mut().zip(&other.data) {
            *a = f(*a, b);
        }
        Ok(())
    }

    fn require_rank(&self, operation: &str, expected: usize) -> Result<(), TensorNetError> {
        if self.rank() != expected {
            return Err(TensorNetError::UnsupportedRank {
                operation: operation.to_string(),
                expected,
                actual: self.rank(),
            });
        }
        Ok(())
    }

    fn offset(&self, index: &[usize]) -> Result<usize, TensorNetError> {
        if index.len() != self.dims.len()
            || index.iter().zip(&self.dims).any(|(&i, &d)| i >= d)
        {
            return Err(TensorNetError::IndexOutOfBounds {
                index: index.to_vec(),
                shape: self.dims.clone(),
            });
        }
        let mut offset = 0;
        for (&i, &d) in index.iter().zip(&self.dims) {
            offset = offset * d + i;
        }
        Ok(offset)
    }
}

fn check_dims(dims: &[usize], data_len: usize) -> Result<(), TensorNetError> {
    let volume = checked_volume(dims).map_err(|_| TensorNetError::TensorCreationError {
        data_len,
        shape: dims.to_vec(),
    })?;
    if volume != data_len {
        return Err(TensorNetError::TensorCreationError {
            data_len,
            shape: dims.to_vec(),
        });
    }
    Ok(())
}

fn checked_volume(dims: &[usize]) -> Result<usize, TensorNetError> {
    if dims.is_empty() || dims.contains(&0) {
        return Err(TensorNetError::TensorCreationError {
            data_len: 0,
            shape: dims.to_vec(),
        });
    }
    Ok(dims.iter().product())
}

#[cfg(test)]
#[path = "tensor_test.rs"]
mod tests;
