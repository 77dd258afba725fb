use std::fmt::Debug;

use crate::error::TensorNetError;
use crate::tensor::Tensor;

/// Factory contract for producing tensors on demand.
///
/// The network and layer components depend only on this trait, never on a
/// concrete implementation, so an alternate numeric backend can be
/// substituted without touching the execution core. No discovery happens
/// here: the caller resolves an implementation at startup and hands it in.
pub trait TensorFactory: Debug + Send + Sync {
    /// Creates a zero-filled tensor with the given dimensions.
    fn create(&self, dims: &[usize]) -> Result<Tensor, TensorNetError>;

    /// Creates a tensor from raw content and an explicit dimension vector.
    fn from_data(&self, data: Vec<f32>, dims: &[usize]) -> Result<Tensor, TensorNetError>;
}

/// Default CPU-backed factory.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuTensorFactory;

impl TensorFactory for CpuTensorFactory {
    fn create(&self, dims: &[usize]) -> Result<Tensor, TensorNetError> {
        Tensor::zeros(dims.to_vec())
    }

    fn from_data(&self, data: Vec<f32>, dims: &[usize]) -> Result<Tensor, TensorNetError> {
        Tensor::new(data, dims.to_vec())
    }
}
