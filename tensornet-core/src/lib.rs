//! TensorNet execution core: tensors, parallel numeric kernels, layered
//! networks with a prepare/execute lifecycle, and a backpropagation
//! trainer.

pub mod error;
pub mod kernel;
pub mod nn;
pub mod tensor;
pub mod train;

pub use error::TensorNetError;
pub use tensor::Tensor;
