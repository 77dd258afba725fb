use crate::error::TensorNetError;
use crate::kernel;
use crate::tensor::Tensor;

/// Closed set of activation functions, applied element-wise in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Identity,
    Sigmoid,
    Softmax,
}

impl Activation {
    /// Applies the activation to `tensor` in place.
    ///
    /// `Softmax` runs on the parallel kernel with the given degree; the
    /// other variants are plain element-wise passes.
    pub fn apply(
        &self,
        tensor: &mut Tensor,
        parallelism: usize,
    ) -> Result<(), TensorNetError> {
        match self {
            Activation::Identity => Ok(()),
            Activation::Sigmoid => {
                for x in tensor.data_mut() {
                    *x = 1.0 / (1.0 + (-*x).exp());
                }
                Ok(())
            }
            Activation::Softmax => kernel::softmax_in_place(tensor.data_mut(), parallelism),
        }
    }
}
