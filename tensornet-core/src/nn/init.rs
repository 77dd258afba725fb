//! In-place weight initialization.

use rand::distributions::{Distribution, Uniform};
use rand_distr::Normal;

use crate::error::TensorNetError;
use crate::tensor::Tensor;

/// Fills `tensor` in place with draws from `U(low, high)`.
///
/// # Errors
///
/// Returns [`TensorNetError::InvalidArgument`] if `low >= high`.
pub fn uniform_(tensor: &mut Tensor, low: f32, high: f32) -> Result<(), TensorNetError> {
    if low >= high {
        return Err(TensorNetError::InvalidArgument {
            operation: "uniform_".to_string(),
            reason: format!("empty range [{}, {})", low, high),
        });
    }
    let dist = Uniform::new(low, high);
    let mut rng = rand::thread_rng();
    for x in tensor.data_mut() {
        *x = dist.sample(&mut rng);
    }
    Ok(())
}

/// Fills `tensor` in place with draws from `N(mean, std_dev²)`.
///
/// # Errors
///
/// Returns [`TensorNetError::InvalidArgument`] if `std_dev` is negative
/// or not finite.
pub fn normal_(tensor: &mut Tensor, mean: f32, std_dev: f32) -> Result<(), TensorNetError> {
    let dist = Normal::new(mean, std_dev).map_err(|e| TensorNetError::InvalidArgument {
        operation: "normal_".to_string(),
        reason: e.to_string(),
    })?;
    let mut rng = rand::thread_rng();
    for x in tensor.data_mut() {
        *x = dist.sample(&mut rng);
    }
    Ok(())
}
