//! Parallel softmax activation.

use rayon::prelude::*;

use crate::error::TensorNetError;
use crate::kernel::{check_parallelism, piece_len};

/// Applies softmax to `content` in place.
///
/// Every element is replaced by `exp(x)` while each worker accumulates a
/// local sum over its contiguous slice; the slices have length
/// `ceil(len / workers)` and the last slice absorbs the remainder. Once all
/// workers have joined, the partial sums are totaled, the total is inverted
/// once, and every element is multiplied by that inverse — normalization is
/// deferred so the exponentials are never recomputed.
///
/// A parallelism degree greater than the element count is clamped to the
/// element count.
///
/// # Errors
///
/// * [`TensorNetError::InvalidParallelism`] if `parallelism == 0`.
/// * [`TensorNetError::InvalidArgument`] if `content` is empty.
pub fn softmax_in_place(
    content: &mut [f32],
    parallelism: usize,
) -> Result<(), TensorNetError> {
    check_parallelism("softmax", parallelism)?;
    if content.is_empty() {
        return Err(TensorNetError::InvalidArgument {
            operation: "softmax".to_string(),
            reason: "content buffer is empty".to_string(),
        });
    }

    let workers = parallelism.min(content.len());
    let piece = piece_len(content.len(), workers);

    let partial_sums: Vec<f32> = content
        .par_chunks_mut(piece)
        .map(|slice| {
            let mut local = 0.0f32;
            for x in slice.iter_mut() {
                *x = x.exp();
                local += *x;
            }
            local
        })
        .collect();

    let total: f32 = partial_sums.iter().sum();
    let inverse = 1.0 / total;
    content.par_chunks_mut(piece).for_each(|slice| {
        for x in slice.iter_mut() {
            *x *= inverse;
        }
    });
    Ok(())
}
