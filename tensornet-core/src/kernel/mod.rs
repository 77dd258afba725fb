//! Parallel numeric kernels.
//!
//! Every kernel fans its work out over the shared rayon pool and blocks
//! until all partitions have completed. Partial results are merged in
//! worker-index order, so the output does not depend on scheduling.
//! All argument validation happens before any work is submitted; a failed
//! call never touches its output.

pub mod matmul;
pub mod softmax;
pub mod transpose;

pub use matmul::vec_mat_mul;
pub use softmax::softmax_in_place;
pub use transpose::transpose;

use crate::error::TensorNetError;

/// Default parallelism degree: the size of the shared worker pool.
pub fn default_parallelism() -> usize {
    rayon::current_num_threads()
}

/// Rejects a zero parallelism degree before any work is partitioned.
pub(crate) fn check_parallelism(
    operation: &str,
    parallelism: usize,
) -> Result<(), TensorNetError> {
    if parallelism == 0 {
        return Err(TensorNetError::InvalidParallelism {
            requested: parallelism,
            operation: operation.to_string(),
        });
    }
    Ok(())
}

/// Length of one contiguous piece when `len` elements are divided into
/// `workers` near-equal pieces. The last piece absorbs the remainder.
pub(crate) fn piece_len(len: usize, workers: usize) -> usize {
    (len + workers - 1) / workers
}
