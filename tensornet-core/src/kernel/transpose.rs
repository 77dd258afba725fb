//! Parallel 2-D matrix transpose.

use rayon::prelude::*;

use crate::error::TensorNetError;
use crate::kernel::{check_parallelism, piece_len};

/// Transposes a `rows` × `cols` row-major matrix into a new `cols` × `rows`
/// buffer.
///
/// The output rows (input columns) are split into contiguous ranges, one per
/// worker, with `min(cols, parallelism)` workers. Each worker walks its
/// input columns at stride `cols` and emits its output rows as one
/// contiguous block; the blocks are concatenated in worker-index order, so
/// the final row ordering is independent of completion order.
///
/// # Errors
///
/// * [`TensorNetError::InvalidParallelism`] if `parallelism == 0`.
/// * [`TensorNetError::InvalidArgument`] if `rows` or `cols` is zero, or if
///   `matrix.len() != rows * cols`.
pub fn transpose(
    matrix: &[f32],
    rows: usize,
    cols: usize,
    parallelism: usize,
) -> Result<Vec<f32>, TensorNetError> {
    check_parallelism("transpose", parallelism)?;
    if rows == 0 || cols == 0 {
        return Err(TensorNetError::InvalidArgument {
            operation: "transpose".to_string(),
            reason: format!("matrix dimensions must be positive, got {}x{}", rows, cols),
        });
    }
    if matrix.len() != rows * cols {
        return Err(TensorNetError::InvalidArgument {
            operation: "transpose".to_string(),
            reason: format!(
                "matrix buffer holds {} elements, shape {}x{} requires {}",
                matrix.len(),
                rows,
                cols,
                rows * cols
            ),
        });
    }

    let workers = parallelism.min(cols);
    let piece = piece_len(cols, workers);

    let blocks: Vec<Vec<f32>> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let start = (w * piece).min(cols);
            let end = ((w + 1) * piece).min(cols);
            let mut block = Vec::with_capacity((end - start) * rows);
            for c in start..end {
                for r in 0..rows {
                    block.push(matrix[r * cols + c]);
                }
            }
            block
        })
        .collect();

    let mut out = Vec::with_capacity(rows * cols);
    for block in blocks {
        out.extend(block);
    }
    Ok(out)
}
