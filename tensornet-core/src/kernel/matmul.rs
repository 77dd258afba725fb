//! Parallel vector × matrix multiplication.

use rayon::prelude::*;

use crate::error::TensorNetError;
use crate::kernel::check_parallelism;

/// Multiplies a length-`rows` vector by a `rows` × `cols` matrix,
/// producing a length-`cols` result: `result[x] = Σ_z vector[z] * matrix[z][x]`.
///
/// Work is partitioned by row across `min(rows, parallelism)` workers.
/// Worker `w` accumulates a private `cols`-length partial result over the
/// rows `w, w + workers, w + 2·workers, …` — strided rather than contiguous,
/// which evens out per-row cost across workers. The partials are summed into
/// the final result in worker-index order after all workers have joined.
///
/// # Errors
///
/// * [`TensorNetError::InvalidParallelism`] if `parallelism == 0`.
/// * [`TensorNetError::IncompatibleShapes`] if `vector.len() != rows`.
/// * [`TensorNetError::InvalidArgument`] if `rows` or `cols` is zero, or if
///   `matrix.len() != rows * cols`.
///
/// All failures are detected before any worker runs.
pub fn vec_mat_mul(
    vector: &[f32],
    matrix: &[f32],
    rows: usize,
    cols: usize,
    parallelism: usize,
) -> Result<Vec<f32>, TensorNetError> {
    check_parallelism("vec_mat_mul", parallelism)?;
    if rows == 0 || cols == 0 {
        return Err(TensorNetError::InvalidArgument {
            operation: "vec_mat_mul".to_string(),
            reason: format!("matrix dimensions must be positive, got {}x{}", rows, cols),
        });
    }
    if vector.len() != rows {
        return Err(TensorNetError::IncompatibleShapes {
            shape1: vec![vector.len()],
            shape2: vec![rows, cols],
            operation: "vec_mat_mul".to_string(),
        });
    }
    if matrix.len() != rows * cols {
        return Err(TensorNetError::InvalidArgument {
            operation: "vec_mat_mul".to_string(),
            reason: format!(
                "matrix buffer holds {} elements, shape {}x{} requires {}",
                matrix.len(),
                rows,
                cols,
                rows * cols
            ),
        });
    }

    let workers = parallelism.min(rows);

    // Each worker owns its partial buffer; nothing is shared until the join.
    let partials: Vec<Vec<f32>> = (0..workers)
        .into_par_iter()
        .map(|w| {
            let mut partial = vec![0.0f32; cols];
            let mut z = w;
            while z < rows {
                let scale = vector[z];
                let row = &matrix[z * cols..(z + 1) * cols];
                for (acc, &m) in partial.iter_mut().zip(row) {
                    *acc += scale * m;
                }
                z += workers;
            }
            partial
        })
        .collect();

    let mut result = vec![0.0f32; cols];
    for partial in partials {
        for (acc, p) in result.iter_mut().zip(partial) {
            *acc += p;
        }
    }
    Ok(result)
}
