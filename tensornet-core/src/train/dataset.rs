use crate::error::TensorNetError;
use crate::tensor::Tensor;

/// A provider of `(input, expected output)` training pairs.
///
/// The trainer traverses the full dataset once per epoch, by index. The
/// contract lives here so the trainer depends only on it; concrete
/// implementations (in-memory stores, file-backed readers) live outside
/// the execution core.
pub trait DatasetProvider {
    /// Total number of samples.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the sample at `index` as an `(input, expected)` pair.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::IndexOutOfBounds`] for an invalid index.
    fn get(&self, index: usize) -> Result<(Tensor, Tensor), TensorNetError>;
}
