use tensornet_core::tensor::Tensor;
use tensornet_core::train::DatasetProvider;
use tensornet_core::TensorNetError;

/// An in-memory dataset of `(input, expected output)` pairs.
///
/// Construction validates that the set is non-empty and that every pair
/// shares the dims of the first one, so the trainer never discovers a
/// shape fault halfway through an epoch.
#[derive(Debug, Clone)]
pub struct SampleDataset {
    samples: Vec<(Tensor, Tensor)>,
}

impl SampleDataset {
    /// Wraps a vector of sample pairs.
    ///
    /// # Errors
    ///
    /// * [`TensorNetError::InvalidArgument`] if `samples` is empty.
    /// * [`TensorNetError::ShapeMismatch`] if any pair disagrees with the
    ///   first pair's input or output dims.
    pub fn new(samples: Vec<(Tensor, Tensor)>) -> Result<Self, TensorNetError> {
        let (first_in, first_out) = match samples.first() {
            Some((input, expected)) => (input.dims().to_vec(), expected.dims().to_vec()),
            None => {
                return Err(TensorNetError::InvalidArgument {
                    operation: "SampleDataset::new".to_string(),
                    reason: "no samples given".to_string(),
                })
            }
        };
        for (input, expected) in &samples {
            if input.dims() != first_in {
                return Err(TensorNetError::ShapeMismatch {
                    expected: first_in,
                    actual: input.dims().to_vec(),
                    operation: "SampleDataset::new".to_string(),
                });
            }
            if expected.dims() != first_out {
                return Err(TensorNetError::ShapeMismatch {
                    expected: first_out,
                    actual: expected.dims().to_vec(),
                    operation: "SampleDataset::new".to_string(),
                });
            }
        }
        Ok(Self { samples })
    }

    /// Dims of every input tensor in the set.
    pub fn input_dims(&self) -> &[usize] {
        self.samples[0].0.dims()
    }

    /// Dims of every expected-output tensor in the set.
    pub fn output_dims(&self) -> &[usize] {
        self.samples[0].1.dims()
    }
}

impl DatasetProvider for SampleDataset {
    fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns the pair at `index`, cloned.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::IndexOutOfBounds`] if the index is out of
    /// bounds.
    fn get(&self, index: usize) -> Result<(Tensor, Tensor), TensorNetError> {
        self.samples
            .get(index)
            .cloned()
            .ok_or(TensorNetError::IndexOutOfBounds {
                index: vec![index],
                shape: vec![self.samples.len()],
            })
    }
}

#[cfg(test)]
#[path = "sample_dataset_test.rs"]
mod tests;
