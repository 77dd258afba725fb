use crate::error::TensorNetError;
use crate::nn::network::{Network, NetworkState};
use crate::tensor::Tensor;
use crate::train::dataset::DatasetProvider;
use crate::train::progress::ProgressIndicator;

/// Hyper-parameters for [`BackpropTrainer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainerConfig {
    /// Upper bound on epochs; training stops here even without convergence.
    pub max_epoch: usize,
    /// Absolute per-element error threshold below which a sample counts as
    /// converged.
    pub max_error: f32,
    /// Scale applied to `(actual - expected)` before backpropagation.
    pub learning_rate: f32,
}

/// Outcome of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainReport {
    /// Number of epochs actually run.
    pub epochs: usize,
    /// Whether every sample of the final epoch converged.
    pub converged: bool,
}

/// Outcome of a test pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestReport {
    /// Samples within the error threshold.
    pub converged: usize,
    /// Total samples examined.
    pub total: usize,
}

/// Drives repeated forward/backward passes over a dataset with a
/// threshold-based error-correction rule.
///
/// Per sample: run `forward`, compare every element of the actual output
/// against the expected one; if any absolute difference exceeds
/// `max_error`, backpropagate the scaled error
/// `learning_rate * (actual - expected)`. Training stops once a full epoch
/// passes with every sample converged, or at `max_epoch`.
#[derive(Debug, Clone)]
pub struct BackpropTrainer {
    config: TrainerConfig,
}

impl BackpropTrainer {
    /// Validates the configuration: `max_epoch > 0`, `max_error > 0`,
    /// `0 < learning_rate < 1`.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::InvalidArgument`] for any violated bound.
    pub fn new(config: TrainerConfig) -> Result<Self, TensorNetError> {
        if config.max_epoch == 0 {
            return Err(invalid_config("max_epoch must be positive"));
        }
        if !(config.max_error > 0.0) {
            return Err(invalid_config("max_error must be positive"));
        }
        if !(config.learning_rate > 0.0 && config.learning_rate < 1.0) {
            return Err(invalid_config("learning_rate must lie in (0, 1)"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Trains `network` on `dataset`, reporting per-epoch progress.
    ///
    /// # Errors
    ///
    /// * [`TensorNetError::StateViolation`] if the network is not prepared.
    /// * [`TensorNetError::InvalidArgument`] if the dataset is empty.
    /// * Any failure surfaced by the network or dataset mid-pass.
    pub fn train(
        &self,
        network: &mut Network,
        dataset: &dyn DatasetProvider,
        progress: &mut dyn ProgressIndicator,
    ) -> Result<TrainReport, TensorNetError> {
        self.check_inputs(network, dataset, "train")?;

        for epoch in 0..self.config.max_epoch {
            progress.start(&format!("epoch {}", epoch), dataset.len());
            let mut all_converged = true;
            for index in 0..dataset.len() {
                let (input, expected) = dataset.get(index)?;
                let actual = network.forward(&input)?;
                if !self.within_threshold(&actual, &expected)? {
                    let mut error = actual;
                    error.sub(&expected)?;
                    error.mul_scalar(self.config.learning_rate);
                    network.backward(&error)?;
                    all_converged = false;
                }
                progress.processed(index);
            }
            progress.end();
            log::debug!(
                "epoch {} finished, converged: {}",
                epoch,
                all_converged
            );
            if all_converged {
                return Ok(TrainReport {
                    epochs: epoch + 1,
                    converged: true,
                });
            }
        }
        Ok(TrainReport {
            epochs: self.config.max_epoch,
            converged: false,
        })
    }

    /// Runs the threshold comparison over the full dataset without
    /// backpropagating.
    ///
    /// # Errors
    ///
    /// Same eager checks as [`train`](BackpropTrainer::train).
    pub fn test(
        &self,
        network: &mut Network,
        dataset: &dyn DatasetProvider,
    ) -> Result<TestReport, TensorNetError> {
        self.check_inputs(network, dataset, "test")?;

        let mut converged = 0;
        for index in 0..dataset.len() {
            let (input, expected) = dataset.get(index)?;
            let actual = network.forward(&input)?;
            if self.within_threshold(&actual, &expected)? {
                converged += 1;
            }
        }
        Ok(TestReport {
            converged,
            total: dataset.len(),
        })
    }

    fn check_inputs(
        &self,
        network: &Network,
        dataset: &dyn DatasetProvider,
        operation: &str,
    ) -> Result<(), TensorNetError> {
        if network.state() != NetworkState::Prepared {
            return Err(TensorNetError::StateViolation {
                operation: operation.to_string(),
                state: "unprepared".to_string(),
            });
        }
        if dataset.is_empty() {
            return Err(TensorNetError::InvalidArgument {
                operation: format!("BackpropTrainer::{}", operation),
                reason: "dataset is empty".to_string(),
            });
        }
        Ok(())
    }

    /// True when every element of `actual` is within `max_error` of
    /// `expected`.
    fn within_threshold(
        &self,
        actual: &Tensor,
        expected: &Tensor,
    ) -> Result<bool, TensorNetError> {
        if actual.dims() != expected.dims() {
            return Err(TensorNetError::ShapeMismatch {
                expected: expected.dims().to_vec(),
                actual: actual.dims().to_vec(),
                operation: "within_threshold".to_string(),
            });
        }
        Ok(actual
            .data()
            .iter()
            .zip(expected.data())
            .all(|(a, e)| (a - e).abs() <= self.config.max_error))
    }
}

fn invalid_config(reason: &str) -> TensorNetError {
    TensorNetError::InvalidArgument {
        operation: "BackpropTrainer::new".to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
