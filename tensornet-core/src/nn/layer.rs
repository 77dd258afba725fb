use crate::error::TensorNetError;
use crate::kernel;
use crate::nn::activation::Activation;
use crate::tensor::Tensor;

/// Closed set of layer kinds. Variants behave differently under the same
/// operation names; there is no open hierarchy to extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    Input,
    Dense,
    Output,
}

/// A single transformation stage in a network.
///
/// Input layers pass their input through unchanged and reject backward
/// calls. Dense and output layers hold a weight tensor of dims
/// `[in_size, out_size]`, an optional bias of dims `[out_size]`, and an
/// activation kind; forward computes `activation(input × weight + bias)`
/// through the parallel kernels and caches the input for the backward
/// pass.
///
/// Shape is fixed at construction; weight values mutate during backward.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    kind: LayerKind,
    in_size: usize,
    out_size: usize,
    weight: Option<Tensor>,
    bias: Option<Tensor>,
    activation: Activation,
    cached_input: Option<Tensor>,
}

impl Layer {
    /// Creates an input layer: identity pass-through of `size` elements.
    pub fn input(size: usize) -> Result<Self, TensorNetError> {
        if size == 0 {
            return Err(TensorNetError::InvalidArgument {
                operation: "Layer::input".to_string(),
                reason: "size must be positive".to_string(),
            });
        }
        Ok(Self {
            kind: LayerKind::Input,
            in_size: size,
            out_size: size,
            weight: None,
            bias: None,
            activation: Activation::Identity,
            cached_input: None,
        })
    }

    /// Creates a hidden (dense) layer from an explicit weight tensor.
    ///
    /// The weight must be 2-D; its dims define `in_size` and `out_size`.
    /// A bias, when given, must have dims `[out_size]`.
    pub fn dense(
        weight: Tensor,
        bias: Option<Tensor>,
        activation: Activation,
    ) -> Result<Self, TensorNetError> {
        Self::with_weights(LayerKind::Dense, weight, bias, activation)
    }

    /// Creates an output layer from an explicit weight tensor.
    pub fn output(
        weight: Tensor,
        bias: Option<Tensor>,
        activation: Activation,
    ) -> Result<Self, TensorNetError> {
        Self::with_weights(LayerKind::Output, weight, bias, activation)
    }

    fn with_weights(
        kind: LayerKind,
        weight: Tensor,
        bias: Option<Tensor>,
        activation: Activation,
    ) -> Result<Self, TensorNetError> {
        if weight.rank() != 2 {
            return Err(TensorNetError::UnsupportedRank {
                operation: "Layer::with_weights".to_string(),
                expected: 2,
                actual: weight.rank(),
            });
        }
        let (in_size, out_size) = (weight.dims()[0], weight.dims()[1]);
        if let Some(b) = &bias {
            if b.dims() != [out_size] {
                return Err(TensorNetError::ShapeMismatch {
                    expected: vec![out_size],
                    actual: b.dims().to_vec(),
                    operation: "Layer::with_weights".to_string(),
                });
            }
        }
        Ok(Self {
            kind,
            in_size,
            out_size,
            weight: Some(weight),
            bias,
            activation,
            cached_input: None,
        })
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn activation(&self) -> Activation {
        self.activation
    }

    /// The weight tensor, absent for input layers.
    pub fn weight(&self) -> Option<&Tensor> {
        self.weight.as_ref()
    }

    /// The bias tensor, when configured.
    pub fn bias(&self) -> Option<&Tensor> {
        self.bias.as_ref()
    }

    /// Forward transform: `activation(input × weight + bias)`.
    ///
    /// The input is cached for the backward pass. Input layers return a
    /// copy of the input unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::ShapeMismatch`] if the input does not have
    /// dims `[in_size]`.
    pub fn forward(
        &mut self,
        input: &Tensor,
        parallelism: usize,
    ) -> Result<Tensor, TensorNetError> {
        if input.dims() != [self.in_size] {
            return Err(TensorNetError::ShapeMismatch {
                expected: vec![self.in_size],
                actual: input.dims().to_vec(),
                operation: "Layer::forward".to_string(),
            });
        }
        if self.kind == LayerKind::Input {
            return Ok(input.duplicate());
        }

        let weight = self.require_weight()?;
        let data = kernel::vec_mat_mul(
            input.data(),
            weight.data(),
            self.in_size,
            self.out_size,
            parallelism,
        )?;
        let mut output = Tensor::new(data, vec![self.out_size])?;
        if let Some(bias) = &self.bias {
            output.add(bias)?;
        }
        self.activation.apply(&mut output, parallelism)?;
        self.cached_input = Some(input.duplicate());
        Ok(output)
    }

    /// Backward transform: maps the output-side error to the input side
    /// through the transposed weight matrix, then applies the outer-product
    /// weight update `weight[i][o] -= input[i] * error[o]` (the error tensor
    /// already carries the learning-rate scaling applied by the trainer).
    ///
    /// # Errors
    ///
    /// * [`TensorNetError::UnsupportedOperation`] on an input layer —
    ///   gradients terminate there.
    /// * [`TensorNetError::StateViolation`] if no forward pass has cached an
    ///   input in the current cycle.
    /// * [`TensorNetError::ShapeMismatch`] if the error does not have dims
    ///   `[out_size]`.
    pub fn backward(
        &mut self,
        error: &Tensor,
        parallelism: usize,
    ) -> Result<Tensor, TensorNetError> {
        if self.kind == LayerKind::Input {
            return Err(TensorNetError::UnsupportedOperation(
                "backward is not defined for an input layer".to_string(),
            ));
        }
        if error.dims() != [self.out_size] {
            return Err(TensorNetError::ShapeMismatch {
                expected: vec![self.out_size],
                actual: error.dims().to_vec(),
                operation: "Layer::backward".to_string(),
            });
        }
        let cached = self.cached_input.take().ok_or(TensorNetError::StateViolation {
            operation: "Layer::backward".to_string(),
            state: "unprimed (no forward pass in the current cycle)".to_string(),
        })?;

        let weight = self.require_weight_mut()?;
        let transposed = kernel::transpose(
            weight.data(),
            cached.len(),
            error.len(),
            parallelism,
        )?;
        let upstream = kernel::vec_mat_mul(
            error.data(),
            &transposed,
            error.len(),
            cached.len(),
            parallelism,
        )?;

        let out_size = self.out_size;
        let weight_data = self.require_weight_mut()?.data_mut();
        for (i, &x) in cached.data().iter().enumerate() {
            let row = &mut weight_data[i * out_size..(i + 1) * out_size];
            for (w, &e) in row.iter_mut().zip(error.data()) {
                *w -= x * e;
            }
        }
        if let Some(bias) = &mut self.bias {
            for (b, &e) in bias.data_mut().iter_mut().zip(error.data()) {
                *b -= e;
            }
        }
        self.cached_input = Some(cached);
        Tensor::new(upstream, vec![self.in_size])
    }

    /// Drops the cached forward input. Called when the owning network is
    /// unprepared.
    pub(crate) fn clear_cache(&mut self) {
        self.cached_input = None;
    }

    fn require_weight(&self) -> Result<&Tensor, TensorNetError> {
        self.weight.as_ref().ok_or_else(|| {
            TensorNetError::Internal("weighted layer is missing its weight tensor".to_string())
        })
    }

    fn require_weight_mut(&mut self) -> Result<&mut Tensor, TensorNetError> {
        self.weight.as_mut().ok_or_else(|| {
            TensorNetError::Internal("weighted layer is missing its weight tensor".to_string())
        })
    }
}

#[cfg(test)]
#[path = "layer_test.rs"]
mod tests;
