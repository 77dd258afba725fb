use std::sync::Arc;

use crate::error::TensorNetError;
use crate::kernel;
use crate::nn::activation::Activation;
use crate::nn::factory::LayerFactory;
use crate::nn::layer::{Layer, LayerKind};
use crate::tensor::{Tensor, TensorFactory};

/// Lifecycle state of a [`Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkState {
    /// Structural edits are legal; execution is not.
    Unprepared,
    /// The layer configuration is frozen; forward/backward are legal.
    Prepared,
}

impl NetworkState {
    fn as_str(&self) -> &'static str {
        match self {
            NetworkState::Unprepared => "unprepared",
            NetworkState::Prepared => "prepared",
        }
    }
}

/// An ordered sequence of layers with a prepare/execute lifecycle.
///
/// Layers are appended while the network is `Unprepared`; `prepare()`
/// freezes the configuration and permits `forward`/`backward`;
/// `unprepare()` reverses it and makes structural edits legal again.
/// Insertion order is execution order.
#[derive(Debug)]
pub struct Network {
    layers: Vec<Layer>,
    state: NetworkState,
    forward_ran: bool,
    parallelism: usize,
    tensor_factory: Arc<dyn TensorFactory>,
    layer_factory: Arc<dyn LayerFactory>,
}

impl Network {
    /// Creates an empty network with its factories bound and the default
    /// parallelism degree (the shared pool size).
    pub fn new(
        tensor_factory: Arc<dyn TensorFactory>,
        layer_factory: Arc<dyn LayerFactory>,
    ) -> Self {
        Self {
            layers: Vec::new(),
            state: NetworkState::Unprepared,
            forward_ran: false,
            parallelism: kernel::default_parallelism(),
            tensor_factory,
            layer_factory,
        }
    }

    /// Creates an empty network with an explicit per-call parallelism
    /// degree for its kernel invocations.
    ///
    /// # Errors
    ///
    /// Returns [`TensorNetError::InvalidParallelism`] for a zero degree.
    pub fn with_parallelism(
        tensor_factory: Arc<dyn TensorFactory>,
        layer_factory: Arc<dyn LayerFactory>,
        parallelism: usize,
    ) -> Result<Self, TensorNetError> {
        if parallelism == 0 {
            return Err(TensorNetError::InvalidParallelism {
                requested: parallelism,
                operation: "Network::with_parallelism".to_string(),
            });
        }
        let mut network = Self::new(tensor_factory, layer_factory);
        network.parallelism = parallelism;
        Ok(network)
    }

    pub fn state(&self) -> NetworkState {
        self.state
    }

    pub fn parallelism(&self) -> usize {
        self.parallelism
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// The tensor factory bound at construction, for callers that need to
    /// build compatible input tensors.
    pub fn tensor_factory(&self) -> &dyn TensorFactory {
        self.tensor_factory.as_ref()
    }

    /// Builds a layer through the bound layer factory, without adding it.
    pub fn build_layer(
        &self,
        kind: LayerKind,
        in_size: usize,
        out_size: usize,
        activation: Activation,
    ) -> Result<Layer, TensorNetError> {
        self.layer_factory.create(
            kind,
            in_size,
            out_size,
            activation,
            self.tensor_factory.as_ref(),
        )
    }

    /// Appends one or more layers, in order.
    ///
    /// # Errors
    ///
    /// * [`TensorNetError::StateViolation`] while the network is prepared —
    ///   structural mutation requires a full `unprepare()` first.
    /// * [`TensorNetError::InvalidArgument`] for an empty batch.
    pub fn add(&mut self, layers: Vec<Layer>) -> Result<(), TensorNetError> {
        self.require_state(NetworkState::Unprepared, "add")?;
        if layers.is_empty() {
            return Err(TensorNetError::InvalidArgument {
                operation: "Network::add".to_string(),
                reason: "no layers given".to_string(),
            });
        }
        self.layers.extend(layers);
        Ok(())
    }

    /// Freezes the layer configuration: `Unprepared → Prepared`.
    ///
    /// Validates that the network is non-empty, that the first layer is an
    /// input layer, that no later layer is, and that adjacent layers agree
    /// on their sizes.
    ///
    /// # Errors
    ///
    /// [`TensorNetError::StateViolation`] if already prepared;
    /// [`TensorNetError::InvalidArgument`] /
    /// [`TensorNetError::IncompatibleShapes`] for configuration faults.
    pub fn prepare(&mut self) -> Result<(), TensorNetError> {
        self.require_state(NetworkState::Unprepared, "prepare")?;
        if self.layers.is_empty() {
            return Err(TensorNetError::InvalidArgument {
                operation: "Network::prepare".to_string(),
                reason: "network has no layers".to_string(),
            });
        }
        if self.layers[0].kind() != LayerKind::Input {
            return Err(TensorNetError::InvalidArgument {
                operation: "Network::prepare".to_string(),
                reason: "first layer must be an input layer".to_string(),
            });
        }
        for (position, pair) in self.layers.windows(2).enumerate() {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.kind() == LayerKind::Input {
                return Err(TensorNetError::InvalidArgument {
                    operation: "Network::prepare".to_string(),
                    reason: format!("layer {} is a second input layer", position + 1),
                });
            }
            if prev.out_size() != next.in_size() {
                return Err(TensorNetError::IncompatibleShapes {
                    shape1: vec![prev.out_size()],
                    shape2: vec![next.in_size()],
                    operation: "Network::prepare".to_string(),
                });
            }
        }
        self.state = NetworkState::Prepared;
        self.forward_ran = false;
        log::debug!("network prepared: {} layers", self.layers.len());
        Ok(())
    }

    /// Unfreezes the configuration: `Prepared → Unprepared`. Cached
    /// activations are dropped; structural edits become legal again.
    ///
    /// # Errors
    ///
    /// [`TensorNetError::StateViolation`] if already unprepared.
    pub fn unprepare(&mut self) -> Result<(), TensorNetError> {
        self.require_state(NetworkState::Prepared, "unprepare")?;
        for layer in &mut self.layers {
            layer.clear_cache();
        }
        self.state = NetworkState::Unprepared;
        self.forward_ran = false;
        log::debug!("network unprepared");
        Ok(())
    }

    /// Runs a forward pass, feeding each layer's output to the next in
    /// insertion order.
    ///
    /// # Errors
    ///
    /// [`TensorNetError::StateViolation`] unless prepared; shape failures
    /// surface from the first layer whose input does not fit.
    pub fn forward(&mut self, input: &Tensor) -> Result<Tensor, TensorNetError> {
        self.require_state(NetworkState::Prepared, "forward")?;
        let mut current = input.duplicate();
        for layer in &mut self.layers {
            current = layer.forward(&current, self.parallelism)?;
        }
        self.forward_ran = true;
        Ok(current)
    }

    /// Propagates an error tensor backward through the layers in reverse
    /// insertion order, updating weights layer by layer. Gradient flow
    /// stops in front of the input layer.
    ///
    /// # Errors
    ///
    /// [`TensorNetError::StateViolation`] unless prepared, or if no forward
    /// pass has run in the current prepared cycle.
    pub fn backward(&mut self, error: &Tensor) -> Result<(), TensorNetError> {
        self.require_state(NetworkState::Prepared, "backward")?;
        if !self.forward_ran {
            return Err(TensorNetError::StateViolation {
                operation: "backward".to_string(),
                state: "prepared, but no forward pass has run in this cycle".to_string(),
            });
        }
        let mut current = error.duplicate();
        for layer in self.layers.iter_mut().rev() {
            if layer.kind() == LayerKind::Input {
                break;
            }
            current = layer.backward(&current, self.parallelism)?;
        }
        Ok(())
    }

    fn require_state(
        &self,
        expected: NetworkState,
        operation: &str,
    ) -> Result<(), TensorNetError> {
        if self.state != expected {
            return Err(TensorNetError::StateViolation {
                operation: operation.to_string(),
                state: self.state.as_str().to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "network_test.rs"]
mod tests;
