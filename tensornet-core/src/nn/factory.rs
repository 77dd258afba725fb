use std::fmt::Debug;

use crate::error::TensorNetError;
use crate::nn::activation::Activation;
use crate::nn::init;
use crate::nn::layer::{Layer, LayerKind};
use crate::tensor::TensorFactory;

/// Factory contract for producing layers on demand.
///
/// The network depends only on this trait; implementations decide how
/// weights are allocated (through the supplied [`TensorFactory`]) and
/// initialized. Resolved by the caller at startup, never discovered.
pub trait LayerFactory: Debug + Send + Sync {
    /// Creates a layer of the given kind and sizes.
    ///
    /// For `Input` layers, `in_size` and `out_size` must agree and the
    /// activation is ignored.
    fn create(
        &self,
        kind: LayerKind,
        in_size: usize,
        out_size: usize,
        activation: Activation,
        tensors: &dyn TensorFactory,
    ) -> Result<Layer, TensorNetError>;
}

/// Weight initialization scheme for [`RandomInitLayerFactory`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightInit {
    Uniform { low: f32, high: f32 },
    Normal { mean: f32, std_dev: f32 },
}

/// Default layer factory: random weight initialization, zero bias.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomInitLayerFactory {
    init: WeightInit,
}

impl RandomInitLayerFactory {
    pub fn new(init: WeightInit) -> Self {
        Self { init }
    }
}

impl Default for RandomInitLayerFactory {
    fn default() -> Self {
        Self::new(WeightInit::Uniform {
            low: -0.5,
            high: 0.5,
        })
    }
}

impl LayerFactory for RandomInitLayerFactory {
    fn create(
        &self,
        kind: LayerKind,
        in_size: usize,
        out_size: usize,
        activation: Activation,
        tensors: &dyn TensorFactory,
    ) -> Result<Layer, TensorNetError> {
        match kind {
            LayerKind::Input => {
                if in_size != out_size {
                    return Err(TensorNetError::InvalidArgument {
                        operation: "LayerFactory::create".to_string(),
                        reason: format!(
                            "input layer sizes must agree, got {} and {}",
                            in_size, out_size
                        ),
                    });
                }
                Layer::input(in_size)
            }
            LayerKind::Dense | LayerKind::Output => {
                let mut weight = tensors.create(&[in_size, out_size])?;
                match self.init {
                    WeightInit::Uniform { low, high } => init::uniform_(&mut weight, low, high)?,
                    WeightInit::Normal { mean, std_dev } => {
                        init::normal_(&mut weight, mean, std_dev)?
                    }
                }
                let bias = tensors.create(&[out_size])?;
                match kind {
                    LayerKind::Dense => Layer::dense(weight, Some(bias), activation),
                    _ => Layer::output(weight, Some(bias), activation),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tensor::CpuTensorFactory;

    #[test]
    fn test_creates_input_layer() {
        let factory = RandomInitLayerFactory::default();
        let layer = factory
            .create(LayerKind::Input, 4, 4, Activation::Identity, &CpuTensorFactory)
            .unwrap();
        assert_eq!(layer.kind(), LayerKind::Input);
        assert!(layer.weight().is_none());
    }

    #[test]
    fn test_input_layer_size_mismatch() {
        let factory = RandomInitLayerFactory::default();
        let result = factory.create(
            LayerKind::Input,
            4,
            5,
            Activation::Identity,
            &CpuTensorFactory,
        );
        assert!(matches!(result, Err(TensorNetError::InvalidArgument { .. })));
    }

    #[test]
    fn test_creates_dense_layer_with_random_weights() {
        let factory = RandomInitLayerFactory::default();
        let layer = factory
            .create(LayerKind::Dense, 3, 2, Activation::Sigmoid, &CpuTensorFactory)
            .unwrap();
        assert_eq!(layer.in_size(), 3);
        assert_eq!(layer.out_size(), 2);
        assert_eq!(layer.activation(), Activation::Sigmoid);
        let weight = layer.weight().unwrap();
        assert_eq!(weight.dims(), &[3, 2]);
        assert!(weight.data().iter().all(|&x| (-0.5..0.5).contains(&x)));
        assert!(weight.data().iter().any(|&x| x != 0.0));
        // Bias starts at zero.
        assert!(layer.bias().unwrap().data().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_creates_output_layer_with_normal_init() {
        let factory = RandomInitLayerFactory::new(WeightInit::Normal {
            mean: 0.0,
            std_dev: 0.1,
        });
        let layer = factory
            .create(LayerKind::Output, 2, 2, Activation::Softmax, &CpuTensorFactory)
            .unwrap();
        assert_eq!(layer.kind(), LayerKind::Output);
        assert!(layer.weight().unwrap().data().iter().any(|&x| x != 0.0));
    }
}
