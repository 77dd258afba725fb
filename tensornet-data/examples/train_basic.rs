//! Trains a tiny two-layer network to map basis vectors onto target
//! vectors, then reports how many samples pass the error threshold.

use std::sync::Arc;

use tensornet_core::nn::{Activation, LayerKind, Network, RandomInitLayerFactory};
use tensornet_core::tensor::CpuTensorFactory;
use tensornet_core::train::{BackpropTrainer, LogProgress, TrainerConfig};
use tensornet_core::{Tensor, TensorNetError};
use tensornet_data::SampleDataset;

fn main() -> Result<(), TensorNetError> {
    let mut network = Network::new(
        Arc::new(CpuTensorFactory),
        Arc::new(RandomInitLayerFactory::default()),
    );
    let input = network.build_layer(LayerKind::Input, 2, 2, Activation::Identity)?;
    let output = network.build_layer(LayerKind::Output, 2, 2, Activation::Identity)?;
    network.add(vec![input, output])?;
    network.prepare()?;

    let dataset = SampleDataset::new(vec![
        (
            Tensor::new(vec![1.0, 0.0], vec![2])?,
            Tensor::new(vec![0.3, 0.7], vec![2])?,
        ),
        (
            Tensor::new(vec![0.0, 1.0], vec![2])?,
            Tensor::new(vec![0.8, 0.2], vec![2])?,
        ),
    ])?;

    let trainer = BackpropTrainer::new(TrainerConfig {
        max_epoch: 500,
        max_error: 0.01,
        learning_rate: 0.3,
    })?;

    let report = trainer.train(&mut network, &dataset, &mut LogProgress::default())?;
    println!(
        "trained for {} epochs, converged: {}",
        report.epochs, report.converged
    );

    let test = trainer.test(&mut network, &dataset)?;
    println!("{}/{} samples within threshold", test.converged, test.total);
    Ok(())
}
