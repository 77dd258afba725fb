//! Layers, activations and the network lifecycle.

pub mod activation;
pub mod factory;
pub mod init;
pub mod layer;
pub mod network;

pub use activation::Activation;
pub use factory::{LayerFactory, RandomInitLayerFactory, WeightInit};
pub use layer::{Layer, LayerKind};
pub use network::{Network, NetworkState};
