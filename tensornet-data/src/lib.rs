//! In-memory dataset providers for the TensorNet trainer.

pub mod datasets;

pub use datasets::SampleDataset;
