pub mod sample_dataset;

pub use sample_dataset::SampleDataset;
