//! Training loop and its collaborator contracts.

pub mod dataset;
pub mod progress;
pub mod trainer;

pub use dataset::DatasetProvider;
pub use progress::{LogProgress, NoopProgress, ProgressIndicator};
pub use trainer::{BackpropTrainer, TestReport, TrainReport, TrainerConfig};
