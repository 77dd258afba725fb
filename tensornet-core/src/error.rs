use thiserror::Error;

/// Custom error type for the TensorNet framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum TensorNetError {
    #[error("Shape mismatch: expected {expected:?}, got {actual:?} during operation {operation}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
        operation: String,
    },

    #[error("Incompatible shapes for operation {operation}: {shape1:?} and {shape2:?}")]
    IncompatibleShapes {
        shape1: Vec<usize>,
        shape2: Vec<usize>,
        operation: String,
    },

    #[error("Index out of bounds: index {index:?} for shape {shape:?}")]
    IndexOutOfBounds {
        index: Vec<usize>,
        shape: Vec<usize>,
    },

    #[error("Operation {operation} requires rank {expected}, tensor has rank {actual}")]
    UnsupportedRank {
        operation: String,
        expected: usize,
        actual: usize,
    },

    #[error("Tensor creation error: data length {data_len} does not match shape {shape:?}")]
    TensorCreationError { data_len: usize, shape: Vec<usize> },

    #[error("Invalid parallelism degree {requested} for operation {operation}")]
    InvalidParallelism { requested: usize, operation: String },

    #[error("Invalid argument for {operation}: {reason}")]
    InvalidArgument { operation: String, reason: String },

    #[error("State violation: {operation} is not legal while the network is {state}")]
    StateViolation { operation: String, state: String },

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
