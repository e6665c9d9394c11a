use crate::datatypes::DataType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("Empty view has no front or back element")]
    Empty,
    #[error("Index {index} out of bounds for view of length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error("Invalid bounds [{begin}, {end}) for storage of length {len}")]
    InvalidBounds { begin: usize, end: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("No {requested} data in view (active type: {})", display_active(.active))]
    NotFound {
        requested: DataType,
        active: Option<DataType>,
    },
    #[error("View is not bound to any type")]
    Unbound,
    #[error("Range error: {0}")]
    Range(#[from] RangeError),
}

fn display_active(active: &Option<DataType>) -> String {
    match active {
        Some(dtype) => dtype.to_string(),
        None => "none".to_string(),
    }
}

pub type Result<T, E = ViewError> = std::result::Result<T, E>;
