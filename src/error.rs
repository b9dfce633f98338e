use std::fmt;
use thiserror::Error;

/// Simplified `Result` using [`SparseError`](crate::SparseError) as error type
pub type Result<T> = std::result::Result<T, SparseError>;

/// The dimension an out-of-range index was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Margin {
    Row,
    Column,
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Margin::Row => write!(f, "row"),
            Margin::Column => write!(f, "column"),
        }
    }
}

/// Error variants from attaching a view, indexing into it or crossing the
/// host boundary
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SparseError {
    /// The backing arrays do not describe a matrix of the announced shape
    #[error("invalid shape: {0}")]
    InvalidShape(String),
    #[error("{margin} index {index} out of bounds for {bound} {margin}s")]
    IndexOutOfBounds {
        margin: Margin,
        index: i64,
        bound: usize,
    },
    #[error("operation requires a square matrix, got {rows} x {cols}")]
    NotSquare { rows: usize, cols: usize },
    #[error("unsupported host class {0:?}, expected \"dgCMatrix\"")]
    UnsupportedClass(String),
    #[error("host object has no slot {0:?}")]
    MissingSlot(&'static str),
    #[error("slot {slot:?} holds {found} data, expected {expected}")]
    SlotType {
        slot: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
}
