//! Error types for the nimlab crate

use thiserror::Error;

/// Main error type for the nimlab crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: heap {heap} holds {available} objects, cannot take {quantity}")]
    IllegalMove {
        heap: usize,
        quantity: u32,
        available: u32,
    },

    #[error("illegal move: taking {quantity} objects exceeds the per-move cap of {cap}")]
    ExceedsCap { quantity: u32, cap: u32 },

    #[error("heap index {heap} out of range for a board with {heaps} heaps")]
    HeapOutOfRange { heap: usize, heaps: usize },

    #[error("no moves available: all heaps are empty")]
    NoMovesAvailable,

    #[error("state {state} was queried before action enumeration")]
    MissingTableEntry { state: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
