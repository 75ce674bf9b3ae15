//! Error types for wire conversion.
use thiserror::Error;

pub use crate::report::ValidationError;

/// Everything that can abort a conversion. None of these are recovered internally.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("malformed JSON input: {0}")]
    MalformedInput(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("schema not found: {0}")]
    SchemaNotFound(String),

    #[error("validated value does not fit the typed model at {path}: {message}")]
    Model { path: String, message: String },

    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type ConvertResult<T> = Result<T, ConvertError>;
