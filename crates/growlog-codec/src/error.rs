use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("data delimiter must not be empty")]
    EmptyDelimiter,

    #[error("data delimiter must not contain whitespace: {0:?}")]
    InvalidDelimiter(String),

    #[error("malformed channel data at row {row}: {reason}")]
    Shape { row: usize, reason: String },

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
