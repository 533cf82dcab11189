/// Errors from data-adapter operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The object has no complete identity and cannot be stored.
    #[error("object has no complete identity")]
    MissingIdentity,

    /// A lock guarding adapter state was poisoned by a panicking writer.
    #[error("adapter lock poisoned")]
    LockPoisoned,

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error reading or writing a fixture.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
