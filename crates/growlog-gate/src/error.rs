use std::fmt;

use growlog_store::StoreError;
use growlog_types::ObjectType;

/// Errors that stop a validation run before it reaches a verdict.
///
/// A rejected request is not an error: it is a
/// [`ValidationFailure`](crate::ValidationFailure) carried in the result.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// A data-adapter lookup failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// No validator is registered for the object type.
    #[error("no validator registered for object type '{0}'")]
    UnregisteredObjectType(ObjectType),

    /// Configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PartialEq for GateError {
    fn eq(&self, other: &Self) -> bool {
        // Compare by display representation for test convenience.
        fmt::format(format_args!("{self}")) == fmt::format(format_args!("{other}"))
    }
}

impl Eq for GateError {}
