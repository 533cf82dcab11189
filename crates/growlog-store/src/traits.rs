use growlog_types::ObjectUri;

use crate::error::StoreResult;

/// Read access to stored objects of one type.
///
/// Implementations decide how identities are matched (case-exact or
/// case-folded); validation relies on `get` returning the object as stored so
/// it can compare declared uids against stored ones.
pub trait DataAdapter<T>: Send + Sync {
    /// Fetch the stored object with this identity.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn get(&self, uri: &ObjectUri) -> StoreResult<Option<T>>;

    /// Check whether an object with this identity exists.
    ///
    /// Default implementation calls `get()`. Backends may override to avoid
    /// materializing the object.
    fn exists(&self, uri: &ObjectUri) -> StoreResult<bool> {
        Ok(self.get(uri)?.is_some())
    }
}
