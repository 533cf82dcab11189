use std::collections::HashMap;
use std::sync::RwLock;

use growlog_types::{DataObject, ObjectUri};

use crate::error::{StoreError, StoreResult};
use crate::traits::DataAdapter;

/// In-memory, HashMap-based adapter.
///
/// Intended for tests and embedding. Objects are held behind a `RwLock` and
/// cloned on read and write. Identities are matched case-insensitively, so a
/// lookup for `well(W1)` finds an object stored as `well(w1)`; the object comes
/// back with its stored casing intact.
pub struct InMemoryAdapter<T> {
    objects: RwLock<HashMap<String, T>>,
}

impl<T> InMemoryAdapter<T> {
    /// Create a new empty adapter.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Number of objects currently stored.
    pub fn len(&self) -> StoreResult<usize> {
        Ok(self.objects.read().map_err(|_| StoreError::LockPoisoned)?.len())
    }

    /// Returns `true` if the adapter holds no objects.
    pub fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Remove an object. Returns `true` if something was removed.
    pub fn remove(&self, uri: &ObjectUri) -> StoreResult<bool> {
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.remove(&uri.key()).is_some())
    }
}

impl<T: DataObject + Clone> InMemoryAdapter<T> {
    /// Store an object under its own identity, replacing any previous revision.
    pub fn put(&self, object: T) -> StoreResult<ObjectUri> {
        let uri = object.uri().ok_or(StoreError::MissingIdentity)?;
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(uri.key(), object);
        tracing::trace!(%uri, "stored object");
        Ok(uri)
    }

    /// Store an object under an explicit identity.
    ///
    /// Growing objects are typed by where they are stored (a log and a channel
    /// set share a shape), so callers holding channel sets use this.
    pub fn put_at(&self, uri: &ObjectUri, object: T) -> StoreResult<()> {
        let mut map = self.objects.write().map_err(|_| StoreError::LockPoisoned)?;
        map.insert(uri.key(), object);
        Ok(())
    }
}

impl<T> Default for InMemoryAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> DataAdapter<T> for InMemoryAdapter<T> {
    fn get(&self, uri: &ObjectUri) -> StoreResult<Option<T>> {
        let map = self.objects.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.get(&uri.key()).cloned())
    }

    fn exists(&self, uri: &ObjectUri) -> StoreResult<bool> {
        let map = self.objects.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(map.contains_key(&uri.key()))
    }
}

impl<T> std::fmt::Debug for InMemoryAdapter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.objects.read().map(|m| m.len()).unwrap_or_default();
        f.debug_struct("InMemoryAdapter")
            .field("object_count", &count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growlog_types::{GrowingObject, ObjectType, Well, Wellbore};

    #[test]
    fn put_and_get() {
        let adapter = InMemoryAdapter::new();
        let uri = adapter.put(Well::new("w1")).unwrap();
        assert_eq!(adapter.get(&uri).unwrap(), Some(Well::new("w1")));
        assert_eq!(adapter.len().unwrap(), 1);
    }

    #[test]
    fn missing_object_is_none() {
        let adapter: InMemoryAdapter<Well> = InMemoryAdapter::new();
        assert!(adapter.get(&ObjectUri::well("w1")).unwrap().is_none());
        assert!(!adapter.exists(&ObjectUri::well("w1")).unwrap());
        assert!(adapter.is_empty().unwrap());
    }

    #[test]
    fn lookup_folds_case_and_keeps_stored_casing() {
        let adapter = InMemoryAdapter::new();
        adapter.put(Wellbore::new("w1", "b1")).unwrap();

        let found = adapter
            .get(&ObjectUri::wellbore("W1", "B1"))
            .unwrap()
            .unwrap();
        assert_eq!(found.uid_well, "w1");
        assert_eq!(found.uid, "b1");
        assert!(adapter.exists(&ObjectUri::wellbore("W1", "b1")).unwrap());
    }

    #[test]
    fn put_replaces_previous_revision() {
        let adapter = InMemoryAdapter::new();
        adapter.put(Well::new("w1")).unwrap();
        let mut renamed = Well::new("W1");
        renamed.name = Some("Renamed".into());
        adapter.put(renamed.clone()).unwrap();

        assert_eq!(adapter.len().unwrap(), 1);
        assert_eq!(adapter.get(&ObjectUri::well("w1")).unwrap(), Some(renamed));
    }

    #[test]
    fn put_without_identity_fails() {
        let adapter = InMemoryAdapter::new();
        let orphan = GrowingObject {
            uid: Some("l1".into()),
            ..Default::default()
        };
        assert!(matches!(
            adapter.put(orphan),
            Err(StoreError::MissingIdentity)
        ));
    }

    #[test]
    fn channel_sets_stored_by_explicit_uri() {
        let adapter = InMemoryAdapter::new();
        let cs = GrowingObject::depth_log("w1", "b1", "cs1", "MD");
        let uri = cs.uri_as(ObjectType::ChannelSet).unwrap();
        adapter.put_at(&uri, cs).unwrap();

        assert!(adapter.exists(&uri).unwrap());
        // Same uids under the log type are a different object.
        assert!(!adapter
            .exists(&ObjectUri::growing(ObjectType::Log, "w1", "b1", "cs1"))
            .unwrap());
    }

    #[test]
    fn remove() {
        let adapter = InMemoryAdapter::new();
        let uri = adapter.put(Well::new("w1")).unwrap();
        assert!(adapter.remove(&uri).unwrap());
        assert!(!adapter.remove(&uri).unwrap());
    }
}
