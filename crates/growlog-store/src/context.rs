use std::fmt;
use std::sync::Arc;

use growlog_types::{GrowingObject, ObjectType, ObjectUri, Well, Wellbore};

use crate::error::{StoreError, StoreResult};
use crate::fixture::StoreFixture;
use crate::memory::InMemoryAdapter;
use crate::traits::DataAdapter;

/// The adapters a validation request may consult.
///
/// Growing objects of every type share one adapter; their identities carry the
/// object type, so a log and a channel set with the same uids never collide.
#[derive(Clone)]
pub struct StoreContext {
    pub wells: Arc<dyn DataAdapter<Well>>,
    pub wellbores: Arc<dyn DataAdapter<Wellbore>>,
    pub growing: Arc<dyn DataAdapter<GrowingObject>>,
}

impl StoreContext {
    pub fn new(
        wells: Arc<dyn DataAdapter<Well>>,
        wellbores: Arc<dyn DataAdapter<Wellbore>>,
        growing: Arc<dyn DataAdapter<GrowingObject>>,
    ) -> Self {
        Self {
            wells,
            wellbores,
            growing,
        }
    }

    /// A context backed by empty in-memory adapters.
    pub fn in_memory() -> Self {
        Self::from_memory(
            InMemoryAdapter::new(),
            InMemoryAdapter::new(),
            InMemoryAdapter::new(),
        )
    }

    /// A context backed by the given in-memory adapters.
    pub fn from_memory(
        wells: InMemoryAdapter<Well>,
        wellbores: InMemoryAdapter<Wellbore>,
        growing: InMemoryAdapter<GrowingObject>,
    ) -> Self {
        Self::new(Arc::new(wells), Arc::new(wellbores), Arc::new(growing))
    }

    /// A context populated from a fixture.
    pub fn from_fixture(fixture: StoreFixture) -> StoreResult<Self> {
        let wells = InMemoryAdapter::new();
        for well in fixture.wells {
            wells.put(well)?;
        }
        let wellbores = InMemoryAdapter::new();
        for wellbore in fixture.wellbores {
            wellbores.put(wellbore)?;
        }
        let growing = InMemoryAdapter::new();
        for log in fixture.logs {
            growing.put(log)?;
        }
        for channel_set in fixture.channel_sets {
            let uri = channel_set
                .uri_as(ObjectType::ChannelSet)
                .ok_or(StoreError::MissingIdentity)?;
            growing.put_at(&uri, channel_set)?;
        }
        Ok(Self::from_memory(wells, wellbores, growing))
    }

    /// Look up the wellbore a growing object belongs to.
    pub fn wellbore(&self, uid_well: &str, uid_wellbore: &str) -> StoreResult<Option<Wellbore>> {
        self.wellbores
            .get(&ObjectUri::wellbore(uid_well, uid_wellbore))
    }

    /// Look up a stored growing object.
    pub fn growing(&self, uri: &ObjectUri) -> StoreResult<Option<GrowingObject>> {
        self.growing.get(uri)
    }
}

impl fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreContext").finish_non_exhaustive()
    }
}
