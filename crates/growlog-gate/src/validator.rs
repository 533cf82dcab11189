use growlog_store::StoreContext;
use growlog_types::{GrowingObject, ObjectType};

use crate::code::ValidationFailure;
use crate::config::GateConfig;
use crate::error::GateError;
use crate::gate::GateResult;
use crate::query::FetchQuery;
use crate::stages::{fetch, insert, update, FetchRequest, InsertRequest, UpdateRequest};

/// Validation entry points for one object type.
///
/// Each returns the single reason the request is rejected, or `None` when it
/// is accepted. `Err` means the run could not reach a verdict.
pub trait ObjectValidator: Send + Sync {
    /// The object type this validator handles.
    fn object_type(&self) -> ObjectType;

    /// Validate a fetch query.
    fn validate_for_get(&self, query: &FetchQuery) -> Result<Option<ValidationFailure>, GateError>;

    /// Validate a new object against the store it will join.
    fn validate_for_insert(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError>;

    /// Validate a partial revision against the stored object.
    fn validate_for_update(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError>;

    /// Fill in defaults before an object is validated for insert.
    fn prepare_for_insert(&self, _object: &mut GrowingObject) {}
}

/// Validator for logs and channel sets.
#[derive(Clone, Debug)]
pub struct GrowingObjectValidator {
    object_type: ObjectType,
    config: GateConfig,
}

impl GrowingObjectValidator {
    pub fn new(object_type: ObjectType, config: GateConfig) -> Self {
        Self { object_type, config }
    }

    /// The current configuration.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run the fetch pipeline and keep the per-stage audit trail.
    pub fn evaluate_get(&self, query: &FetchQuery) -> Result<GateResult, GateError> {
        fetch::pipeline().evaluate(&FetchRequest::new(query))
    }

    /// Run the insert pipeline and keep the per-stage audit trail.
    pub fn evaluate_insert(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<GateResult, GateError> {
        let request = InsertRequest {
            object,
            object_type: self.object_type,
            store,
            config: &self.config,
        };
        insert::pipeline().evaluate(&request)
    }

    /// Run the update pipeline and keep the per-stage audit trail.
    pub fn evaluate_update(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<GateResult, GateError> {
        let request = UpdateRequest::new(object, self.object_type, store, &self.config);
        update::pipeline().evaluate(&request)
    }
}

impl ObjectValidator for GrowingObjectValidator {
    fn object_type(&self) -> ObjectType {
        self.object_type
    }

    fn validate_for_get(&self, query: &FetchQuery) -> Result<Option<ValidationFailure>, GateError> {
        Ok(self.evaluate_get(query)?.failure)
    }

    fn validate_for_insert(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError> {
        Ok(self.evaluate_insert(object, store)?.failure)
    }

    fn validate_for_update(
        &self,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError> {
        Ok(self.evaluate_update(object, store)?.failure)
    }

    /// Channel sets get a fresh uid for every channel declared without one.
    fn prepare_for_insert(&self, object: &mut GrowingObject) {
        if self.object_type == ObjectType::ChannelSet {
            let assigned = object.assign_missing_column_uids();
            if assigned > 0 {
                tracing::debug!(assigned, "assigned channel uids");
            }
        }
    }
}
