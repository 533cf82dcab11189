use std::collections::HashMap;

use growlog_store::StoreContext;
use growlog_types::{GrowingObject, ObjectType};

use crate::code::ValidationFailure;
use crate::config::GateConfig;
use crate::error::GateError;
use crate::query::FetchQuery;
use crate::validator::{GrowingObjectValidator, ObjectValidator};

/// Maps object-type tags to their validators.
///
/// Built once at startup; lookups never construct anything.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<ObjectType, Box<dyn ObjectValidator>>,
}

impl ValidatorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with validators for logs and channel sets.
    pub fn with_defaults(config: GateConfig) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(GrowingObjectValidator::new(ObjectType::Log, config.clone())));
        registry.register(Box::new(GrowingObjectValidator::new(ObjectType::ChannelSet, config)));
        registry
    }

    /// Register a validator under its object type, replacing any previous one.
    pub fn register(&mut self, validator: Box<dyn ObjectValidator>) {
        self.validators.insert(validator.object_type(), validator);
    }

    /// The validator for an object type.
    pub fn get(&self, object_type: ObjectType) -> Result<&dyn ObjectValidator, GateError> {
        self.validators
            .get(&object_type)
            .map(|v| v.as_ref())
            .ok_or(GateError::UnregisteredObjectType(object_type))
    }

    /// Registered object types, sorted.
    pub fn object_types(&self) -> Vec<ObjectType> {
        let mut types: Vec<ObjectType> = self.validators.keys().copied().collect();
        types.sort();
        types
    }

    pub fn validate_for_get(
        &self,
        object_type: ObjectType,
        query: &FetchQuery,
    ) -> Result<Option<ValidationFailure>, GateError> {
        self.get(object_type)?.validate_for_get(query)
    }

    /// Apply insert defaults to the object, then validate it.
    pub fn validate_for_insert(
        &self,
        object_type: ObjectType,
        object: &mut GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError> {
        let validator = self.get(object_type)?;
        validator.prepare_for_insert(object);
        validator.validate_for_insert(object, store)
    }

    pub fn validate_for_update(
        &self,
        object_type: ObjectType,
        object: &GrowingObject,
        store: &StoreContext,
    ) -> Result<Option<ValidationFailure>, GateError> {
        self.get(object_type)?.validate_for_update(object, store)
    }
}

impl std::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("object_types", &self.object_types())
            .finish()
    }
}
