//! Foundation types for GrowLog.
//!
//! This crate provides the object model shared by every other GrowLog crate:
//! growing objects (logs and channel sets) together with their columns,
//! auxiliary parameters, row-data blocks, index model, and the identities of
//! the well/wellbore hierarchy they belong to.
//!
//! # Key Types
//!
//! - [`GrowingObject`]: A log or channel set: curve metadata plus row data
//! - [`Column`]: A named, typed, unit-bearing data curve
//! - [`DataBlock`]: One wire payload: mnemonic list, unit list, delimited rows
//! - [`IndexKind`] / [`IndexDirection`]: How rows are ordered
//! - [`ObjectUri`]: Hierarchical identity (`well/wellbore/log`)
//! - [`ObjectType`]: Object-type tags used for validator registration

pub mod column;
pub mod error;
pub mod identity;
pub mod index;
pub mod object;

pub use column::{Column, Parameter, PointMetadata, ValueType};
pub use error::TypeError;
pub use identity::{ObjectType, ObjectUri};
pub use index::{IndexDirection, IndexKind, Measure};
pub use object::{CommonData, DataBlock, DataObject, GrowingObject, Well, Wellbore};
