//! Validation pipeline for GrowLog growing objects.
//!
//! Every fetch, insert and update of a log or channel set passes through a
//! fail-fast pipeline of ordered stages before anything is written. The first
//! stage that fails rejects the request with a single [`ValidationFailure`]:
//! a stable [`ErrorCode`] plus the offending field path. Stages consult
//! storage only through the read-only adapters of a
//! [`StoreContext`](growlog_store::StoreContext).
//!
//! # Quick Start
//!
//! ```rust
//! use growlog_gate::{GateConfig, ValidatorRegistry};
//! use growlog_store::{StoreContext, StoreFixture};
//! use growlog_types::{Column, DataBlock, GrowingObject, ObjectType, Well, Wellbore};
//!
//! let store = StoreContext::from_fixture(StoreFixture {
//!     wells: vec![Well::new("w1")],
//!     wellbores: vec![Wellbore::new("w1", "b1")],
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! let mut log = GrowingObject::depth_log("w1", "b1", "l1", "MD");
//! log.columns = Some(vec![
//!     Column::new("c0", "MD", Some("m")),
//!     Column::new("c1", "ROP", Some("m/h")),
//! ]);
//! log.data = Some(vec![DataBlock::new("MD,ROP", "m,m/h", &["100.0,12.3"])]);
//!
//! let registry = ValidatorRegistry::with_defaults(GateConfig::default());
//! let failure = registry
//!     .validate_for_insert(ObjectType::Log, &mut log, &store)
//!     .unwrap();
//! assert!(failure.is_none());
//! ```

pub mod checks;
pub mod code;
pub mod config;
pub mod error;
pub mod gate;
pub mod query;
pub mod registry;
pub mod stage;
pub mod stages;
pub mod validator;

// Re-exports for convenience.
pub use code::{ErrorCode, ValidationFailure};
pub use config::GateConfig;
pub use error::GateError;
pub use gate::{GateResult, Pipeline};
pub use query::{ColumnSelector, DataSelector, FetchQuery, ReturnElements};
pub use registry::ValidatorRegistry;
pub use stage::{Stage, StageDecision, StageResult};
pub use stages::{FetchRequest, InsertRequest, UpdateRequest};
pub use validator::{GrowingObjectValidator, ObjectValidator};
