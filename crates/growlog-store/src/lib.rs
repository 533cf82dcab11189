//! Data-adapter boundary for GrowLog.
//!
//! Validation only ever reads from storage: it asks whether an object exists
//! and fetches the currently stored revision of an object. This crate defines
//! that read boundary ([`DataAdapter`]), an in-memory implementation for tests
//! and embedding, and [`StoreContext`], the bundle of adapters handed to every
//! validation entry point.

pub mod context;
pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use context::StoreContext;
pub use error::{StoreError, StoreResult};
pub use fixture::StoreFixture;
pub use memory::InMemoryAdapter;
pub use traits::DataAdapter;
