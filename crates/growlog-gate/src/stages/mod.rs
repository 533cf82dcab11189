//! Per-operation requests and the ordered stages that validate them.

pub mod fetch;
pub mod insert;
pub mod update;

pub use fetch::FetchRequest;
pub use insert::InsertRequest;
pub use update::UpdateRequest;
