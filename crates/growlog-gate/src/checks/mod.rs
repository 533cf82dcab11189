//! Reusable checks shared by the fetch, insert and update pipelines.
//!
//! Every check is a pure function over already-loaded data that returns the
//! failure it detects, if any. Store lookups live in the pipeline stages.

pub mod columns;
pub mod index;
pub mod merge;
pub mod rows;
