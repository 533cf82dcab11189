use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of value that orders the rows of a growing object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexKind {
    /// Measured depth (structural, numeric).
    #[default]
    Depth,
    /// Absolute date-time.
    DateTime,
    /// Elapsed time since a reference point (numeric, but time-based).
    ElapsedTime,
}

impl IndexKind {
    /// Returns `true` for time-based indexes.
    ///
    /// Elapsed time only counts when `include_elapsed` is set: its values are
    /// numeric like depth, but it is still a time log.
    pub fn is_time(&self, include_elapsed: bool) -> bool {
        match self {
            Self::Depth => false,
            Self::DateTime => true,
            Self::ElapsedTime => include_elapsed,
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Depth => "depth",
            Self::DateTime => "date time",
            Self::ElapsedTime => "elapsed time",
        };
        f.write_str(s)
    }
}

/// Direction in which index values progress from row to row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IndexDirection {
    #[default]
    Increasing,
    Decreasing,
}

/// A numeric value with its unit of measure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,
}

impl Measure {
    pub fn new(value: f64, uom: impl Into<String>) -> Self {
        Self {
            value,
            uom: Some(uom.into()),
        }
    }
}
