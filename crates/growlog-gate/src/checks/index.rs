use growlog_types::GrowingObject;

use crate::code::{ErrorCode, ValidationFailure};

/// Which index families a request bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestedRanges {
    /// A start or end index in the object's native numeric index.
    pub numeric: bool,
    /// A start or end date-time index.
    pub date_time: bool,
}

impl RequestedRanges {
    /// The range bounds declared on an object payload.
    pub fn of(object: &GrowingObject) -> Self {
        Self {
            numeric: object.has_numeric_range(),
            date_time: object.has_date_time_range(),
        }
    }
}

/// Fail with `MixedStructuralRangeIndices` when both a numeric and a
/// date-time bound are present.
pub fn validate_range_consistency(ranges: RequestedRanges) -> Option<ValidationFailure> {
    if ranges.numeric && ranges.date_time {
        return Some(ValidationFailure::new(
            ErrorCode::MixedStructuralRangeIndices,
            &["startIndex", "endIndex", "startDateTimeIndex", "endDateTimeIndex"],
        ));
    }
    None
}
