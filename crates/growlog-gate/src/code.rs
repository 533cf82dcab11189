use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifiers for every way a request can be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Index ranges and fetch filters
    MixedStructuralRangeIndices,
    RecurringLogData,
    DuplicateMnemonics,
    MissingMnemonicElement,
    ColumnIdentifiersNotSame,
    MissingMnemonicList,

    // Parent hierarchy and object identity
    MissingParentUid,
    MissingParentDataObject,
    IncorrectCaseParentUid,
    DataObjectUidAlreadyExists,
    DataObjectNotExist,
    DataObjectUidMissing,

    // Column and parameter identity
    MissingElementUid,
    ChildUidNotUnique,
    BadColumnIdentifier,
    DuplicateColumnIdentifiers,
    MnemonicsNotUnique,
    AddingUpdatingLogCurveAtTheSameTime,
    IndexRangeSpecified,

    // Row data
    MaxDataExceeded,
    MissingColumnIdentifiers,
    MissingUnitList,
    MissingUnitForMeasureData,
    UnitListNotMatch,
    IndexCurveNotFound,
    IndexNotFirstInDataColumnList,
    InvalidDataDelimiter,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MixedStructuralRangeIndices => "MixedStructuralRangeIndices",
            Self::RecurringLogData => "RecurringLogData",
            Self::DuplicateMnemonics => "DuplicateMnemonics",
            Self::MissingMnemonicElement => "MissingMnemonicElement",
            Self::ColumnIdentifiersNotSame => "ColumnIdentifiersNotSame",
            Self::MissingMnemonicList => "MissingMnemonicList",
            Self::MissingParentUid => "MissingParentUid",
            Self::MissingParentDataObject => "MissingParentDataObject",
            Self::IncorrectCaseParentUid => "IncorrectCaseParentUid",
            Self::DataObjectUidAlreadyExists => "DataObjectUidAlreadyExists",
            Self::DataObjectNotExist => "DataObjectNotExist",
            Self::DataObjectUidMissing => "DataObjectUidMissing",
            Self::MissingElementUid => "MissingElementUid",
            Self::ChildUidNotUnique => "ChildUidNotUnique",
            Self::BadColumnIdentifier => "BadColumnIdentifier",
            Self::DuplicateColumnIdentifiers => "DuplicateColumnIdentifiers",
            Self::MnemonicsNotUnique => "MnemonicsNotUnique",
            Self::AddingUpdatingLogCurveAtTheSameTime => "AddingUpdatingLogCurveAtTheSameTime",
            Self::IndexRangeSpecified => "IndexRangeSpecified",
            Self::MaxDataExceeded => "MaxDataExceeded",
            Self::MissingColumnIdentifiers => "MissingColumnIdentifiers",
            Self::MissingUnitList => "MissingUnitList",
            Self::MissingUnitForMeasureData => "MissingUnitForMeasureData",
            Self::UnitListNotMatch => "UnitListNotMatch",
            Self::IndexCurveNotFound => "IndexCurveNotFound",
            Self::IndexNotFirstInDataColumnList => "IndexNotFirstInDataColumnList",
            Self::InvalidDataDelimiter => "InvalidDataDelimiter",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The single reason a request was rejected: a code plus the offending
/// field path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailure {
    pub code: ErrorCode,
    pub fields: Vec<String>,
}

impl ValidationFailure {
    pub fn new(code: ErrorCode, fields: &[&str]) -> Self {
        Self {
            code,
            fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.code, self.fields.join(", "))
    }
}
