use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::index::Measure;

/// Value type carried by a column or point-metadata entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    Double,
    Float,
    Long,
    Int,
    String,
    DateTime,
    Boolean,
    Bytes,
}

/// Auxiliary descriptor attached to every value of a multi-component channel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointMetadata {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub value_type: ValueType,
}

/// A data column (curve/channel) declared on a growing object.
///
/// The mnemonic identifies the column inside its object. Identity comparisons
/// are case-sensitive; existence lookups fold case.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub mnemonic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_type: Option<ValueType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_index: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_index: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date_time_index: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_date_time_index: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub point_metadata: Vec<PointMetadata>,
}

impl Column {
    /// A column with the given uid, mnemonic and unit and nothing else set.
    pub fn new(uid: impl Into<String>, mnemonic: impl Into<String>, unit: Option<&str>) -> Self {
        Self {
            uid: Some(uid.into()),
            mnemonic: mnemonic.into(),
            unit: unit.map(str::to_string),
            value_type: None,
            min_index: None,
            max_index: None,
            min_date_time_index: None,
            max_date_time_index: None,
            point_metadata: Vec::new(),
        }
    }

    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    pub fn with_point_metadata(mut self, metadata: PointMetadata) -> Self {
        self.point_metadata.push(metadata);
        self
    }

    /// Returns `true` when the column declares a numeric index bound.
    pub fn has_numeric_range(&self) -> bool {
        self.min_index.is_some() || self.max_index.is_some()
    }

    /// Returns `true` when the column declares a date-time index bound.
    pub fn has_date_time_range(&self) -> bool {
        self.min_date_time_index.is_some() || self.max_date_time_index.is_some()
    }

    /// The declared unit, treating an empty string as no unit.
    pub fn declared_unit(&self) -> Option<&str> {
        self.unit.as_deref().filter(|u| !u.is_empty())
    }
}

/// An auxiliary named parameter carried on a growing object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_flags() {
        let mut column = Column::new("c1", "ROP", Some("m/h"));
        assert!(!column.has_numeric_range());
        assert!(!column.has_date_time_range());

        column.max_index = Some(Measure::new(120.0, "m"));
        assert!(column.has_numeric_range());

        column.min_date_time_index =
            Some(DateTime::parse_from_rfc3339("2016-01-01T00:00:00Z").unwrap());
        assert!(column.has_date_time_range());
    }

    #[test]
    fn empty_unit_is_not_declared() {
        assert_eq!(Column::new("c1", "MD", Some("")).declared_unit(), None);
        assert_eq!(Column::new("c1", "MD", Some("m")).declared_unit(), Some("m"));
        assert_eq!(Column::new("c1", "MD", None).declared_unit(), None);
    }

    #[test]
    fn deserializes_minimal_json() {
        let column: Column = serde_json::from_str(r#"{"mnemonic":"GR","unit":"gAPI"}"#).unwrap();
        assert_eq!(column.mnemonic, "GR");
        assert!(column.uid.is_none());
        assert!(column.point_metadata.is_empty());
    }

    #[test]
    fn point_metadata_builder() {
        let column = Column::new("c1", "ROP", Some("m/h"))
            .with_value_type(ValueType::Double)
            .with_point_metadata(PointMetadata {
                name: "confidence".into(),
                description: None,
                value_type: ValueType::Boolean,
            });
        assert_eq!(column.value_type, Some(ValueType::Double));
        assert_eq!(column.point_metadata.len(), 1);
    }
}
