use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

use crate::column::{Column, Parameter};
use crate::identity::{ObjectType, ObjectUri};
use crate::index::{IndexDirection, IndexKind, Measure};

/// Anything that can be stored and looked up by [`ObjectUri`].
pub trait DataObject {
    /// The identity of this object, or `None` when its uids are incomplete.
    fn uri(&self) -> Option<ObjectUri>;
}

/// Creation and last-change provenance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_creation: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_last_change: Option<DateTime<Utc>>,
}

/// One row-data payload.
///
/// The mnemonic list and unit list are delimiter-joined strings and every row
/// is a delimiter-joined value string aligned to the mnemonic list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic_list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_list: Option<String>,
    #[serde(default)]
    pub data: Vec<String>,
}

impl DataBlock {
    pub fn new(mnemonic_list: &str, unit_list: &str, rows: &[&str]) -> Self {
        Self {
            mnemonic_list: Some(mnemonic_list.to_string()),
            unit_list: Some(unit_list.to_string()),
            data: rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// A log or channel set: curve metadata plus appended row data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowingObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_well: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid_wellbore: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_type: Option<IndexKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<IndexDirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_curve: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_index: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_index: Option<Measure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date_time_index: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date_time_index: Option<DateTime<FixedOffset>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_delimiter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<Column>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<Parameter>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<DataBlock>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_data: Option<CommonData>,
}

impl GrowingObject {
    /// A depth log with identity and index curve set and no columns or data.
    pub fn depth_log(uid_well: &str, uid_wellbore: &str, uid: &str, index_curve: &str) -> Self {
        Self {
            uid: Some(uid.to_string()),
            uid_well: Some(uid_well.to_string()),
            uid_wellbore: Some(uid_wellbore.to_string()),
            index_type: Some(IndexKind::Depth),
            index_curve: Some(index_curve.to_string()),
            ..Default::default()
        }
    }

    /// The active index kind.
    ///
    /// Uses the declared index type; without one, a date-time range bound
    /// marks a date-time log and anything else is a depth log.
    pub fn classify(&self) -> IndexKind {
        match self.index_type {
            Some(kind) => kind,
            None if self.has_date_time_range() => IndexKind::DateTime,
            None => IndexKind::Depth,
        }
    }

    /// Returns `true` when rows are ordered by time.
    pub fn is_time_log(&self, include_elapsed: bool) -> bool {
        self.classify().is_time(include_elapsed)
    }

    /// Returns `true` when a numeric start or end index is present.
    pub fn has_numeric_range(&self) -> bool {
        self.start_index.is_some() || self.end_index.is_some()
    }

    /// Returns `true` when a date-time start or end index is present.
    pub fn has_date_time_range(&self) -> bool {
        self.start_date_time_index.is_some() || self.end_date_time_index.is_some()
    }

    /// Mnemonics of the declared columns, in declaration order.
    pub fn mnemonics(&self) -> Vec<String> {
        self.columns
            .iter()
            .flatten()
            .map(|c| c.mnemonic.clone())
            .collect()
    }

    /// The declared column whose mnemonic names the index curve.
    pub fn index_column(&self) -> Option<&Column> {
        let index_curve = self.index_curve.as_deref()?;
        self.columns
            .iter()
            .flatten()
            .find(|c| c.mnemonic == index_curve)
    }

    /// The index direction, increasing when undeclared.
    pub fn direction_or_default(&self) -> IndexDirection {
        self.direction.unwrap_or_default()
    }

    /// Data blocks, or an empty slice when none were supplied.
    pub fn data_blocks(&self) -> &[DataBlock] {
        self.data.as_deref().unwrap_or_default()
    }

    /// Give every column that lacks a uid a fresh one.
    ///
    /// Returns the number of uids assigned.
    pub fn assign_missing_column_uids(&mut self) -> usize {
        let mut assigned = 0;
        for column in self.columns.iter_mut().flatten() {
            let blank = column.uid.as_deref().map_or(true, |u| u.trim().is_empty());
            if blank {
                column.uid = Some(uuid::Uuid::now_v7().to_string());
                assigned += 1;
            }
        }
        assigned
    }

    /// Identity under the given object type (`log` or `channelSet`).
    pub fn uri_as(&self, object_type: ObjectType) -> Option<ObjectUri> {
        Some(ObjectUri::growing(
            object_type,
            self.uid_well.as_deref()?,
            self.uid_wellbore.as_deref()?,
            self.uid.as_deref().unwrap_or_default(),
        ))
    }
}

impl DataObject for GrowingObject {
    fn uri(&self) -> Option<ObjectUri> {
        self.uri_as(ObjectType::Log)
    }
}

/// Top of the object hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Well {
    pub uid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Well {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            name: None,
        }
    }
}

impl DataObject for Well {
    fn uri(&self) -> Option<ObjectUri> {
        Some(ObjectUri::well(&self.uid))
    }
}

/// A borehole belonging to a well.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wellbore {
    pub uid: String,
    pub uid_well: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Wellbore {
    pub fn new(uid_well: impl Into<String>, uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            uid_well: uid_well.into(),
            name: None,
        }
    }
}

impl DataObject for Wellbore {
    fn uri(&self) -> Option<ObjectUri> {
        Some(ObjectUri::wellbore(&self.uid_well, &self.uid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> GrowingObject {
        let mut log = GrowingObject::depth_log("w1", "b1", "l1", "MD");
        log.columns = Some(vec![
            Column::new("c0", "MD", Some("m")),
            Column::new("c1", "ROP", Some("m/h")),
        ]);
        log
    }

    #[test]
    fn classify_prefers_declared_type() {
        let mut log = log();
        log.start_date_time_index =
            Some(DateTime::parse_from_rfc3339("2016-01-01T00:00:00Z").unwrap());
        assert_eq!(log.classify(), IndexKind::Depth);

        log.index_type = None;
        assert_eq!(log.classify(), IndexKind::DateTime);

        log.start_date_time_index = None;
        assert_eq!(log.classify(), IndexKind::Depth);
    }

    #[test]
    fn time_log_detection() {
        let mut log = log();
        assert!(!log.is_time_log(true));
        log.index_type = Some(IndexKind::ElapsedTime);
        assert!(log.is_time_log(true));
        assert!(!log.is_time_log(false));
    }

    #[test]
    fn mnemonics_in_order() {
        assert_eq!(log().mnemonics(), vec!["MD".to_string(), "ROP".to_string()]);
        assert!(GrowingObject::default().mnemonics().is_empty());
    }

    #[test]
    fn index_column_lookup() {
        assert_eq!(log().index_column().unwrap().uid.as_deref(), Some("c0"));
        let mut log = log();
        log.index_curve = Some("DEPTH".into());
        assert!(log.index_column().is_none());
    }

    #[test]
    fn assigns_only_missing_uids() {
        let mut log = log();
        log.columns.as_mut().unwrap().push(Column {
            uid: None,
            ..Column::new("", "GR", Some("gAPI"))
        });
        log.columns.as_mut().unwrap()[1].uid = Some("  ".into());

        assert_eq!(log.assign_missing_column_uids(), 2);
        let columns = log.columns.unwrap();
        assert_eq!(columns[0].uid.as_deref(), Some("c0"));
        assert!(columns.iter().all(|c| !c.uid.as_deref().unwrap().trim().is_empty()));
        assert_ne!(columns[1].uid, columns[2].uid);
    }

    #[test]
    fn uri_requires_parent_uids() {
        assert_eq!(
            log().uri().unwrap().to_string(),
            "eml://well(w1)/wellbore(b1)/log(l1)"
        );
        let mut orphan = log();
        orphan.uid_wellbore = None;
        assert!(orphan.uri().is_none());
    }

    #[test]
    fn channel_set_uri() {
        let uri = log().uri_as(ObjectType::ChannelSet).unwrap();
        assert_eq!(uri.object_type(), ObjectType::ChannelSet);
    }

    #[test]
    fn json_roundtrip() {
        let mut log = log();
        log.data = Some(vec![DataBlock::new("MD,ROP", "m,m/h", &["100.0,12.3"])]);
        let json = serde_json::to_string(&log).unwrap();
        assert!(json.contains("\"indexCurve\":\"MD\""));
        let parsed: GrowingObject = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, log);
    }

    #[test]
    fn parent_uris() {
        assert_eq!(Well::new("w1").uri().unwrap(), ObjectUri::well("w1"));
        assert_eq!(
            Wellbore::new("w1", "b1").uri().unwrap(),
            ObjectUri::wellbore("w1", "b1")
        );
    }
}
