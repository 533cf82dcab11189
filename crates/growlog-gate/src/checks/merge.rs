use std::collections::HashSet;

use growlog_types::{Column, GrowingObject};

use crate::code::{ErrorCode, ValidationFailure};

/// Incoming columns of an update, split by whether they already exist.
#[derive(Debug, Default)]
pub struct ColumnPartition<'a> {
    /// Columns whose uid is not in the stored object.
    pub new: Vec<&'a Column>,
    /// Columns whose uid is in the stored object, other than the index curve.
    pub updated: Vec<&'a Column>,
}

impl ColumnPartition<'_> {
    /// Returns `true` when the update both adds and modifies columns.
    pub fn is_mixed(&self) -> bool {
        !self.new.is_empty() && !self.updated.is_empty()
    }
}

/// Classify incoming columns against the stored object.
///
/// Uids match case-insensitively. The stored index curve is never an update
/// target: resending it alongside new columns is not a mixed request.
pub fn partition_columns<'a>(
    stored: &GrowingObject,
    incoming: &'a [Column],
) -> ColumnPartition<'a> {
    let stored_uids: HashSet<String> = stored
        .columns
        .iter()
        .flatten()
        .filter_map(|c| c.uid.as_deref())
        .map(str::to_lowercase)
        .collect();
    let index_uid = stored
        .index_column()
        .and_then(|c| c.uid.as_deref())
        .map(str::to_lowercase);

    let mut partition = ColumnPartition::default();
    for column in incoming {
        let uid = column.uid.as_deref().unwrap_or_default().to_lowercase();
        if !stored_uids.contains(&uid) {
            partition.new.push(column);
        } else if index_uid.as_deref() != Some(uid.as_str()) {
            partition.updated.push(column);
        }
    }
    partition
}

/// The mnemonics governing row data of an update: stored mnemonics in order,
/// followed by incoming mnemonics not already present (case-sensitive).
pub fn merged_mnemonics(stored: &GrowingObject, incoming: Option<&[Column]>) -> Vec<String> {
    let mut merged = stored.mnemonics();
    for column in incoming.unwrap_or_default() {
        if !merged.contains(&column.mnemonic) {
            merged.push(column.mnemonic.clone());
        }
    }
    merged
}

fn same_column(a: &Column, b: &Column) -> bool {
    match (a.uid.as_deref(), b.uid.as_deref()) {
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
        _ => a.mnemonic.eq_ignore_ascii_case(&b.mnemonic),
    }
}

/// The column metadata an update's row data is checked against: stored
/// columns in order with incoming revisions applied, followed by incoming
/// columns the stored object does not have.
///
/// Columns match by uid, or by mnemonic when either side has no uid.
pub fn merged_columns(stored: &GrowingObject, incoming: Option<&[Column]>) -> Vec<Column> {
    let incoming = incoming.unwrap_or_default();
    let mut merged: Vec<Column> = stored
        .columns
        .iter()
        .flatten()
        .map(|current| {
            incoming
                .iter()
                .find(|c| same_column(current, c))
                .unwrap_or(current)
                .clone()
        })
        .collect();
    for column in incoming {
        if !merged.iter().any(|c| same_column(c, column)) {
            merged.push(column.clone());
        }
    }
    merged
}

/// Reconcile incoming column changes with the stored object.
///
/// Fails with `AddingUpdatingLogCurveAtTheSameTime` when the update mixes new
/// and existing columns, then with `IndexRangeSpecified` when a new column
/// pre-declares index coverage in the stored object's index family.
pub fn validate_column_changes(
    stored: &GrowingObject,
    incoming: &[Column],
) -> Option<ValidationFailure> {
    let partition = partition_columns(stored, incoming);
    if partition.is_mixed() {
        return Some(ValidationFailure::new(
            ErrorCode::AddingUpdatingLogCurveAtTheSameTime,
            &["columns", "uid"],
        ));
    }

    if stored.is_time_log(true) {
        if partition.new.iter().any(|c| c.has_date_time_range()) {
            return Some(ValidationFailure::new(
                ErrorCode::IndexRangeSpecified,
                &["columns", "minDateTimeIndex", "maxDateTimeIndex"],
            ));
        }
    } else if partition.new.iter().any(|c| c.has_numeric_range()) {
        return Some(ValidationFailure::new(
            ErrorCode::IndexRangeSpecified,
            &["columns", "minIndex", "maxIndex"],
        ));
    }
    None
}
