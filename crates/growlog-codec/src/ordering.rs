use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use growlog_types::{IndexDirection, IndexKind};

use crate::delimited::Table;

#[derive(PartialEq, PartialOrd)]
enum IndexValue {
    Number(f64),
    Time(DateTime<FixedOffset>),
}

fn parse_index(kind: IndexKind, raw: &str) -> Option<IndexValue> {
    let raw = raw.trim();
    match kind {
        IndexKind::Depth | IndexKind::ElapsedTime => raw.parse().ok().map(IndexValue::Number),
        IndexKind::DateTime => DateTime::parse_from_rfc3339(raw).ok().map(IndexValue::Time),
    }
}

/// Whether the first column of every row moves strictly in `direction`.
///
/// Index values that do not parse as `kind` make the table unordered.
/// Tables with fewer than two rows are trivially ordered.
pub fn rows_follow_direction(table: &Table, kind: IndexKind, direction: IndexDirection) -> bool {
    let expected = match direction {
        IndexDirection::Increasing => Ordering::Less,
        IndexDirection::Decreasing => Ordering::Greater,
    };
    let mut previous: Option<IndexValue> = None;
    for row in &table.rows {
        let Some(current) = row.first().and_then(|raw| parse_index(kind, raw)) else {
            return false;
        };
        if let Some(prev) = &previous {
            if prev.partial_cmp(&current) != Some(expected) {
                return false;
            }
        }
        previous = Some(current);
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(index: &[&str]) -> Table {
        Table {
            mnemonics: vec!["IDX".into(), "V".into()],
            units: vec!["".into(), "".into()],
            rows: index
                .iter()
                .map(|i| vec![i.to_string(), "1".to_string()])
                .collect(),
        }
    }

    #[test]
    fn increasing_depth() {
        let t = table(&["100", "100.5", "101"]);
        assert!(rows_follow_direction(&t, IndexKind::Depth, IndexDirection::Increasing));
        assert!(!rows_follow_direction(&t, IndexKind::Depth, IndexDirection::Decreasing));
    }

    #[test]
    fn decreasing_elapsed_time() {
        let t = table(&["30", "20", "10"]);
        assert!(rows_follow_direction(&t, IndexKind::ElapsedTime, IndexDirection::Decreasing));
    }

    #[test]
    fn repeated_index_is_not_ordered() {
        let t = table(&["100", "100"]);
        assert!(!rows_follow_direction(&t, IndexKind::Depth, IndexDirection::Increasing));
    }

    #[test]
    fn date_time_index() {
        let t = table(&["2016-01-01T00:00:00Z", "2016-01-01T00:00:01+00:00"]);
        assert!(rows_follow_direction(&t, IndexKind::DateTime, IndexDirection::Increasing));
    }

    #[test]
    fn unparseable_index_is_not_ordered() {
        let t = table(&["100", "abc"]);
        assert!(!rows_follow_direction(&t, IndexKind::Depth, IndexDirection::Increasing));
    }

    #[test]
    fn short_tables_are_ordered() {
        let depth = IndexKind::Depth;
        assert!(rows_follow_direction(&table(&[]), depth, IndexDirection::Increasing));
        assert!(rows_follow_direction(&table(&["5"]), depth, IndexDirection::Decreasing));
    }
}
