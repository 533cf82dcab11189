use growlog_codec::{estimate_points, Delimiter};
use growlog_types::{Column, DataBlock};

use crate::checks::columns::{self, is_blank, MnemonicScope};
use crate::code::{ErrorCode, ValidationFailure};
use crate::config::GateConfig;

/// Everything row-data validation needs to know about one request.
#[derive(Clone, Copy, Debug)]
pub struct RowCheck<'a> {
    /// Mnemonic of the index curve, if the object declares one.
    pub index_curve: Option<&'a str>,
    /// Column metadata available for unit checks, if any.
    pub declared: Option<&'a [Column]>,
    /// The data blocks to check, in order.
    pub blocks: &'a [DataBlock],
    /// Mnemonics that row data may reference.
    pub governing: &'a [String],
    /// Delimiter the blocks are encoded with.
    pub delimiter: &'a Delimiter,
    /// Insert requests may not reference more mnemonics than they declare.
    pub insert: bool,
}

fn max_data_exceeded() -> ValidationFailure {
    ValidationFailure::new(ErrorCode::MaxDataExceeded, &["data"])
}

fn find_declared<'a>(declared: Option<&'a [Column]>, mnemonic: &str) -> Option<&'a Column> {
    declared?
        .iter()
        .find(|c| c.mnemonic.eq_ignore_ascii_case(mnemonic))
}

/// Every mnemonic has a unit entry, and a column declared with a unit does
/// not receive a blank one.
fn units_specified(declared: Option<&[Column]>, mnemonics: &[&str], units: &[&str]) -> bool {
    mnemonics.iter().enumerate().all(|(i, mnemonic)| {
        let Some(unit) = units.get(i) else {
            return false;
        };
        let has_unit = find_declared(declared, mnemonic).and_then(Column::declared_unit).is_some();
        !(has_unit && unit.trim().is_empty())
    })
}

/// Every declared column's unit matches the unit asserted for it, ignoring
/// case and surrounding whitespace. Mnemonics without a declared column are
/// not compared.
fn units_match(declared: &[Column], mnemonics: &[&str], units: &[&str]) -> bool {
    mnemonics.iter().zip(units).all(|(mnemonic, unit)| {
        let Some(column) = find_declared(Some(declared), mnemonic) else {
            return true;
        };
        let unit = unit.trim();
        match column.declared_unit() {
            None => unit.is_empty(),
            Some(expected) => unit.eq_ignore_ascii_case(expected),
        }
    })
}

fn all_governed(governing: &[String], mnemonics: &[&str]) -> bool {
    tracing::debug!("validating mnemonic list channels for existence in column declarations");
    let valid = mnemonics.iter().all(|m| governing.iter().any(|g| g == m));
    if valid {
        tracing::debug!("mnemonic list channels validated");
    } else {
        tracing::debug!("mnemonic from mnemonic list is not declared as a column");
    }
    valid
}

/// Validate the row data of an insert or update request.
///
/// Volume limits are checked for the whole request before any block is
/// inspected. Blocks are then checked in order and the first violation wins.
pub fn validate_rows(check: &RowCheck<'_>, config: &GateConfig) -> Option<ValidationFailure> {
    let total_rows: usize = check.blocks.iter().map(|b| b.data.len()).sum();
    let total_points: usize = check
        .blocks
        .iter()
        .map(|b| estimate_points(b, check.delimiter))
        .sum();
    if total_rows > config.max_data_nodes || total_points > config.max_data_points {
        tracing::warn!(total_rows, total_points, "row data exceeds configured limits");
        return Some(max_data_exceeded());
    }

    let index_curve = check.index_curve.filter(|c| !c.is_empty());
    let mut running_points = 0;

    for block in check.blocks {
        let mnemonic_list = block.mnemonic_list.as_deref();
        if is_blank(mnemonic_list) {
            return Some(ValidationFailure::new(
                ErrorCode::MissingColumnIdentifiers,
                &["data", "mnemonicList"],
            ));
        }
        let mnemonics = check.delimiter.split(mnemonic_list.unwrap_or_default());

        running_points += estimate_points(block, check.delimiter);
        if running_points > config.max_data_points {
            return Some(max_data_exceeded());
        }

        let listed = || mnemonics.iter().copied();
        let failure = columns::validate_uniqueness(listed(), MnemonicScope::DataBlock)
            .or_else(|| columns::validate_mnemonic_charset(listed(), MnemonicScope::DataBlock));
        if failure.is_some() {
            return failure;
        }

        if !all_governed(check.governing, &mnemonics) {
            return Some(ValidationFailure::new(
                ErrorCode::MissingColumnIdentifiers,
                &["data", "mnemonicList"],
            ));
        }

        if check.insert && check.declared.is_some_and(|d| mnemonics.len() > d.len()) {
            return Some(ValidationFailure::new(
                ErrorCode::BadColumnIdentifier,
                &["data", "mnemonicList"],
            ));
        }

        let unit_list = block.unit_list.as_deref();
        if is_blank(unit_list) {
            return Some(ValidationFailure::new(ErrorCode::MissingUnitList, &["data", "unitList"]));
        }
        let units = check.delimiter.split(unit_list.unwrap_or_default());

        if !units_specified(check.declared, &mnemonics, &units) {
            return Some(ValidationFailure::new(
                ErrorCode::MissingUnitForMeasureData,
                &["data", "unitList"],
            ));
        }

        if let Some(index_curve) = index_curve {
            if !mnemonics.contains(&index_curve) {
                return Some(ValidationFailure::new(ErrorCode::IndexCurveNotFound, &["indexCurve"]));
            }
            if !mnemonics[0].eq_ignore_ascii_case(index_curve) {
                return Some(ValidationFailure::new(
                    ErrorCode::IndexNotFirstInDataColumnList,
                    &["data", "mnemonicList"],
                ));
            }
        }

        if let Some(declared) = check.declared {
            if !units_match(declared, &mnemonics, &units) {
                return Some(ValidationFailure::new(
                    ErrorCode::UnitListNotMatch,
                    &["data", "unitList"],
                ));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared() -> Vec<Column> {
        vec![
            Column::new("c0", "MD", Some("m")),
            Column::new("c1", "ROP", Some("m/h")),
            Column::new("c2", "GR", Some("gAPI")),
        ]
    }

    fn governing() -> Vec<String> {
        vec!["MD".into(), "ROP".into(), "GR".into()]
    }

    fn run(blocks: &[DataBlock], declared: Option<&[Column]>, insert: bool) -> Option<ErrorCode> {
        run_with(blocks, declared, insert, &GateConfig::default())
    }

    fn run_with(
        blocks: &[DataBlock],
        declared: Option<&[Column]>,
        insert: bool,
        config: &GateConfig,
    ) -> Option<ErrorCode> {
        let governing = governing();
        let delimiter = Delimiter::default();
        let check = RowCheck {
            index_curve: Some("MD"),
            declared,
            blocks,
            governing: &governing,
            delimiter: &delimiter,
            insert,
        };
        validate_rows(&check, config).map(|f| f.code)
    }

    #[test]
    fn well_formed_block_passes() {
        let columns = declared();
        let block = DataBlock::new("MD,ROP", "m,m/h", &["100.0,12.3", "100.5,13.1"]);
        assert_eq!(run(&[block], Some(&columns[..]), true), None);
    }

    #[test]
    fn missing_mnemonic_list() {
        let block = DataBlock::new("  ", "m", &["1"]);
        assert_eq!(run(&[block], None, true), Some(ErrorCode::MissingColumnIdentifiers));
    }

    #[test]
    fn repeated_mnemonic_in_block() {
        let block = DataBlock::new("MD,ROP,ROP", "m,m/h,m/h", &["1,2,3"]);
        assert_eq!(run(&[block], None, false), Some(ErrorCode::MnemonicsNotUnique));
    }

    #[test]
    fn illegal_mnemonic_in_block() {
        let delimiter = Delimiter::parse("|").unwrap();
        let governing = vec!["MD".to_string(), "A&B".to_string()];
        let blocks = [DataBlock::new("MD|A&B", "m|m", &["1|2"])];
        let check = RowCheck {
            index_curve: Some("MD"),
            declared: None,
            blocks: &blocks,
            governing: &governing,
            delimiter: &delimiter,
            insert: false,
        };
        assert_eq!(
            validate_rows(&check, &GateConfig::default()).unwrap().code,
            ErrorCode::BadColumnIdentifier
        );
    }

    #[test]
    fn undeclared_mnemonic() {
        let block = DataBlock::new("MD,TEMP", "m,degC", &["1,2"]);
        assert_eq!(run(&[block], None, false), Some(ErrorCode::MissingColumnIdentifiers));
    }

    #[test]
    fn insert_may_not_exceed_declared_columns() {
        let all = declared();
        let columns = &all[..2];
        let block = DataBlock::new("MD,ROP,GR", "m,m/h,gAPI", &["1,2,3"]);
        assert_eq!(
            run(&[block.clone()], Some(columns), true),
            Some(ErrorCode::BadColumnIdentifier)
        );
        assert_eq!(run(&[block], Some(columns), false), None);
    }

    #[test]
    fn missing_unit_list() {
        let block = DataBlock {
            unit_list: None,
            ..DataBlock::new("MD,ROP", "", &["1,2"])
        };
        assert_eq!(run(&[block], None, false), Some(ErrorCode::MissingUnitList));
    }

    #[test]
    fn too_few_units() {
        let block = DataBlock::new("MD,ROP", "m", &["1,2"]);
        assert_eq!(run(&[block], None, false), Some(ErrorCode::MissingUnitForMeasureData));
    }

    #[test]
    fn blank_unit_for_declared_unit() {
        let columns = declared();
        let block = DataBlock::new("MD,ROP", "m, ", &["1,2"]);
        assert_eq!(
            run(&[block.clone()], Some(&columns[..]), false),
            Some(ErrorCode::MissingUnitForMeasureData)
        );
        // Without column metadata a blank unit is acceptable.
        assert_eq!(run(&[block], None, false), None);
    }

    #[test]
    fn index_not_present_takes_precedence() {
        let block = DataBlock::new("ROP,GR", "m/h,gAPI", &["1,2"]);
        assert_eq!(run(&[block], None, false), Some(ErrorCode::IndexCurveNotFound));
    }

    #[test]
    fn index_not_first() {
        let block = DataBlock::new("ROP,MD", "m/h,m", &["12.3,100.0"]);
        assert_eq!(run(&[block], None, false), Some(ErrorCode::IndexNotFirstInDataColumnList));
    }

    #[test]
    fn unit_mismatch_is_case_insensitive() {
        let columns = declared();
        let ok = DataBlock::new("MD,ROP", "M, M/H ", &["1,2"]);
        assert_eq!(run(&[ok], Some(&columns[..]), false), None);

        let bad = DataBlock::new("MD,ROP", "m,ft/h", &["1,2"]);
        assert_eq!(run(&[bad], Some(&columns[..]), false), Some(ErrorCode::UnitListNotMatch));
    }

    #[test]
    fn unitless_column_accepts_only_blank_unit() {
        let columns = vec![Column::new("c0", "MD", Some("m")), Column::new("c1", "ROP", None)];
        let blank = DataBlock::new("MD,ROP", "m,", &["1,2"]);
        assert_eq!(run(&[blank], Some(&columns[..]), false), None);

        let given = DataBlock::new("MD,ROP", "m,m/h", &["1,2"]);
        assert_eq!(run(&[given], Some(&columns[..]), false), Some(ErrorCode::UnitListNotMatch));
    }

    #[test]
    fn later_block_is_checked() {
        let good = DataBlock::new("MD,ROP", "m,m/h", &["1,2"]);
        let bad = DataBlock::new("ROP,MD", "m/h,m", &["2,1"]);
        assert_eq!(run(&[good, bad], None, false), Some(ErrorCode::IndexNotFirstInDataColumnList));
    }

    #[test]
    fn row_limit() {
        let config = GateConfig {
            max_data_nodes: 2,
            ..GateConfig::default()
        };
        let block = DataBlock::new("MD,ROP", "m,m/h", &["1,2", "3,4", "5,6"]);
        assert_eq!(run_with(&[block], None, false, &config), Some(ErrorCode::MaxDataExceeded));
    }

    #[test]
    fn point_limit_sums_blocks_before_block_checks() {
        let config = GateConfig {
            max_data_points: 5,
            ..GateConfig::default()
        };
        // The second block has no mnemonic list, but the volume check wins.
        let first = DataBlock::new("MD,ROP", "m,m/h", &["1,2", "3,4"]);
        let second = DataBlock {
            mnemonic_list: None,
            ..DataBlock::new("", "m,m/h", &["5,6"])
        };
        assert_eq!(
            run_with(&[first.clone(), second], None, false, &config),
            Some(ErrorCode::MaxDataExceeded)
        );
        assert_eq!(run_with(&[first], None, false, &config), None);
    }
}
