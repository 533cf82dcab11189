use std::collections::HashSet;

use growlog_types::Column;

use crate::code::{ErrorCode, ValidationFailure};

/// Characters that may never appear in a mnemonic.
pub const ILLEGAL_MNEMONIC_CHARS: &[char] = &['\'', '"', '<', '>', '/', '\\', '&', ','];

/// Returns `true` if the mnemonic contains none of [`ILLEGAL_MNEMONIC_CHARS`].
pub fn is_legal_mnemonic(mnemonic: &str) -> bool {
    !mnemonic.contains(ILLEGAL_MNEMONIC_CHARS)
}

/// Returns `true` if any value occurs more than once (case-sensitive).
pub fn has_duplicates<'a>(values: impl IntoIterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    values.into_iter().any(|v| !seen.insert(v))
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Where a set of mnemonics was declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MnemonicScope {
    /// The object's column declarations.
    Columns,
    /// The mnemonic list of a row-data block.
    DataBlock,
}

/// Fail with `BadColumnIdentifier` if any mnemonic contains an illegal character.
pub fn validate_mnemonic_charset<'a>(
    mnemonics: impl IntoIterator<Item = &'a str>,
    scope: MnemonicScope,
) -> Option<ValidationFailure> {
    if mnemonics.into_iter().all(is_legal_mnemonic) {
        return None;
    }
    let fields: &[&str] = match scope {
        MnemonicScope::Columns => &["columns", "mnemonic"],
        MnemonicScope::DataBlock => &["data", "mnemonicList"],
    };
    Some(ValidationFailure::new(ErrorCode::BadColumnIdentifier, fields))
}

/// Fail if a mnemonic repeats: `DuplicateColumnIdentifiers` for column
/// declarations, `MnemonicsNotUnique` for a data block.
pub fn validate_uniqueness<'a>(
    mnemonics: impl IntoIterator<Item = &'a str>,
    scope: MnemonicScope,
) -> Option<ValidationFailure> {
    if !has_duplicates(mnemonics) {
        return None;
    }
    Some(match scope {
        MnemonicScope::Columns => {
            ValidationFailure::new(ErrorCode::DuplicateColumnIdentifiers, &["columns", "mnemonic"])
        }
        MnemonicScope::DataBlock => {
            ValidationFailure::new(ErrorCode::MnemonicsNotUnique, &["data", "mnemonicList"])
        }
    })
}

/// Fail with `MissingElementUid` if any element lacks a non-blank uid.
///
/// `element` names the list being checked (`columns` or `parameters`).
pub fn validate_uid_presence<'a>(
    uids: impl IntoIterator<Item = Option<&'a str>>,
    element: &str,
) -> Option<ValidationFailure> {
    if uids.into_iter().any(is_blank) {
        return Some(ValidationFailure::new(ErrorCode::MissingElementUid, &[element, "uid"]));
    }
    None
}

/// Fail with `ChildUidNotUnique` if two elements share a uid (case-sensitive).
pub fn validate_uid_uniqueness<'a>(
    uids: impl IntoIterator<Item = Option<&'a str>>,
    element: &str,
) -> Option<ValidationFailure> {
    if has_duplicates(uids.into_iter().flatten()) {
        return Some(ValidationFailure::new(ErrorCode::ChildUidNotUnique, &[element, "uid"]));
    }
    None
}

/// Mnemonics of the given columns, in order.
pub fn mnemonics_of(columns: &[Column]) -> impl Iterator<Item = &str> {
    columns.iter().map(|c| c.mnemonic.as_str())
}

/// Uids of the given columns, in order.
pub fn uids_of(columns: &[Column]) -> impl Iterator<Item = Option<&str>> {
    columns.iter().map(|c| c.uid.as_deref())
}
