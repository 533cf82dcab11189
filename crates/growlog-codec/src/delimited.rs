use std::fmt;

use growlog_types::DataBlock;

use crate::error::{CodecError, CodecResult};

/// Delimiter used when an object does not declare one.
pub const DEFAULT_DELIMITER: &str = ",";

/// A validated value delimiter.
///
/// A delimiter may be longer than one character but must be non-empty and
/// must not contain whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Delimiter(String);

impl Delimiter {
    /// Validate a declared delimiter.
    pub fn parse(s: &str) -> CodecResult<Self> {
        if s.is_empty() {
            return Err(CodecError::EmptyDelimiter);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(CodecError::InvalidDelimiter(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    /// The declared delimiter if any, otherwise the default.
    pub fn from_declared(declared: Option<&str>) -> CodecResult<Self> {
        match declared {
            Some(s) => Self::parse(s),
            None => Ok(Self::default()),
        }
    }

    /// Like [`Self::from_declared`], but an invalid declaration falls back to
    /// the default.
    pub fn or_default(declared: Option<&str>) -> Self {
        Self::from_declared(declared).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split one encoded string into its fields.
    ///
    /// Fields are returned as-is (no trimming). Empty input is one empty
    /// field, so `split` inverts [`Self::join`] for any non-empty field list.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        text.split(self.0.as_str()).collect()
    }

    /// Join fields into one encoded string.
    pub fn join<S: AsRef<str>>(&self, fields: &[S]) -> String {
        let mut out = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push_str(&self.0);
            }
            out.push_str(field.as_ref());
        }
        out
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self(DEFAULT_DELIMITER.to_string())
    }
}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered, column-aligned table decoded from a [`DataBlock`].
///
/// Nothing here guarantees that `units` or any row has as many entries as
/// `mnemonics`; cardinality is for the caller to check.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub mnemonics: Vec<String>,
    pub units: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of the first row, or zero for an empty table.
    pub fn first_row_width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Estimated number of values: row count times first-row width.
    pub fn point_count(&self) -> usize {
        self.row_count() * self.first_row_width()
    }

    /// Values of the named column, in row order.
    pub fn column(&self, mnemonic: &str) -> Option<Vec<&str>> {
        let position = self.mnemonics.iter().position(|m| m == mnemonic)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(position).map_or("", String::as_str))
                .collect(),
        )
    }
}

fn join_owned(delimiter: &Delimiter, fields: &[String]) -> Option<String> {
    (!fields.is_empty()).then(|| delimiter.join(fields))
}

fn split_owned(delimiter: &Delimiter, text: Option<&str>) -> Vec<String> {
    text.map(|t| delimiter.split(t).into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

/// Decode a wire data block into a table.
pub fn decode_data_block(block: &DataBlock, delimiter: &Delimiter) -> Table {
    let table = Table {
        mnemonics: split_owned(delimiter, block.mnemonic_list.as_deref()),
        units: split_owned(delimiter, block.unit_list.as_deref()),
        rows: block
            .data
            .iter()
            .map(|row| split_owned(delimiter, Some(row)))
            .collect(),
    };
    tracing::trace!(
        columns = table.mnemonics.len(),
        rows = table.rows.len(),
        "decoded data block"
    );
    table
}

/// Encode a table into a wire data block.
///
/// Empty mnemonic or unit lists are left out of the block.
pub fn encode_data_block(table: &Table, delimiter: &Delimiter) -> DataBlock {
    DataBlock {
        mnemonic_list: join_owned(delimiter, &table.mnemonics),
        unit_list: join_owned(delimiter, &table.units),
        data: table.rows.iter().map(|row| delimiter.join(row.as_slice())).collect(),
    }
}

/// Number of values in the first row of a block, without decoding the rest.
pub fn first_row_width(block: &DataBlock, delimiter: &Delimiter) -> usize {
    block
        .data
        .first()
        .map_or(0, |row| delimiter.split(row).len())
}

/// Estimated number of values in a block: row count times first-row width.
pub fn estimate_points(block: &DataBlock, delimiter: &Delimiter) -> usize {
    block.data.len() * first_row_width(block, delimiter)
}
