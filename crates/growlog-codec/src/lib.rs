//! Row-data codec for GrowLog.
//!
//! Converts between the flat wire forms of growing-object data and ordered
//! in-memory tables. The codec only splits and joins; deciding whether the
//! result is acceptable is left to the validation gate, so the same code
//! serves fetch-time serialization as well.
//!
//! Two wire forms are supported:
//! - delimited: a mnemonic list, a unit list and delimiter-joined rows
//! - channel set: nested JSON arrays `[[indexes...], [values...]]` per row

pub mod channel;
pub mod delimited;
pub mod error;
pub mod ordering;

pub use channel::{ChannelRow, ChannelSetData, ChannelValue};
pub use delimited::{
    decode_data_block, encode_data_block, estimate_points, first_row_width, Delimiter, Table,
    DEFAULT_DELIMITER,
};
pub use error::{CodecError, CodecResult};
pub use ordering::rows_follow_direction;
