use growlog_types::Column;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CodecError, CodecResult};

const NO_METADATA: &[Value] = &[];

/// One channel slot of a channel-set row.
///
/// Channels without point metadata carry a bare value. Channels with point
/// metadata carry an array `[value, meta1, meta2, ...]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelValue(pub Value);

impl ChannelValue {
    pub fn null() -> Self {
        Self(Value::Null)
    }

    pub fn scalar(value: impl Into<Value>) -> Self {
        Self(value.into())
    }

    /// A value followed by its point-metadata values.
    pub fn with_metadata(value: impl Into<Value>, metadata: Vec<Value>) -> Self {
        let mut parts = Vec::with_capacity(metadata.len() + 1);
        parts.push(value.into());
        parts.extend(metadata);
        Self(Value::Array(parts))
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    /// Separate the primary value from its point metadata.
    ///
    /// Whether an array is a value-plus-metadata tuple depends on the channel
    /// declaration, so the caller passes how many metadata entries the
    /// channel declares.
    pub fn split_metadata(&self, declared_metadata: usize) -> (&Value, &[Value]) {
        match &self.0 {
            Value::Array(parts) if declared_metadata > 0 && !parts.is_empty() => {
                (&parts[0], &parts[1..])
            }
            other => (other, NO_METADATA),
        }
    }
}

/// One channel-set row: the index values followed by the channel values.
///
/// On the wire a row is the two-element array `[[indexes...], [values...]]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RowRepr", into = "RowRepr")]
pub struct ChannelRow {
    pub indexes: Vec<Value>,
    pub values: Vec<ChannelValue>,
}

type RowRepr = (Vec<Value>, Vec<ChannelValue>);

impl From<RowRepr> for ChannelRow {
    fn from((indexes, values): RowRepr) -> Self {
        Self { indexes, values }
    }
}

impl From<ChannelRow> for RowRepr {
    fn from(row: ChannelRow) -> Self {
        (row.indexes, row.values)
    }
}

/// Row data of a multi-index channel set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelSetData {
    pub rows: Vec<ChannelRow>,
}

impl ChannelSetData {
    pub fn new(rows: Vec<ChannelRow>) -> Self {
        Self { rows }
    }

    /// Encode to the nested-array JSON form.
    pub fn encode(&self) -> CodecResult<String> {
        self.check_shape()?;
        serde_json::to_string(self).map_err(|e| CodecError::Serialization(e.to_string()))
    }

    /// Decode from the nested-array JSON form and check its shape.
    pub fn decode(text: &str) -> CodecResult<Self> {
        let data: Self =
            serde_json::from_str(text).map_err(|e| CodecError::Deserialization(e.to_string()))?;
        data.check_shape()?;
        Ok(data)
    }

    /// Number of index values per row (zero when there are no rows).
    pub fn index_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.indexes.len())
    }

    /// Number of channel slots per row (zero when there are no rows).
    pub fn channel_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.values.len())
    }

    /// Every row must carry at least one index value, and all rows must have
    /// the same number of index values and channel slots.
    fn check_shape(&self) -> CodecResult<()> {
        let indexes = self.index_count();
        let channels = self.channel_count();
        for (row, data) in self.rows.iter().enumerate() {
            if data.indexes.is_empty() {
                return Err(CodecError::Shape {
                    row,
                    reason: "row has no index values".into(),
                });
            }
            if data.indexes.len() != indexes {
                return Err(CodecError::Shape {
                    row,
                    reason: format!("expected {indexes} index values, got {}", data.indexes.len()),
                });
            }
            if data.values.len() != channels {
                let got = data.values.len();
                return Err(CodecError::Shape {
                    row,
                    reason: format!("expected {channels} channel values, got {got}"),
                });
            }
        }
        Ok(())
    }

    /// Check every row against the channel declarations.
    ///
    /// Rows must carry one slot per declared channel. A non-null slot of a
    /// channel that declares point metadata must hold its value followed by
    /// exactly one entry per declared metadata item.
    pub fn check_point_metadata(&self, channels: &[Column]) -> CodecResult<()> {
        for (row, data) in self.rows.iter().enumerate() {
            if data.values.len() != channels.len() {
                let got = data.values.len();
                return Err(CodecError::Shape {
                    row,
                    reason: format!("expected {} declared channels, got {got}", channels.len()),
                });
            }
            for (value, channel) in data.values.iter().zip(channels) {
                if value.is_null() {
                    continue;
                }
                let expected = channel.point_metadata.len();
                let (_, metadata) = value.split_metadata(expected);
                if metadata.len() != expected {
                    return Err(CodecError::Shape {
                        row,
                        reason: format!(
                            "channel {} expected {expected} point metadata values, got {}",
                            channel.mnemonic,
                            metadata.len()
                        ),
                    });
                }
            }
        }
        tracing::trace!(rows = self.rows.len(), "channel point metadata checked");
        Ok(())
    }
}
