use chrono::{DateTime, FixedOffset};
use growlog_types::Measure;
use serde::{Deserialize, Serialize};

use crate::checks::index::RequestedRanges;

/// How much of each matching object a fetch returns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReturnElements {
    All,
    IdOnly,
    HeaderOnly,
    DataOnly,
    /// Only the elements named in the query template.
    #[default]
    Requested,
}

/// A column element of a fetch template. The mnemonic may be left out.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic: Option<String>,
}

/// A row-data element of a fetch template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSelector {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mnemonic_list: Option<String>,
}

/// A fetch request: a partial object template describing what to return.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchQuery {
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
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnSelector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<DataSelector>,
    #[serde(default)]
    pub return_elements: ReturnElements,
}

impl FetchQuery {
    /// The range filters this query applies.
    pub fn ranges(&self) -> RequestedRanges {
        RequestedRanges {
            numeric: self.start_index.is_some() || self.end_index.is_some(),
            date_time: self.start_date_time_index.is_some() || self.end_date_time_index.is_some(),
        }
    }

    /// Mnemonics named by the column selectors that carry one.
    pub fn selected_mnemonics(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| c.mnemonic.as_deref())
            .collect()
    }
}
