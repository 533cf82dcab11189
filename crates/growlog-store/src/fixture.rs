use std::path::Path;

use growlog_types::{GrowingObject, Well, Wellbore};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// A serializable snapshot of stored objects.
///
/// Fixtures seed an in-memory [`StoreContext`](crate::StoreContext) for tests
/// and for the command-line validator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreFixture {
    #[serde(default)]
    pub wells: Vec<Well>,
    #[serde(default)]
    pub wellbores: Vec<Wellbore>,
    #[serde(default)]
    pub logs: Vec<GrowingObject>,
    #[serde(default)]
    pub channel_sets: Vec<GrowingObject>,
}

impl StoreFixture {
    pub fn from_json(text: &str) -> StoreResult<Self> {
        serde_json::from_str(text).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Read a fixture from a JSON file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write a fixture to a JSON file.
    pub fn save(&self, path: &Path) -> StoreResult<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let fixture = StoreFixture {
            wells: vec![Well::new("w1")],
            wellbores: vec![Wellbore::new("w1", "b1")],
            logs: vec![GrowingObject::depth_log("w1", "b1", "l1", "MD")],
            channel_sets: Vec::new(),
        };
        fixture.save(&path).unwrap();

        let loaded = StoreFixture::load(&path).unwrap();
        assert_eq!(loaded, fixture);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let fixture = StoreFixture::from_json(r#"{"wells":[{"uid":"w1"}]}"#).unwrap();
        assert_eq!(fixture.wells.len(), 1);
        assert!(fixture.wellbores.is_empty());
        assert!(fixture.channel_sets.is_empty());
    }

    #[test]
    fn malformed_json_is_serialization_error() {
        assert!(matches!(
            StoreFixture::from_json("{"),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            StoreFixture::load(&dir.path().join("absent.json")),
            Err(StoreError::Io(_))
        ));
    }
}
