use std::fmt;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Opaque dataset identifier. The backend sends integers today, but nothing on this side
/// relies on that.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatasetId(String);

impl DatasetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Accepts a JSON number or a non-empty string.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(Self(number.to_string())),
            Value::String(text) if !text.trim().is_empty() => Some(Self(text.trim().to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DatasetId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value)
            .ok_or_else(|| serde::de::Error::custom("dataset id must be a number or a non-empty string"))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AxisStats {
    pub rmse: f64,
    pub std: f64,
    pub mean: f64,
    pub max: f64,
    pub min: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReferencePosition {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AccuracyResults {
    pub horizontal: AxisStats,
    pub vertical: AxisStats,
    pub reference_position: ReferencePosition,
    pub reference_mode: String,
    pub num_points: u64,
    #[serde(default)]
    pub processing_duration: Option<f64>,
    #[serde(default)]
    pub analysis_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Dataset {
    pub id: DatasetId,
    pub name: String,
    pub upload_date: String,
    pub format_type: String,
    pub results: AccuracyResults,
    #[serde(default)]
    pub processing_status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseStation {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadReceipt {
    pub dataset_id: DatasetId,
    pub filename: Option<String>,
    pub message: Option<String>,
}
