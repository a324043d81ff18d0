use serde_json::{Map, Value};

use crate::domain::errors::ClientError;
use crate::domain::models::{BaseStation, Dataset, DatasetId, UploadReceipt};

// Failure signalling is matched on the exact keys only
const SUCCESS_KEY: &str = "success";
const ERROR_KEY: &str = "error";
const MESSAGE_KEYS: &[&str] = &["message", "detail"];
const DATASET_ID_KEYS: &[&str] = &["dataset_id", "datasetId"];
const FILENAME_KEYS: &[&str] = &["filename", "file_name"];
const LATITUDE_KEYS: &[&str] = &["latitude", "lat"];
const LONGITUDE_KEYS: &[&str] = &["longitude", "lon", "lng"];

/// Status line and untouched body text of one backend response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub fn parse_body(response: &RawResponse) -> Result<Value, ClientError> {
    serde_json::from_str(response.body.trim()).map_err(|error| {
        tracing::debug!(
            status = response.status,
            error = %error,
            "response body is not valid JSON"
        );
        ClientError::MalformedResponse
    })
}

/// Parses the body and applies both success conventions the backend has used: an
/// explicit falsy `success` flag, or the mere presence of an `error` field.
pub fn accept_reply(
    response: &RawResponse,
    reject: fn(String) -> ClientError,
    fallback_message: &str,
) -> Result<Value, ClientError> {
    let payload = parse_body(response)?;

    if response.is_success() && !signals_failure(&payload) {
        return Ok(payload);
    }

    let message = failure_message(&payload).unwrap_or_else(|| fallback_message.to_string());
    Err(reject(message))
}

pub fn signals_failure(payload: &Value) -> bool {
    let Some(object) = payload.as_object() else {
        return false;
    };

    let success_flag_falsy = object.get(SUCCESS_KEY).is_some_and(|flag| !is_truthy(flag));
    let error_present = object.get(ERROR_KEY).is_some_and(|error| !error.is_null());

    success_flag_falsy || error_present
}

pub fn failure_message(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;

    object
        .get(ERROR_KEY)
        .and_then(message_text)
        .or_else(|| find_value(object, MESSAGE_KEYS).and_then(message_text))
}

pub fn upload_receipt(payload: &Value) -> Result<UploadReceipt, ClientError> {
    let object = payload
        .as_object()
        .ok_or_else(|| ClientError::invalid_format("upload response must be a JSON object"))?;

    let dataset_id = find_value(object, DATASET_ID_KEYS)
        .and_then(DatasetId::from_json)
        .ok_or_else(|| ClientError::invalid_format("upload response is missing dataset_id"))?;

    Ok(UploadReceipt {
        dataset_id,
        filename: find_value(object, FILENAME_KEYS).and_then(message_text),
        message: find_value(object, MESSAGE_KEYS).and_then(message_text),
    })
}

/// Decodes a listing, skipping records that do not have the dataset shape.
pub fn dataset_listing(payload: &Value) -> Result<Vec<Dataset>, ClientError> {
    let records = payload
        .as_array()
        .ok_or_else(|| ClientError::invalid_format("expected a list of datasets"))?;

    Ok(records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match serde_json::from_value::<Dataset>(record.clone()) {
                Ok(dataset) => Some(dataset),
                Err(error) => {
                    tracing::warn!(index, error = %error, "skipping malformed dataset record");
                    None
                }
            }
        })
        .collect())
}

/// Decodes a single dataset. Besides the flat record this accepts the
/// `{ "dataset": {...}, "results": [...] }` envelope, taking the latest analysis.
pub fn dataset_detail(payload: &Value) -> Result<Dataset, ClientError> {
    let mut record = match payload.get("dataset") {
        Some(Value::Object(metadata)) => {
            let mut merged = metadata.clone();
            if let Some(results) = payload.get("results") {
                merged.insert("results".to_string(), results.clone());
            }
            merged
        }
        _ => payload
            .as_object()
            .cloned()
            .ok_or_else(|| ClientError::invalid_format("dataset response must be a JSON object"))?,
    };

    if let Some(Value::Array(analyses)) = record.get("results") {
        let latest = analyses
            .last()
            .cloned()
            .ok_or_else(|| ClientError::invalid_format("dataset has no analysis results"))?;
        record.insert("results".to_string(), latest);
    }

    serde_json::from_value(Value::Object(record)).map_err(ClientError::invalid_format)
}

/// Keeps entries with a truthy id and name and numeric coordinates; everything else is
/// dropped without failing the listing.
pub fn station_listing(payload: &Value) -> Result<Vec<BaseStation>, ClientError> {
    let entries = payload
        .as_array()
        .ok_or_else(|| ClientError::invalid_format("expected a list of base stations"))?;

    Ok(entries
        .iter()
        .filter_map(|entry| {
            let station = parse_station(entry);
            if station.is_none() {
                tracing::debug!(entry = %entry, "skipping malformed base station entry");
            }
            station
        })
        .collect())
}

fn parse_station(entry: &Value) -> Option<BaseStation> {
    let object = entry.as_object()?;

    let id = object.get("id").filter(|value| is_truthy(value))?;
    let name = object.get("name").filter(|value| is_truthy(value))?;

    Some(BaseStation {
        id: scalar_text(id)?,
        name: scalar_text(name)?,
        latitude: find_value(object, LATITUDE_KEYS).and_then(parse_f64)?,
        longitude: find_value(object, LONGITUDE_KEYS).and_then(parse_f64)?,
        altitude: object.get("altitude").and_then(parse_f64),
        description: object.get("description").and_then(message_text),
    })
}

/// JavaScript truthiness, which is what the page's `if (station.id && station.name)`
/// checks relied on.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn find_value<'a>(object: &'a Map<String, Value>, aliases: &[&str]) -> Option<&'a Value> {
    for alias in aliases {
        if let Some(value) = object.get(*alias) {
            return Some(value);
        }
    }

    let normalized_aliases: Vec<String> =
        aliases.iter().map(|alias| normalize_key(alias)).collect();

    object.iter().find_map(|(key, value)| {
        let normalized_key = normalize_key(key);
        if normalized_aliases
            .iter()
            .any(|alias| alias == &normalized_key)
        {
            Some(value)
        } else {
            None
        }
    })
}

fn normalize_key(value: &str) -> String {
    value
        .chars()
        .filter(|char| char.is_ascii_alphanumeric())
        .flat_map(|char| char.to_lowercase())
        .collect()
}

fn parse_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    number.filter(|number| number.is_finite())
}
