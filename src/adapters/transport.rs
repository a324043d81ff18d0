use std::fmt;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::models::DatasetId;
use crate::domain::reply::RawResponse;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file_name: String,
    pub content: Vec<u8>,
    pub base_station_id: Option<String>,
}

impl UploadForm {
    pub fn from_path(path: &Path, base_station_id: Option<String>) -> std::io::Result<Self> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("{} does not name a file", path.display()),
                )
            })?;

        Ok(Self {
            file_name,
            content: std::fs::read(path)?,
            base_station_id: base_station_id
                .map(|id| id.trim().to_string())
                .filter(|id| !id.is_empty()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

/// Backend endpoints, also used as keys in replay scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Results,
    Result,
    Upload,
    Process,
    BaseStations,
    DeleteDataset,
}

impl Endpoint {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Results => "results",
            Self::Result => "result",
            Self::Upload => "upload",
            Self::Process => "process",
            Self::BaseStations => "base_stations",
            Self::DeleteDataset => "delete_dataset",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    ListResults,
    GetResult(DatasetId),
    Upload(UploadForm),
    Process(DatasetId),
    ListBaseStations,
    DeleteDataset(DatasetId),
}

impl ApiRequest {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::ListResults => Endpoint::Results,
            Self::GetResult(_) => Endpoint::Result,
            Self::Upload(_) => Endpoint::Upload,
            Self::Process(_) => Endpoint::Process,
            Self::ListBaseStations => Endpoint::BaseStations,
            Self::DeleteDataset(_) => Endpoint::DeleteDataset,
        }
    }

    pub fn method(&self) -> HttpMethod {
        match self {
            Self::ListResults | Self::GetResult(_) | Self::ListBaseStations => HttpMethod::Get,
            Self::Upload(_) | Self::Process(_) => HttpMethod::Post,
            Self::DeleteDataset(_) => HttpMethod::Delete,
        }
    }

    /// Route segments, unencoded. Dataset ids are always a single segment.
    pub fn path_segments(&self) -> Vec<&str> {
        match self {
            Self::ListResults => vec!["api", "results"],
            Self::GetResult(id) => vec!["api", "results", id.as_str()],
            Self::Upload(_) => vec!["api", "upload"],
            Self::Process(id) => vec!["api", "process", id.as_str()],
            Self::ListBaseStations => vec!["api", "base-stations"],
            Self::DeleteDataset(id) => vec!["api", "datasets", id.as_str()],
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.path_segments().join("/"))
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transport i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse replay script: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid backend url: {0}")]
    InvalidBaseUrl(String),
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        (**self).send(request).await
    }
}
