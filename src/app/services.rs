use serde_json::Value;

use crate::adapters::transport::{ApiRequest, Transport, UploadForm};
use crate::domain::errors::ClientError;
use crate::domain::models::{BaseStation, Dataset, DatasetId, UploadReceipt};
use crate::domain::reply::{
    RawResponse, accept_reply, dataset_detail, dataset_listing, failure_message, parse_body,
    station_listing, upload_receipt,
};

/// Typed operations against the analysis backend.
pub struct ApiClient<T> {
    transport: T,
}

impl<T> ApiClient<T>
where
    T: Transport,
{
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn exchange(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let method = request.method().as_str();
        let path = request.path();
        tracing::debug!(method, path = %path, "sending backend request");

        self.transport.send(request).await.map_err(|error| {
            tracing::warn!(method, path = %path, error = %error, "backend request failed");
            ClientError::network(error)
        })
    }

    pub async fn list_results(&self) -> Result<Vec<Dataset>, ClientError> {
        let response = self.exchange(ApiRequest::ListResults).await?;
        let payload = accept_reply(&response, ClientError::FetchFailed, "Failed to fetch datasets")?;
        dataset_listing(&payload)
    }

    pub async fn get_result(&self, id: &DatasetId) -> Result<Dataset, ClientError> {
        let response = self.exchange(ApiRequest::GetResult(id.clone())).await?;
        let payload = accept_reply(
            &response,
            ClientError::FetchFailed,
            "Failed to fetch dataset details",
        )?;
        dataset_detail(&payload)
    }

    pub async fn upload(&self, form: UploadForm) -> Result<UploadReceipt, ClientError> {
        let response = self.exchange(ApiRequest::Upload(form)).await?;
        let payload = accept_reply(&response, ClientError::UploadFailed, "Upload failed")?;
        upload_receipt(&payload)
    }

    pub async fn process(&self, id: &DatasetId) -> Result<Value, ClientError> {
        let response = self.exchange(ApiRequest::Process(id.clone())).await?;
        accept_reply(&response, ClientError::ProcessingFailed, "Processing failed")
    }

    pub async fn list_base_stations(&self) -> Result<Vec<BaseStation>, ClientError> {
        let response = self.exchange(ApiRequest::ListBaseStations).await?;
        let payload = accept_reply(
            &response,
            ClientError::FetchFailed,
            "Failed to fetch base stations",
        )?;
        station_listing(&payload)
    }

    /// Only the status matters here; a body, when present, may carry the reason.
    pub async fn delete_dataset(&self, id: &DatasetId) -> Result<(), ClientError> {
        let response = self.exchange(ApiRequest::DeleteDataset(id.clone())).await?;
        if response.is_success() {
            return Ok(());
        }

        let message = parse_body(&response)
            .ok()
            .as_ref()
            .and_then(failure_message)
            .unwrap_or_else(|| "Failed to delete dataset".to_string());
        Err(ClientError::DeleteFailed(message))
    }
}
