use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::adapters::transport::{ApiRequest, HttpMethod, Transport, TransportError, UploadForm};
use crate::domain::reply::RawResponse;

/// Talks to the analysis backend over HTTP. Bodies are returned as text so callers
/// decide how to parse them.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpTransport {
    /// `timeout` of `None` waits for the backend indefinitely.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let base_url = reqwest::Url::parse(base_url.trim())
            .map_err(|error| TransportError::InvalidBaseUrl(format!("{base_url}: {error}")))?;

        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Appends the route to the base path, percent-encoding each segment.
    fn url(&self, request: &ApiRequest) -> Result<reqwest::Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(request.path_segments());
        Ok(url)
    }
}

fn multipart_form(form: UploadForm) -> Form {
    let file = Part::bytes(form.content).file_name(form.file_name);
    let multipart = Form::new().part("file", file);

    match form.base_station_id {
        Some(base_station_id) => multipart.text("base_station_id", base_station_id),
        None => multipart,
    }
}

fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let method = request.method();
        let url = self.url(&request)?;

        let builder = match request {
            ApiRequest::Upload(form) => self
                .client
                .post(url.clone())
                .multipart(multipart_form(form)),
            _ => self.client.request(reqwest_method(method), url.clone()),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(
            method = method.as_str(),
            url = %url,
            status,
            body_len = body.len(),
            "backend responded"
        );

        Ok(RawResponse { status, body })
    }
}
