use thiserror::Error;

/// Failures a workflow can run into while talking to the analysis backend.
///
/// The server-signalled variants display the bare server message so it can be shown
/// to the user verbatim.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    #[error("network request failed: {0}")]
    NetworkFailure(String),
    #[error("Server returned invalid JSON/response")]
    MalformedResponse,
    #[error("{0}")]
    UploadFailed(String),
    #[error("{0}")]
    ProcessingFailed(String),
    #[error("{0}")]
    FetchFailed(String),
    #[error("{0}")]
    DeleteFailed(String),
    #[error("invalid response format: {0}")]
    InvalidFormat(String),
}

impl ClientError {
    pub fn network<E: std::fmt::Display>(error: E) -> Self {
        Self::NetworkFailure(error.to_string())
    }

    pub fn invalid_format<E: std::fmt::Display>(error: E) -> Self {
        Self::InvalidFormat(error.to_string())
    }
}
