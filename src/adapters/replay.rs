use std::collections::HashMap;
use std::fs;
use std::io;
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::adapters::transport::{ApiRequest, Endpoint, Transport, TransportError};
use crate::domain::reply::RawResponse;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub loop_forever: bool,
    #[serde(default)]
    pub responses: HashMap<Endpoint, Vec<ReplayEvent>>,
}

impl ReplayScript {
    pub fn respond(mut self, endpoint: Endpoint, event: ReplayEvent) -> Self {
        self.responses.entry(endpoint).or_default().push(event);
        self
    }
}

/// One canned answer: a JSON `body`, a verbatim `raw` body, or a transport `error`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplayEvent {
    #[serde(default = "default_status")]
    pub status: u16,
    pub body: Option<Value>,
    pub raw: Option<String>,
    pub error: Option<String>,
}

fn default_status() -> u16 {
    200
}

impl ReplayEvent {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
            raw: None,
            error: None,
        }
    }

    pub fn text(status: u16, raw: impl Into<String>) -> Self {
        Self {
            status,
            body: None,
            raw: Some(raw.into()),
            error: None,
        }
    }

    pub fn failure(kind: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: None,
            raw: None,
            error: Some(kind.into()),
        }
    }
}

#[derive(Debug, Default)]
struct ReplayState {
    cursors: HashMap<Endpoint, usize>,
    requests: Vec<ApiRequest>,
}

/// Transport that answers from a script instead of the network and records every
/// request it receives.
#[derive(Debug)]
pub struct ReplayTransport {
    script: ReplayScript,
    state: Mutex<ReplayState>,
}

impl ReplayTransport {
    pub fn from_file(path: &str) -> Result<Self, TransportError> {
        let content = fs::read_to_string(path).map_err(TransportError::Io)?;
        let script: ReplayScript = serde_json::from_str(&content).map_err(TransportError::Json)?;

        if script.responses.values().all(Vec::is_empty) {
            return Err(TransportError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "replay script must contain at least one response",
            )));
        }

        Ok(Self::from_script(script))
    }

    pub fn from_script(script: ReplayScript) -> Self {
        Self {
            script,
            state: Mutex::new(ReplayState::default()),
        }
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state
            .lock()
            .map(|state| state.requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self, endpoint: Endpoint) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.endpoint() == endpoint)
            .count()
    }

    fn next_event(&self, request: ApiRequest) -> Result<ReplayEvent, TransportError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| TransportError::Io(io::Error::other("replay state lock poisoned")))?;

        let endpoint = request.endpoint();
        state.requests.push(request);

        let events = self
            .script
            .responses
            .get(&endpoint)
            .filter(|events| !events.is_empty())
            .ok_or_else(|| {
                TransportError::Io(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no scripted responses for {endpoint}"),
                ))
            })?;

        let cursor = state.cursors.entry(endpoint).or_insert(0);
        if *cursor >= events.len() {
            if self.script.loop_forever {
                *cursor = 0;
            } else {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("replay finished for {endpoint}"),
                )));
            }
        }

        let event = events[*cursor].clone();
        *cursor = cursor.saturating_add(1);

        Ok(event)
    }

    fn execute_event(event: ReplayEvent) -> Result<RawResponse, TransportError> {
        match (event.body, event.raw, event.error) {
            (Some(body), None, None) => Ok(RawResponse::new(event.status, body.to_string())),
            (None, Some(raw), None) => Ok(RawResponse::new(event.status, raw)),
            (None, None, Some(error)) => Err(map_script_error(&error)),
            _ => Err(TransportError::Io(io::Error::new(
                io::ErrorKind::InvalidData,
                "script event must contain exactly one of: body, raw or error",
            ))),
        }
    }
}

fn map_script_error(kind: &str) -> TransportError {
    let normalized = kind.trim().to_ascii_lowercase();
    let error_kind = match normalized.as_str() {
        "timeout" => io::ErrorKind::TimedOut,
        "network_unreachable" | "offline" => io::ErrorKind::NetworkUnreachable,
        "host_unreachable" => io::ErrorKind::HostUnreachable,
        "connection_refused" => io::ErrorKind::ConnectionRefused,
        "connection_reset" => io::ErrorKind::ConnectionReset,
        _ => {
            return TransportError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("unknown scripted error kind: {kind}"),
            ));
        }
    };

    TransportError::Io(io::Error::new(error_kind, kind.to_string()))
}

#[async_trait]
impl Transport for ReplayTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        Self::execute_event(self.next_event(request)?)
    }
}
