//! Transport errors and the structured error body servers return.

use std::fmt;
use std::path::PathBuf;

use conjure_serde::{DecodeError, EncodeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("no uris configured for service")]
    NoUris,
    #[error("failed to load trust store {path}")]
    TrustStore {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("invalid service configuration: {0}")]
    Config(#[from] toml::de::Error),
    #[error("failed to read service configuration {path}")]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The request could not be assembled (unknown path parameter,
    /// multi-valued path or header value).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("giving up after {attempts} attempts, last status {status}. TraceId: '{trace_id}'")]
    RetriesExhausted {
        attempts: u32,
        status: u16,
        trace_id: String,
    },
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Body of a Conjure error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializableError {
    pub error_code: String,
    pub error_name: String,
    pub error_instance_id: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    Structured(SerializableError),
    /// Anything that did not parse as a [`SerializableError`].
    Text(String),
}

/// A non-2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteError {
    status: u16,
    trace_id: Option<String>,
    detail: ErrorDetail,
}

impl RemoteError {
    pub fn new(status: u16, trace_id: Option<String>, detail: ErrorDetail) -> Self {
        Self {
            status,
            trace_id,
            detail,
        }
    }

    /// Classifies a response body: structured when it parses as a
    /// [`SerializableError`], raw text otherwise.
    pub fn from_body(status: u16, trace_id: Option<String>, body: String) -> Self {
        let detail = match serde_json::from_str::<SerializableError>(&body) {
            Ok(error) => ErrorDetail::Structured(error),
            Err(_) => ErrorDetail::Text(body),
        };
        Self::new(status, trace_id, detail)
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    /// Trace id echoed by the server, if any.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn detail(&self) -> &ErrorDetail {
        &self.detail
    }

    pub fn error(&self) -> Option<&SerializableError> {
        match &self.detail {
            ErrorDetail::Structured(error) => Some(error),
            ErrorDetail::Text(_) => None,
        }
    }

    pub fn error_name(&self) -> Option<&str> {
        self.error().map(|error| error.error_name.as_str())
    }

    pub fn error_instance_id(&self) -> Option<&str> {
        self.error().map(|error| error.error_instance_id.as_str())
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trace_id = self.trace_id.as_deref().unwrap_or("None");
        match &self.detail {
            ErrorDetail::Structured(error) => write!(
                f,
                "{} {}. Error Code: {}. Error Name: {}. Error Instance ID: {}. TraceId: '{}'. Parameters: {}",
                self.status,
                reason(self.status),
                error.error_code,
                error.error_name,
                error.error_instance_id,
                trace_id,
                Value::Object(error.parameters.clone()),
            ),
            ErrorDetail::Text(text) => write!(
                f,
                "{} {}. TraceId: '{}'. Response: '{}'",
                self.status,
                reason(self.status),
                trace_id,
                text
            ),
        }
    }
}

impl std::error::Error for RemoteError {}

fn reason(status: u16) -> &'static str {
    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_is_parsed() {
        let error = RemoteError::from_body(
            404,
            Some("abc".into()),
            r#"{"errorCode":"NOT_FOUND","errorName":"Default:NotFound","errorInstanceId":"00000000-0000-0000-0000-000000000000","parameters":{}}"#.into(),
        );
        assert_eq!(error.error_name(), Some("Default:NotFound"));
        let message = error.to_string();
        assert!(message.starts_with("404 Not Found. Error Code: NOT_FOUND."));
        assert!(message.contains("00000000-0000-0000-0000-000000000000"));
        assert!(message.contains("TraceId: 'abc'"));
    }

    #[test]
    fn other_bodies_fall_back_to_text() {
        let error = RemoteError::from_body(500, None, String::new());
        assert_eq!(error.detail(), &ErrorDetail::Text(String::new()));
        assert_eq!(
            error.to_string(),
            "500 Internal Server Error. TraceId: 'None'. Response: ''"
        );

        let json_but_not_error = RemoteError::from_body(400, None, r#"{"message":"bad"}"#.into());
        assert!(json_but_not_error.error().is_none());
    }

    #[test]
    fn parameters_default_to_empty() {
        let error: SerializableError = serde_json::from_str(
            r#"{"errorCode":"INVALID_ARGUMENT","errorName":"Catalog:BadPath","errorInstanceId":"id"}"#,
        )
        .expect("error");
        assert!(error.parameters.is_empty());
    }
}
