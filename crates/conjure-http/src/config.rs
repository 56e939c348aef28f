//! Service configuration.
//!
//! Timeouts and the backoff slot are milliseconds. Every field is optional
//! in TOML; omitted ones take the [`Default`] values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HttpError;

/// TLS settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslConfiguration {
    /// PEM file with additional trusted root certificates.
    pub trust_store_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfiguration {
    /// Sent as a bearer token when present.
    pub api_token: Option<String>,
    pub security: Option<SslConfiguration>,
    pub connect_timeout: Option<u64>,
    pub read_timeout: Option<u64>,
    pub write_timeout: Option<u64>,
    /// Base URIs; one is picked at random per call.
    pub uris: Vec<String>,
    pub max_num_retries: u32,
    pub backoff_slot_size: u64,
}

impl Default for ServiceConfiguration {
    fn default() -> Self {
        Self {
            api_token: None,
            security: None,
            connect_timeout: None,
            read_timeout: None,
            write_timeout: None,
            uris: Vec::new(),
            max_num_retries: 3,
            backoff_slot_size: 500,
        }
    }
}

impl ServiceConfiguration {
    pub fn new<I, S>(uris: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            uris: uris.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, HttpError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HttpError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HttpError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn connect_timeout(&self) -> Option<Duration> {
        self.connect_timeout.map(Duration::from_millis)
    }

    /// Whole-request timeout: read and write timeouts added together, or
    /// `None` when neither is set.
    pub fn request_timeout(&self) -> Option<Duration> {
        match (self.read_timeout, self.write_timeout) {
            (None, None) => None,
            (read, write) => Some(Duration::from_millis(
                read.unwrap_or(0).saturating_add(write.unwrap_or(0)),
            )),
        }
    }

    pub fn backoff_slot(&self) -> Duration {
        Duration::from_millis(self.backoff_slot_size)
    }
}
