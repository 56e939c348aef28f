//! Blocking HTTP transport for generated Conjure services.
//!
//! A generated service wraps an [`HttpClient`]. Each endpoint method builds
//! a [`ConjureRequest`] (plain-encoded path, query and header parameters plus
//! a JSON body), executes it, and decodes the [`HttpResponse`] against the
//! endpoint's return type.
//!
//! ```ignore
//! let config = ServiceConfiguration::from_toml_file("service.toml")?;
//! let service: SimpleService = RequestsClient::create("my-agent/1.0", &config)?;
//! let answer = service.test_endpoint("foo", &[])?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod retry;

pub use client::{
    ConjureRequest, HttpClient, HttpResponse, RequestsClient, Service, TRACE_ID_HEADER,
};
pub use config::{ServiceConfiguration, SslConfiguration};
pub use error::{ErrorDetail, HttpError, RemoteError, SerializableError};
pub use reqwest::Method;
pub use retry::{RetryPolicy, RETRYABLE_STATUSES};
