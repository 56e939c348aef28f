//! The blocking client generated services call into.

use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use conjure_serde::{ConjureDecoder, ConjureEncoder, DecodeError, PlainValue};
use conjure_types::{ConjureType, ConjureValue, FromConjureValue, TypeDescriptor};
use rand::Rng;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::ACCEPT;
use reqwest::redirect::Policy;
use reqwest::{Certificate, Method};
use serde_json::Value;

use crate::config::ServiceConfiguration;
use crate::error::{HttpError, RemoteError};
use crate::retry::RetryPolicy;

/// Header carrying the per-attempt trace id.
pub const TRACE_ID_HEADER: &str = "X-B3-TraceId";

const APPLICATION_JSON: &str = "application/json";

/// Implemented by generated service types.
pub trait Service: Sized {
    fn new(client: HttpClient) -> Self;
}

/// Entry point for building services from configuration.
pub struct RequestsClient;

impl RequestsClient {
    pub fn create<S: Service>(
        user_agent: &str,
        config: &ServiceConfiguration,
    ) -> Result<S, HttpError> {
        HttpClient::new(user_agent, config).map(S::new)
    }
}

/// Shared blocking HTTP client plus the per-service settings. Cheap to
/// clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    uris: Arc<[String]>,
    api_token: Option<String>,
    retry: RetryPolicy,
}

impl HttpClient {
    pub fn new(user_agent: &str, config: &ServiceConfiguration) -> Result<Self, HttpError> {
        if config.uris.is_empty() {
            return Err(HttpError::NoUris);
        }

        // 308 is retried against the same service rather than followed.
        let mut builder = Client::builder()
            .user_agent(user_agent)
            .redirect(Policy::none());
        if let Some(timeout) = config.connect_timeout() {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(security) = &config.security {
            builder = builder.add_root_certificate(load_trust_store(&security.trust_store_path)?);
        }

        Ok(Self {
            client: builder.build()?,
            uris: config.uris.iter().cloned().collect(),
            api_token: config.api_token.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn uris(&self) -> &[String] {
        &self.uris
    }

    /// One of the configured base URIs, chosen at random.
    pub fn uri(&self) -> &str {
        let index = rand::thread_rng().gen_range(0..self.uris.len());
        &self.uris[index]
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Sends `request` to a randomly chosen base URI.
    ///
    /// Responses with a retryable status are retried with jittered backoff
    /// and connection failures are retried the same way. Every attempt
    /// carries a fresh trace id.
    pub fn execute(&self, request: ConjureRequest) -> Result<HttpResponse, HttpError> {
        let url = format!("{}{}", self.uri().trim_end_matches('/'), request.expand_path()?);
        let mut retries = 0;
        loop {
            let trace_id = new_trace_id();
            let result = self.prepare(&request, &url, &trace_id).send();

            let response = match result {
                Ok(response) => response,
                Err(err) if err.is_connect() && retries < self.retry.max_num_retries() => {
                    retries += 1;
                    self.pause(&request, &url, retries, &err.to_string());
                    continue;
                }
                Err(err) => return Err(err.into()),
            };

            let status = response.status().as_u16();
            if RetryPolicy::is_retryable(status) {
                if retries < self.retry.max_num_retries() {
                    retries += 1;
                    self.pause(&request, &url, retries, &format!("status {status}"));
                    continue;
                }
                log::warn!(
                    "{} {url} still failing with status {status} after {} attempts",
                    request.method,
                    retries + 1
                );
                return Err(HttpError::RetriesExhausted {
                    attempts: retries + 1,
                    status,
                    trace_id,
                });
            }

            if !response.status().is_success() {
                let echoed = response
                    .headers()
                    .get(TRACE_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                let error = RemoteError::from_body(status, echoed, response.text()?);
                log::warn!("{} {url} failed: {error}", request.method);
                return Err(error.into());
            }

            return Ok(HttpResponse {
                status,
                trace_id,
                body: response.bytes()?.to_vec(),
            });
        }
    }

    fn prepare(&self, request: &ConjureRequest, url: &str, trace_id: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(TRACE_ID_HEADER, trace_id)
            .header(ACCEPT, APPLICATION_JSON);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder
    }

    fn pause(&self, request: &ConjureRequest, url: &str, retry: u32, cause: &str) {
        let wait = self.retry.backoff(retry, &mut rand::thread_rng());
        log::debug!(
            "retrying {} {url} after {cause} (retry {retry} of {}, waiting {wait:?})",
            request.method,
            self.retry.max_num_retries()
        );
        thread::sleep(wait);
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("uris", &self.uris)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

fn load_trust_store(path: &Path) -> Result<Certificate, HttpError> {
    let pem = fs::read(path).map_err(|source| HttpError::TrustStore {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    Certificate::from_pem(&pem).map_err(|source| HttpError::TrustStore {
        path: path.to_path_buf(),
        source: Box::new(source),
    })
}

fn new_trace_id() -> String {
    format!("{:016x}", rand::thread_rng().gen::<u64>())
}

/// One endpoint call: method, path template and plain-encoded parameters.
#[derive(Debug, Clone)]
pub struct ConjureRequest {
    method: Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<Value>,
}

impl ConjureRequest {
    /// `path` may contain `{name}` placeholders filled by
    /// [`path_param`](Self::path_param).
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    pub fn body_json(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn path_param(mut self, name: &str, value: &ConjureValue) -> Result<Self, HttpError> {
        let text = single_plain(name, value)?;
        self.path_params.push((name.to_string(), text));
        Ok(self)
    }

    /// Adds a query parameter. Lists and sets add one pair per element;
    /// `Null` adds nothing.
    pub fn query_param(mut self, name: &str, value: &ConjureValue) -> Result<Self, HttpError> {
        if value.is_null() {
            return Ok(self);
        }
        for text in ConjureEncoder::plain(value)?.into_vec() {
            self.query.push((name.to_string(), text));
        }
        Ok(self)
    }

    /// Adds a header. `Null` adds nothing.
    pub fn header(mut self, name: &str, value: &ConjureValue) -> Result<Self, HttpError> {
        if value.is_null() {
            return Ok(self);
        }
        let text = single_plain(name, value)?;
        self.headers.push((name.to_string(), text));
        Ok(self)
    }

    pub fn body(mut self, value: &ConjureValue) -> Self {
        self.body = Some(ConjureEncoder::encode(value));
        self
    }

    /// Fills the path template with percent-encoded parameter values.
    pub fn expand_path(&self) -> Result<String, HttpError> {
        let mut expanded = String::with_capacity(self.path.len());
        let mut rest = self.path.as_str();
        while let Some(start) = rest.find('{') {
            expanded.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                HttpError::InvalidRequest(format!("unterminated placeholder in path {}", self.path))
            })?;
            let name = &after[..end];
            let value = self
                .path_params
                .iter()
                .find(|(param, _)| param == name)
                .map(|(_, value)| value)
                .ok_or_else(|| HttpError::InvalidRequest(format!("missing path parameter {name}")))?;
            expanded.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }
        expanded.push_str(rest);
        Ok(expanded)
    }
}

fn single_plain(name: &str, value: &ConjureValue) -> Result<String, HttpError> {
    match ConjureEncoder::plain(value)? {
        PlainValue::Single(text) => Ok(text),
        PlainValue::Multi(_) => Err(HttpError::InvalidRequest(format!(
            "parameter {name} must be a single value"
        ))),
    }
}

/// A successful response, body fully read.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: u16,
    trace_id: String,
    body: Vec<u8>,
}

impl HttpResponse {
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Trace id sent with the attempt that produced this response.
    pub fn trace_id(&self) -> &str {
        &self.trace_id
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as `ty`. An empty body reads as JSON `null`.
    pub fn decode(
        &self,
        decoder: &ConjureDecoder,
        ty: &TypeDescriptor,
    ) -> Result<ConjureValue, HttpError> {
        Ok(decoder.decode(&self.parsed()?, ty)?)
    }

    pub fn json<T>(&self, decoder: &ConjureDecoder) -> Result<T, HttpError>
    where
        T: ConjureType + FromConjureValue,
    {
        Ok(decoder.decode_as(&self.parsed()?)?)
    }

    fn parsed(&self) -> Result<Value, DecodeError> {
        if self.body.is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }
}
