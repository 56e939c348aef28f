#![allow(dead_code)]

pub mod product;

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

/// Context path every route is served under.
pub const CONTEXT_PATH: &str = "/simple/api";

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

#[derive(Default)]
struct ServerState {
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ServerState {
    /// Stores the request and returns how many requests hit `path` so far.
    fn record(&self, request: RecordedRequest) -> usize {
        let mut requests = self.requests.lock().expect("lock");
        let path = request.path.clone();
        requests.push(request);
        requests.iter().filter(|r| r.path == path).count()
    }
}

/// An axum server on an ephemeral port, running on its own runtime thread.
pub struct TestServer {
    pub address: String,
    state: Arc<ServerState>,
}

impl TestServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let address = format!("http://{}", listener.local_addr().expect("addr"));
        listener.set_nonblocking(true).expect("nonblocking");

        let state = Arc::new(ServerState::default());
        let server_state = Arc::clone(&state);
        std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .expect("runtime")
                .block_on(async move {
                    let listener = tokio::net::TcpListener::from_std(listener).expect("listener");
                    let router = Router::new().fallback(handle).with_state(server_state);
                    axum::serve(listener, router).await.expect("serve");
                });
        });

        Self { address, state }
    }

    /// Base URI including the context path.
    pub fn uri(&self) -> String {
        format!("{}{CONTEXT_PATH}", self.address)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("lock").clone()
    }

    pub fn requests_to(&self, route: &str) -> Vec<RecordedRequest> {
        let path = format!("{CONTEXT_PATH}{route}");
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }
}

/// A port nothing listens on.
pub fn closed_port_uri() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let address = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{address}{CONTEXT_PATH}")
}

async fn handle(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let trace_id = headers
        .get("x-b3-traceid")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let attempt = state.record(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers: headers
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect(),
        body: body.clone(),
    });

    let route = uri.path().strip_prefix(CONTEXT_PATH).unwrap_or_default();
    match route {
        "/catalog/testEndpoint" => Json(json!(format!("echo:{body}"))).into_response(),
        "/throttled" => (StatusCode::TOO_MANY_REQUESTS, "slow down").into_response(),
        "/moved" => (
            StatusCode::PERMANENT_REDIRECT,
            [("Location", format!("{CONTEXT_PATH}/elsewhere"))],
        )
            .into_response(),
        "/elsewhere" => Json(json!("followed")).into_response(),
        "/flaky" if attempt <= 2 => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        "/flaky" => Json(json!("recovered")).into_response(),
        "/missing" => (
            StatusCode::NOT_FOUND,
            [("X-B3-TraceId", trace_id)],
            Json(json!({
                "errorCode": "NOT_FOUND",
                "errorName": "Default:NotFound",
                "errorInstanceId": "00000000-0000-0000-0000-000000000000",
                "parameters": {"datasetRid": "ri.missing"}
            })),
        )
            .into_response(),
        "/broken" => (StatusCode::NOT_FOUND, "Content that's not JSON").into_response(),
        "/silent" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "/empty" => StatusCode::NO_CONTENT.into_response(),
        other => match other.strip_prefix("/catalog/datasets/") {
            Some(rid) => Json(json!({"fileSystemId": rid, "path": "/datasets/main"})).into_response(),
            None => StatusCode::NOT_FOUND.into_response(),
        },
    }
}
