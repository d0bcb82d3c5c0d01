//! Native stand-in for the sandbox host.
//!
//! # Overview
//! Two pieces: an axum server with known routes to aim requests at, and
//! [`NativeHost`], an implementation of the guest's host capability that
//! decodes the guest wire format, executes the request with ureq, and
//! packages the reply exactly as the real host does (JSON with a
//! base64-encoded body). Together they let the whole bridge run end to end
//! without a sandbox.
//!
//! # Design
//! The wire mirror types are defined independently from `bridge-core`;
//! integration tests catch schema drift between the two crates.

use std::collections::HashMap;
use std::ffi::CStr;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{any, delete, get, post};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

// ---------------------------------------------------------------------------
// Mock HTTP server
// ---------------------------------------------------------------------------

pub fn app() -> Router {
    Router::new()
        .route("/ping", get(ping))
        .route("/echo", post(echo).put(echo))
        .route("/header/{name}", any(header_value))
        .route("/items/{id}", delete(delete_item))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn ping() -> &'static str {
    "pong"
}

async fn echo(body: Bytes) -> Bytes {
    body
}

/// Reflect the named request header back as the response body.
async fn header_value(
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<String, StatusCode> {
    headers
        .get(&name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_item(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Host wire format
// ---------------------------------------------------------------------------

/// Guest request wire shape, mirrored independently from `bridge-core`.
#[derive(Debug, Deserialize)]
struct WireRequest {
    #[serde(default = "default_method")]
    method: String,
    url: String,
    #[serde(default)]
    headers: HashMap<String, String>,
    #[serde(default)]
    body: Vec<u8>,
    #[serde(default = "default_timeout")]
    timeout: u32,
}

fn default_method() -> String {
    "GET".to_string()
}

fn default_timeout() -> u32 {
    30
}

/// Host reply wire shape. The real host serializes a byte-slice body as a
/// base64 string; `encode_reply` reproduces that.
#[derive(Debug, Serialize)]
struct WireReply<'a> {
    status_code: u16,
    headers: HashMap<String, String>,
    body: String,
    error: &'a str,
}

/// Build a reply buffer the way the host does.
pub fn encode_reply(status_code: u16, body: &[u8], error: &str) -> Vec<u8> {
    encode_reply_with_headers(status_code, HashMap::new(), body, error)
}

fn encode_reply_with_headers(
    status_code: u16,
    headers: HashMap<String, String>,
    body: &[u8],
    error: &str,
) -> Vec<u8> {
    let reply = WireReply {
        status_code,
        headers,
        body: BASE64.encode(body),
        error,
    };
    serde_json::to_vec(&reply).expect("reply shape is always serializable")
}

// ---------------------------------------------------------------------------
// Native host capability
// ---------------------------------------------------------------------------

/// Host capability backed by a real ureq transport.
///
/// Transport-level failures (connection refused, timeout) come back as a
/// reply with a non-empty `error` field, matching the real host. A request
/// buffer the host cannot parse returns `None`, the zero-location sentinel.
pub struct NativeHost {
    agent: ureq::Agent,
}

impl NativeHost {
    pub fn new() -> Self {
        // Non-2xx statuses are data for the guest, not transport errors.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }

    fn perform(&self, req: &WireRequest) -> Vec<u8> {
        let outcome = match req.method.as_str() {
            "GET" => configure(self.agent.get(&req.url), req).call(),
            "DELETE" => configure(self.agent.delete(&req.url), req).call(),
            "POST" => configure(self.agent.post(&req.url), req).send(&req.body[..]),
            "PUT" => configure(self.agent.put(&req.url), req).send(&req.body[..]),
            other => {
                return encode_reply(0, b"", &format!("unsupported method: {other}"));
            }
        };

        match outcome {
            Ok(mut response) => {
                let status = response.status().as_u16();
                let mut headers = HashMap::new();
                for (name, value) in response.headers() {
                    if let Ok(v) = value.to_str() {
                        headers.insert(name.as_str().to_string(), v.to_string());
                    }
                }
                let body = response.body_mut().read_to_vec().unwrap_or_default();
                encode_reply_with_headers(status, headers, &body, "")
            }
            Err(e) => encode_reply(0, b"", &e.to_string()),
        }
    }
}

impl Default for NativeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl bridge_core::Host for NativeHost {
    fn http_request(&self, request: &CStr) -> Option<Vec<u8>> {
        let text = request.to_str().ok()?;
        let req: WireRequest = serde_json::from_str(text).ok()?;
        Some(self.perform(&req))
    }
}

/// Apply the request's advisory timeout and headers to a ureq builder.
fn configure<Any>(
    builder: ureq::RequestBuilder<Any>,
    req: &WireRequest,
) -> ureq::RequestBuilder<Any> {
    let mut builder = builder
        .config()
        .timeout_global(Some(Duration::from_secs(u64::from(req.timeout))))
        .build();
    for (name, value) in &req.headers {
        builder = builder.header(name, value);
    }
    builder
}
