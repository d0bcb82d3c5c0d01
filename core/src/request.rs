//! HTTP request model for the bridge.
//!
//! # Design
//! A `Request` is plain data: the bridge encodes it, the host executes it.
//! Headers are a map with last-write-wins semantics. The `timeout` field is
//! advisory information for the host; nothing on the guest side enforces it.
//!
//! The encoder embeds `url` and header strings verbatim, so values
//! containing `"` or other wire delimiters corrupt the encoding. Keeping
//! them delimiter-safe is the caller's responsibility.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};

/// Default request timeout in seconds, applied by the host.
pub const DEFAULT_TIMEOUT_SECS: u32 = 30;

/// HTTP verb understood by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// An HTTP request to be executed by the host.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub timeout: u32,
}

impl Request {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            headers: HashMap::new(),
            body: Vec::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create a GET request.
    pub fn get(url: &str) -> Self {
        Self::new(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(url: &str) -> Self {
        Self::new(Method::Post, url)
    }

    /// Create a PUT request.
    pub fn put(url: &str) -> Self {
        Self::new(Method::Put, url)
    }

    /// Create a DELETE request.
    pub fn delete(url: &str) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Set a header. Setting the same name twice keeps the later value.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    pub fn body_str(mut self, body: &str) -> Self {
        self.body = body.as_bytes().to_vec();
        self
    }

    /// Serialize `data` as the JSON body and set `Content-Type`.
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data)
            .map_err(|e| Error::other(format!("failed to serialize JSON body: {e}")))?;
        self.body = body;
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        Ok(self)
    }

    /// Set the advisory timeout in seconds.
    pub fn timeout(mut self, seconds: u32) -> Self {
        self.timeout = seconds;
        self
    }
}
