//! The public bridge surface: one boundary call per operation.
//!
//! # Design
//! `Bridge` is stateless apart from the injected [`Host`]; every operation
//! encodes, makes exactly one boundary call, and decodes. No retries, no
//! guest-side timeout enforcement, no connection state. Transport failure
//! and host-reported errors fail the `Result`; a non-2xx status does not.

use std::ffi::CString;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::host::Host;
use crate::request::Request;
use crate::response::Response;
use crate::wire;

/// HTTP bridge over an injected host capability.
pub struct Bridge<H: Host> {
    host: H,
}

impl<H: Host> Bridge<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Execute one request through the host.
    pub fn request(&self, req: Request) -> Result<Response> {
        let encoded = wire::encode_request(&req);
        let encoded = CString::new(encoded)
            .map_err(|_| Error::invalid_input("request contains an interior NUL byte"))?;

        let raw = self
            .host
            .http_request(&encoded)
            .ok_or_else(|| Error::other("HTTP request failed"))?;

        wire::decode_response(&raw)
    }

    pub fn get(&self, url: &str) -> Result<Response> {
        self.request(Request::get(url))
    }

    pub fn post(&self, url: &str, body: Vec<u8>) -> Result<Response> {
        self.request(Request::post(url).body(body))
    }

    /// POST `data` serialized as JSON with `Content-Type` set.
    pub fn post_json<T: Serialize>(&self, url: &str, data: &T) -> Result<Response> {
        self.request(Request::post(url).json(data)?)
    }

    pub fn put(&self, url: &str, body: Vec<u8>) -> Result<Response> {
        self.request(Request::put(url).body(body))
    }

    pub fn delete(&self, url: &str) -> Result<Response> {
        self.request(Request::delete(url))
    }
}

/// Bridge bound to the real sandbox import.
#[cfg(target_arch = "wasm32")]
pub struct Http;

#[cfg(target_arch = "wasm32")]
impl Http {
    fn bridge() -> Bridge<crate::host::HostImport> {
        Bridge::new(crate::host::HostImport)
    }

    pub fn request(req: Request) -> Result<Response> {
        Self::bridge().request(req)
    }

    pub fn get(url: &str) -> Result<Response> {
        Self::bridge().get(url)
    }

    pub fn post(url: &str, body: Vec<u8>) -> Result<Response> {
        Self::bridge().post(url, body)
    }

    pub fn post_json<T: Serialize>(url: &str, data: &T) -> Result<Response> {
        Self::bridge().post_json(url, data)
    }

    pub fn put(url: &str, body: Vec<u8>) -> Result<Response> {
        Self::bridge().put(url, body)
    }

    pub fn delete(url: &str) -> Result<Response> {
        Self::bridge().delete(url)
    }
}
