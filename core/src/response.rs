//! HTTP response model for the bridge.

use std::collections::HashMap;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// An HTTP response as reported by the host.
///
/// `status_code` is 0 when the host never reached the remote server. The
/// decoder only round-trips status, body and error; `headers` stays empty
/// unless a future wire format carries them.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub error: String,
}

impl Response {
    /// Response body as UTF-8 text.
    pub fn text(&self) -> Result<String> {
        String::from_utf8(self.body.clone())
            .map_err(|e| Error::other(format!("invalid UTF-8 in response body: {e}")))
    }

    /// Deserialize the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| Error::other(format!("failed to parse JSON response: {e}")))
    }

    /// Whether the status code is in the 2xx range. A transport-level `Ok`
    /// does not imply this; callers check it themselves.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Host-reported error message, if any.
    pub fn error(&self) -> Option<&str> {
        if self.error.is_empty() {
            None
        } else {
            Some(&self.error)
        }
    }
}
