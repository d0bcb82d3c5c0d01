//! Guest-side HTTP bridge over a single host import.
//!
//! # Overview
//! A sandboxed guest module (wasm32) cannot open sockets. The host process
//! exposes exactly one import, `host_http_request`, which takes a
//! NUL-terminated encoded request and returns one packed 64-bit word naming
//! a buffer in guest memory. This crate builds the request encoding, makes
//! the boundary call, copies the reply out of host-written memory, and
//! recovers a typed `Response` from the host's minimal text format.
//!
//! # Design
//! - The host import is modeled as the [`Host`] capability trait, so the
//!   whole bridge runs against a mock without a sandbox (host-does-IO
//!   pattern). The real wasm import backs `host::HostImport`.
//! - All wire logic lives behind the [`wire`] module: the hand-rolled
//!   request encoder, the marker-scanning response decoder, and the
//!   tolerant base64 decode. Callers never see the wire format.
//! - Two-level success: a `Result` failure means transport failure or a
//!   host-reported error; a non-2xx `status_code` is still `Ok` and is the
//!   caller's to check via [`Response::is_success`].
//! - Types use owned `String` / `Vec` fields; nothing borrows from the
//!   host-written buffer past the decode step.

pub mod bridge;
pub mod error;
pub mod host;
pub mod request;
pub mod response;
pub mod wire;

pub use bridge::Bridge;
#[cfg(target_arch = "wasm32")]
pub use bridge::Http;
pub use error::{Error, Result};
pub use host::Host;
pub use request::{Method, Request};
pub use response::Response;
