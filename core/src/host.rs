//! The host capability and its wasm import backing.
//!
//! # Design
//! The sandbox exposes exactly one effectful import. It is modeled here as
//! the [`Host`] trait so the rest of the bridge can run against a test
//! double. The return convention of the raw import packs a buffer
//! location and length into one 64-bit word; [`unpack_reply`] isolates
//! that convention so it stays testable off-target.
//!
//! Memory discipline: the buffer named by the word lives in host-written
//! guest memory with no lifetime guarantee beyond the current call, so
//! `HostImport` copies it into an owned `Vec` immediately and never
//! retains the raw location.

use std::ffi::CStr;

/// The single effectful capability the bridge depends on.
///
/// `request` is the NUL-terminated encoded request. `None` means the host
/// signalled outright failure (the zero-location sentinel); `Some` carries
/// the reply buffer already copied into guest-owned storage.
pub trait Host {
    fn http_request(&self, request: &CStr) -> Option<Vec<u8>>;
}

/// Split the import's return word into `(location, length)`.
///
/// The low 32 bits are the buffer location, the high 32 bits its length.
/// Location 0 is the failure sentinel: no buffer exists and nothing may
/// be read.
pub fn unpack_reply(word: u64) -> Option<(u32, u32)> {
    let location = (word & 0xFFFF_FFFF) as u32;
    let length = (word >> 32) as u32;
    if location == 0 {
        None
    } else {
        Some((location, length))
    }
}

#[cfg(target_arch = "wasm32")]
#[link(wasm_import_module = "env")]
extern "C" {
    fn host_http_request(request_ptr: *const u8) -> u64;
}

/// [`Host`] backed by the real sandbox import.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostImport;

#[cfg(target_arch = "wasm32")]
impl Host for HostImport {
    fn http_request(&self, request: &CStr) -> Option<Vec<u8>> {
        let word = unsafe { host_http_request(request.as_ptr().cast()) };
        let (location, length) = unpack_reply(word)?;
        // Copy out of host-written memory before the location goes stale.
        let raw = unsafe {
            std::slice::from_raw_parts(location as usize as *const u8, length as usize)
        };
        Some(raw.to_vec())
    }
}
