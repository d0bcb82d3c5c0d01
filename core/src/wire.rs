//! Wire format shared with the host.
//!
//! # Design
//! Both ends of the boundary are built together, so neither carries a full
//! JSON library for this exchange. The encoder writes the request shape by
//! hand; the decoder locates each reply field with an independent,
//! unanchored substring search from the start of the buffer, so field order
//! never matters and an absent field simply falls back to its default.
//! Only an explicit non-empty `error` field fails a decode; unrecognized
//! structure never does.
//!
//! Known limitation: the encoder embeds `url` and header strings verbatim.
//! A value containing `"` corrupts the encoding; callers must keep those
//! strings delimiter-safe.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::request::Request;
use crate::response::Response;

const STATUS_MARKER: &str = "\"status_code\":";
const BODY_MARKER: &str = "\"body\":\"";
const ERROR_MARKER: &str = "\"error\":\"";

/// Encode a request for the host:
/// `{"method":M,"url":U,"headers":{..},"body":[b0,b1,..],"timeout":T}`.
///
/// Pure and structurally infallible; body bytes are written as decimal
/// integers so arbitrary binary survives the text channel.
pub fn encode_request(req: &Request) -> String {
    let mut out = String::with_capacity(64 + req.url.len() + req.body.len() * 4);
    out.push_str("{\"method\":\"");
    out.push_str(req.method.as_str());
    out.push_str("\",\"url\":\"");
    out.push_str(&req.url);
    out.push_str("\",\"headers\":{");
    let mut first = true;
    for (name, value) in &req.headers {
        if !first {
            out.push(',');
        }
        out.push('"');
        out.push_str(name);
        out.push_str("\":\"");
        out.push_str(value);
        out.push('"');
        first = false;
    }
    out.push_str("},\"body\":[");
    for (i, byte) in req.body.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&byte.to_string());
    }
    out.push_str("],\"timeout\":");
    out.push_str(&req.timeout.to_string());
    out.push('}');
    out
}

/// Decode the host's reply buffer into a `Response`.
///
/// A non-empty `error` field wins over everything else and fails the
/// decode; a buffer with no recognizable markers yields a zero-status,
/// empty-body response.
pub fn decode_response(raw: &[u8]) -> Result<Response> {
    let text = String::from_utf8_lossy(raw);

    let status_code = scan_status(&text);
    let body = match scan_quoted(&text, BODY_MARKER) {
        Some(encoded) => decode_base64(encoded),
        None => Vec::new(),
    };
    let error = scan_quoted(&text, ERROR_MARKER).unwrap_or("").to_string();

    if !error.is_empty() {
        return Err(Error::Other(error));
    }

    Ok(Response {
        status_code,
        headers: HashMap::new(),
        body,
        error,
    })
}

/// Locate the status marker and parse the digits that follow, tolerating
/// leading spaces or a stray colon. Absent marker or unparsable digits
/// leave the status at 0.
fn scan_status(text: &str) -> u16 {
    let Some(pos) = text.find(STATUS_MARKER) else {
        return 0;
    };
    let rest = &text[pos + STATUS_MARKER.len()..];
    let rest = rest.trim_start_matches([' ', ':']);
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().unwrap_or(0)
}

/// Extract the quoted string following `marker`, or `None` if the marker
/// or its closing quote is missing.
fn scan_quoted<'a>(text: &'a str, marker: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

// Standard alphabet lookup, 255 = not a base64 character.
const BASE64_TABLE: [u8; 128] = [
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, //
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, //
    255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 255, 62, 255, 255, 255, 63, //
    52, 53, 54, 55, 56, 57, 58, 59, 60, 61, 255, 255, 255, 0, 255, 255, //
    255, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, //
    15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 255, 255, 255, 255, 255, //
    255, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, //
    41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 255, 255, 255, 255, 255, //
];

/// Streaming base64 decode of the standard alphabet.
///
/// `=` ends the stream immediately; bytes outside the alphabet, including
/// anything >= 128, are skipped. Truncated input yields only the bytes
/// that fully accumulated. Never fails.
pub fn decode_base64(input: &str) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len() * 3 / 4);
    let mut buf = 0u32;
    let mut bits = 0u32;

    for &byte in input.as_bytes() {
        if byte == b'=' {
            break;
        }
        if byte >= 128 {
            continue;
        }
        let value = BASE64_TABLE[byte as usize];
        if value == 255 {
            continue;
        }

        buf = (buf << 6) | u32::from(value);
        bits += 6;

        if bits >= 8 {
            bits -= 8;
            output.push((buf >> bits) as u8);
            buf &= (1 << bits) - 1;
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;

    use super::*;

    #[test]
    fn encode_round_trips_through_json() {
        let req = Request::post("https://api.example.com/items")
            .header("Content-Type", "application/json")
            .header("X-Token", "abc123")
            .body_str("hi")
            .timeout(5);

        let encoded = encode_request(&req);
        let parsed: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(parsed["method"], "POST");
        assert_eq!(parsed["url"], "https://api.example.com/items");
        assert_eq!(parsed["headers"]["Content-Type"], "application/json");
        assert_eq!(parsed["headers"]["X-Token"], "abc123");
        assert_eq!(parsed["body"], serde_json::json!([104, 105]));
        assert_eq!(parsed["timeout"], 5);
    }

    #[test]
    fn encode_empty_request_is_well_formed() {
        let encoded = encode_request(&Request::get("https://example.com"));
        let parsed: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(parsed["method"], "GET");
        assert_eq!(parsed["headers"], serde_json::json!({}));
        assert_eq!(parsed["body"], serde_json::json!([]));
        assert_eq!(parsed["timeout"], 30);
    }

    #[test]
    fn encode_writes_binary_body_as_integers() {
        let req = Request::put("https://example.com").body(vec![0, 127, 255]);
        let parsed: serde_json::Value =
            serde_json::from_str(&encode_request(&req)).unwrap();
        assert_eq!(parsed["body"], serde_json::json!([0, 127, 255]));
    }

    #[test]
    fn decode_status_only() {
        let resp = decode_response(br#"{"status_code":404}"#).unwrap();
        assert_eq!(resp.status_code, 404);
        assert!(resp.body.is_empty());
        assert!(resp.error.is_empty());
    }

    #[test]
    fn decode_tolerates_space_before_digits() {
        let resp = decode_response(br#"{"status_code":  503}"#).unwrap();
        assert_eq!(resp.status_code, 503);
    }

    #[test]
    fn decode_body_from_base64() {
        let resp = decode_response(br#"{"status_code":200,"body":"aGk="}"#).unwrap();
        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.body, b"hi");
    }

    #[test]
    fn decode_error_wins_over_status_and_body() {
        let err =
            decode_response(br#"{"status_code":200,"body":"aGk=","error":"boom"}"#).unwrap_err();
        assert!(matches!(err, Error::Other(msg) if msg == "boom"));
    }

    #[test]
    fn decode_empty_error_field_is_success() {
        let resp = decode_response(br#"{"status_code":204,"error":""}"#).unwrap();
        assert_eq!(resp.status_code, 204);
        assert!(resp.error().is_none());
    }

    #[test]
    fn decode_unrecognized_buffer_defaults_everything() {
        let resp = decode_response(b"definitely not the reply format").unwrap();
        assert_eq!(resp.status_code, 0);
        assert!(resp.body.is_empty());
        assert!(resp.error.is_empty());
    }

    #[test]
    fn decode_field_order_does_not_matter() {
        let resp =
            decode_response(br#"{"error":"","body":"eQ==","status_code":201}"#).unwrap();
        assert_eq!(resp.status_code, 201);
        assert_eq!(resp.body, b"y");
    }

    #[test]
    fn base64_decodes_standard_input() {
        assert_eq!(decode_base64("aGVsbG8gd29ybGQ="), b"hello world");
        assert_eq!(decode_base64(""), b"");
    }

    #[test]
    fn base64_padding_stops_the_stream() {
        // Everything after the first `=` is ignored.
        assert_eq!(decode_base64("aGk=QUFB"), b"hi");
    }

    #[test]
    fn base64_skips_whitespace_and_high_bytes() {
        assert_eq!(decode_base64("aG\nk="), b"hi");
        // U+00AE encodes as two bytes >= 128, both skipped.
        assert_eq!(decode_base64("aGk\u{ae}="), b"hi");
    }

    #[test]
    fn base64_truncated_input_keeps_whole_bytes_only() {
        // "QQ" carries 12 bits: one whole byte, four bits discarded.
        assert_eq!(decode_base64("QQ"), vec![b'A']);
        // Six bits never complete a byte.
        assert_eq!(decode_base64("Q"), Vec::<u8>::new());
    }

    #[test]
    fn base64_round_trips_arbitrary_bytes() {
        let samples: Vec<Vec<u8>> = vec![
            vec![],
            vec![0],
            vec![255],
            b"hi".to_vec(),
            b"base64 round trip".to_vec(),
            (0..=255).collect(),
        ];
        for bytes in samples {
            let encoded = STANDARD.encode(&bytes);
            assert_eq!(decode_base64(&encoded), bytes, "input {bytes:?}");
        }
    }
}
