//! Verify the response decoder against vectors stored in `test-vectors/`.
//!
//! Each case carries a raw reply buffer plus the expected decode outcome,
//! so the decoder's tolerance rules stay pinned down in data rather than
//! scattered across assertions.

use bridge_core::wire::decode_response;

#[test]
fn response_decode_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let buffer = case["buffer"].as_str().unwrap();
        let expect = &case["expect"];

        let result = decode_response(buffer.as_bytes());

        if expect["ok"].as_bool().unwrap() {
            let resp = result.unwrap_or_else(|e| panic!("{name}: expected Ok, got {e}"));
            assert_eq!(
                u64::from(resp.status_code),
                expect["status"].as_u64().unwrap(),
                "{name}: status"
            );
            assert_eq!(
                resp.body,
                expect["body_text"].as_str().unwrap().as_bytes(),
                "{name}: body"
            );
            assert!(resp.error.is_empty(), "{name}: error should be empty");
        } else {
            let err = match result {
                Err(e) => e,
                Ok(_) => panic!("{name}: expected Err"),
            };
            assert_eq!(
                err.to_string(),
                expect["message"].as_str().unwrap(),
                "{name}: message"
            );
        }
    }
}
