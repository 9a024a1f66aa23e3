//! Verify response decoding and method parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each response vector gives a raw body and either the expected decoded
//! value or the expected error kind. Comparing `serde_json::Value`s (not raw
//! strings) avoids false negatives from formatting differences.

use fetch_core::{Fetch, FetchError, HttpMethod};

fn fetch() -> Fetch {
    Fetch::new(HttpMethod::Get, "http://localhost:3000/vector")
}

fn method_named(name: &str) -> HttpMethod {
    match name {
        "Get" => HttpMethod::Get,
        "Post" => HttpMethod::Post,
        "Put" => HttpMethod::Put,
        "Delete" => HttpMethod::Delete,
        other => panic!("unknown method variant: {other}"),
    }
}

fn assert_error_kind(name: &str, err: FetchError, expected: &str) {
    match expected {
        "ParseFailure" => assert!(
            matches!(err, FetchError::ParseFailure(_)),
            "{name}: expected ParseFailure, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let f = fetch();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let body = case["body"].as_str().unwrap();
        let result = f.parse_response(body.as_bytes());

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(name);
            assert_error_kind(name, err, expected_error.as_str().unwrap());
        } else {
            let value = result.unwrap_or_else(|e| panic!("{name}: {e}"));
            assert_eq!(value, case["expected_result"], "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Methods
// ---------------------------------------------------------------------------

#[test]
fn method_test_vectors() {
    let raw = include_str!("../../test-vectors/methods.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let input = case["input"].as_str().unwrap();
        let name = format!("method {input:?}");
        let result = Fetch::parse(input, "http://localhost:3000/");

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.expect_err(&name);
            assert_error_kind(&name, err, expected_error.as_str().unwrap());
        } else {
            let f = result.unwrap_or_else(|e| panic!("{name}: {e}"));
            let expected = method_named(case["expected"].as_str().unwrap());
            assert_eq!(f.method(), expected, "{name}");
            assert_eq!(f.method().as_str(), input.to_uppercase(), "{name}: wire name");
        }
    }
}
