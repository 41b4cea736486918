//! Verify the parser against JSON test vectors stored in `test-vectors/`.
//!
//! Each case carries an input reqline and either the expected descriptor or
//! the expected error message. Descriptors are compared as parsed values,
//! not raw strings, so key order in the vector file does not matter.

use reqline_core::{parse_reqline, ReqlineDescriptor, ReqlineError};

fn cases() -> Vec<serde_json::Value> {
    let raw = include_str!("../../test-vectors/parse.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

#[test]
fn parse_test_vectors() {
    for case in cases() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_str().unwrap();

        match (case.get("expected"), case.get("error")) {
            (Some(expected), None) => {
                let expected: ReqlineDescriptor = serde_json::from_value(expected.clone()).unwrap();
                let parsed = parse_reqline(input)
                    .unwrap_or_else(|e| panic!("{name}: unexpected error {e}"));
                assert_eq!(parsed, expected, "{name}: descriptor");
            }
            (None, Some(message)) => {
                let err = parse_reqline(input).expect_err(name);
                let classified = ReqlineError::from(err);
                assert!(classified.is_exposable(), "{name}: exposable");
                assert_eq!(classified.message(), message.as_str().unwrap(), "{name}: message");
            }
            _ => panic!("{name}: case needs exactly one of `expected` or `error`"),
        }
    }
}

#[test]
fn valid_vectors_round_trip_through_display() {
    for case in cases() {
        if case.get("expected").is_none() {
            continue;
        }
        let name = case["name"].as_str().unwrap();
        let first = parse_reqline(case["input"].as_str().unwrap()).unwrap();
        let second = parse_reqline(&first.to_string())
            .unwrap_or_else(|e| panic!("{name}: rendering did not re-parse: {e}"));
        assert_eq!(first, second, "{name}: round trip");
    }
}
