#![allow(dead_code)]

use super::headers::{header_value, vary_values};
use access_cors_rs::{CorsDecision, Headers};

pub fn assert_simple(decision: CorsDecision) -> Headers {
    match decision {
        CorsDecision::Simple(result) => result.headers,
        other => panic!("expected simple decision, got {:?}", other),
    }
}

pub fn assert_preflight(decision: CorsDecision) -> (Headers, u16) {
    match decision {
        CorsDecision::Preflight(result) => (result.headers, result.status),
        other => panic!("expected preflight decision, got {:?}", other),
    }
}

pub fn assert_rejected_preflight(decision: CorsDecision) {
    let (headers, status) = assert_preflight(decision);
    assert_eq!(status, 204);
    assert!(
        headers.is_empty(),
        "rejected preflight must carry no headers, got {:?}",
        headers
    );
}

pub fn assert_header_eq(headers: &Headers, name: &str, expected: &str) {
    assert_eq!(
        header_value(headers, name),
        Some(expected),
        "unexpected value for {}",
        name
    );
}

pub fn assert_header_absent(headers: &Headers, name: &str) {
    assert!(
        header_value(headers, name).is_none(),
        "expected {} to be absent, got {:?}",
        name,
        header_value(headers, name)
    );
}

pub fn assert_vary_eq<I, S>(headers: &Headers, expected: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let expected: Vec<String> = expected
        .into_iter()
        .map(|value| value.as_ref().to_string())
        .collect();
    assert_eq!(vary_values(headers), expected);
}
