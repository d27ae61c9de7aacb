//! Unit tests for error formatting and accessors.

use std::error::Error as _;

use rstest::rstest;

use super::*;

#[rstest]
#[case::unlabelled(ComposeError::fragment(0, None, "boom"), "fragment #0 failed to load: boom")]
#[case::labelled(
    ComposeError::fragment(3, Some("shells"), "boom"),
    "fragment #3 ('shells') failed to load: boom"
)]
#[case::producer(
    ComposeError::producer("x86_64-linux", "no toolchain"),
    "producer failed for target 'x86_64-linux': no toolchain"
)]
#[case::unknown_with_hint(
    ComposeError::UnknownTarget { target: "x86-64-linux".into(), suggestion: Some("x86_64-linux") },
    "unknown target 'x86-64-linux'; did you mean 'x86_64-linux'?"
)]
#[case::unknown_without_hint(
    ComposeError::UnknownTarget { target: "toaster".into(), suggestion: None },
    "unknown target 'toaster'"
)]
fn messages_carry_context(#[case] err: ComposeError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[rstest]
fn accessors_expose_location() {
    let producer = ComposeError::producer("aarch64-darwin", "x");
    assert_eq!(producer.target(), Some("aarch64-darwin"));
    assert_eq!(producer.fragment_index(), None);

    let fragment = ComposeError::fragment(5, None, "x");
    assert_eq!(fragment.target(), None);
    assert_eq!(fragment.fragment_index(), Some(5));

    let unknown = ComposeError::UnknownTarget {
        target: "toaster".into(),
        suggestion: None,
    };
    assert_eq!(unknown.target(), Some("toaster"));
    assert_eq!(unknown.fragment_index(), None);
}

#[rstest]
fn producer_source_is_preserved() {
    let err = ComposeError::producer("x86_64-linux", "inner cause");
    let source = err.source().expect("producer errors keep their cause");
    assert_eq!(source.to_string(), "inner cause");
}

#[rstest]
fn serde_errors_convert_into_json_variant() {
    let parse = serde_json::from_str::<serde_json::Value>("{").expect_err("truncated input");
    let err = ComposeError::from(parse);
    assert!(matches!(err, ComposeError::Json(_)));
    assert!(err.to_string().starts_with("Failed to convert record:"));
}

#[rstest]
fn figment_errors_convert_into_options_variant() {
    let err = ComposeError::from(figment::Error::from(String::from("bad value")));
    assert!(matches!(err, ComposeError::Options(_)));
    assert!(err.to_string().contains("bad value"));
}
