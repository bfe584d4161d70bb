//! Purpose: Regression coverage for parse-failure category mapping.
//! Exports: Integration tests only.
//! Role: Verify stable category labels used in decode hints.
//! Invariants: Category mapping remains deterministic for representative errors.
//! Invariants: Tests avoid payload leakage; assertions target category/hint text only.
//! Notes: Uses source include to exercise internal helper logic without widening API surface.

#[path = "../src/json/parse.rs"]
mod parse;

use parse::ParseFailureCategory;
use serde_json::Value;

#[test]
fn category_mapping_handles_syntax_and_eof() {
    let syntax_err = parse::from_str::<Value>("not json").unwrap_err();
    assert_eq!(
        parse::categorize_error(&syntax_err),
        ParseFailureCategory::Syntax
    );

    let eof_err = parse::from_str::<Value>("\"unterminated").unwrap_err();
    assert_eq!(
        parse::categorize_error(&eof_err),
        ParseFailureCategory::Truncated
    );
}

#[test]
fn raw_line_break_is_control_character() {
    let err = parse::from_str::<Value>("\"echo a\necho b\"").unwrap_err();
    assert_eq!(
        parse::categorize_error(&err),
        ParseFailureCategory::ControlCharacter
    );
}

#[test]
fn bad_escapes_and_numbers_have_specific_categories() {
    let unicode_err = parse::from_str::<Value>(r#""\udc00""#).unwrap_err();
    assert_eq!(
        parse::categorize_error(&unicode_err),
        ParseFailureCategory::Unicode
    );

    let number_err = parse::from_str::<Value>("1e400").unwrap_err();
    assert_eq!(
        parse::categorize_error(&number_err),
        ParseFailureCategory::NumericRange
    );

    assert_eq!(
        parse::categorize_message("recursion limit exceeded at line 1 column 129"),
        ParseFailureCategory::DepthLimit
    );
}

#[test]
fn hint_contains_category_and_context() {
    let err = parse::from_str::<Value>("\"a\tb\"").unwrap_err();
    let hint = parse::hint_for_error(&err, "test.context");
    assert!(hint.contains("parse category: control-character"));
    assert!(hint.contains("context: test.context"));
    assert!(!hint.contains("a\tb"));
}

#[test]
fn unknown_category_fallback_is_stable() {
    assert_eq!(
        parse::categorize_message("opaque parser issue"),
        ParseFailureCategory::Unknown
    );
    assert_eq!(ParseFailureCategory::Unknown.label(), "unknown");
}
