//! Purpose: Split a `key: value` line into its key and the JSON text after the colon.
//! Exports: `KeyValue`, `split_key_value`, `is_json_space`, `trim_json_space`.
//! Role: First stage of decode; the second stage hands `value` to the JSON parser.
//! Invariants: Matches `^\s*"?([^"]+)"?\s*:\s*(.*)` (dot-all) on trimmed input.
//! Invariants: The key is greedy: the longest key that is followed by a colon wins.
//! Notes: Best-effort heuristic, not a grammar. A value that itself contains `text: `
//! before any quote moves the split point to that later colon.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct KeyValue<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Whitespace as recognized by the key pattern and input trimming, including BOM.
pub(crate) fn is_json_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

pub(crate) fn trim_json_space(text: &str) -> &str {
    text.trim_matches(is_json_space)
}

/// `text` is expected to be trimmed already. Runs in time linear in `text`.
pub(crate) fn split_key_value(text: &str) -> Option<KeyValue<'_>> {
    let body = text.strip_prefix('"').unwrap_or(text);
    let run_end = body.find('"').unwrap_or(body.len());
    if run_end == 0 {
        return None;
    }

    // Longest candidate: the whole run, closed by its quote.
    if run_end < body.len()
        && let Some(value) = value_after_key(&body[run_end..])
    {
        return Some(KeyValue {
            key: &body[..run_end],
            value,
        });
    }

    // Otherwise the key ends right at the last colon inside the run.
    let colon = body[..run_end].rfind(':')?;
    if colon == 0 {
        return None;
    }
    Some(KeyValue {
        key: &body[..colon],
        value: body[colon + 1..].trim_start_matches(is_json_space),
    })
}

fn value_after_key(rest: &str) -> Option<&str> {
    let rest = rest.strip_prefix('"').unwrap_or(rest);
    let rest = rest.trim_start_matches(is_json_space);
    let rest = rest.strip_prefix(':')?;
    Some(rest.trim_start_matches(is_json_space))
}

#[cfg(test)]
mod tests {
    use super::{KeyValue, split_key_value, trim_json_space};

    fn split(text: &str) -> Option<(&str, &str)> {
        split_key_value(text).map(|KeyValue { key, value }| (key, value))
    }

    #[test]
    fn quoted_key_and_value() {
        assert_eq!(
            split(r#""script": "echo hi""#),
            Some(("script", r#""echo hi""#))
        );
    }

    #[test]
    fn unquoted_key_is_accepted() {
        assert_eq!(split(r#"script:"x""#), Some(("script", r#""x""#)));
    }

    #[test]
    fn whitespace_before_colon_stays_in_key() {
        assert_eq!(split(r#"script : "x""#), Some(("script ", r#""x""#)));
        assert_eq!(split(r#""script" : "x""#), Some(("script", r#""x""#)));
    }

    #[test]
    fn value_may_span_lines() {
        assert_eq!(
            split("\"k\":\n  \"a\\nb\""),
            Some(("k", "\"a\\nb\""))
        );
    }

    #[test]
    fn key_takes_last_colon_before_first_quote() {
        assert_eq!(split(r#"a: b: "c""#), Some(("a: b", r#""c""#)));
        assert_eq!(split("a:b:c"), Some(("a:b", "c")));
    }

    #[test]
    fn no_colon_no_match() {
        assert_eq!(split(r#""hello\nworld""#), None);
        assert_eq!(split("plain words"), None);
    }

    #[test]
    fn empty_key_no_match() {
        assert_eq!(split(r#":"x""#), None);
        assert_eq!(split(r#""": "x""#), None);
    }

    #[test]
    fn colon_inside_quoted_literal_splits_inside() {
        assert_eq!(split(r#""http://host""#), Some(("http", r#"//host""#)));
    }

    #[test]
    fn empty_remainder_is_a_match() {
        assert_eq!(split("key:"), Some(("key", "")));
    }

    #[test]
    fn non_ascii_keys_split_on_char_boundaries() {
        assert_eq!(split("\"clé\": \"v\""), Some(("clé", "\"v\"")));
    }

    #[test]
    fn long_whitespace_runs_split_in_linear_time() {
        let pad = " ".repeat(200_000);
        let started = std::time::Instant::now();
        assert_eq!(split(&format!("a{pad}b")), None);
        let padded_key = format!("k{pad}");
        let line = format!("{padded_key}: \"v\"");
        assert_eq!(split(&line), Some((padded_key.as_str(), "\"v\"")));
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[test]
    fn trim_includes_bom() {
        assert_eq!(trim_json_space("\u{feff} \"x\"\n"), "\"x\"");
    }
}
