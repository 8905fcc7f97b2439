//! Tolerant JSON extraction from raw model output.
//!
//! Models asked for "JSON only" still wrap it in markdown fences fairly often.
//! `strip_code_fence` is a pure text transform; `extract_object` parses the
//! result and only accepts a top-level JSON object.

use serde_json::{Map, Value};

const FENCE: &str = "```";
const LANGUAGE_TAGS: &[&str] = &["json", "javascript"];

/// Removes a surrounding ```` ``` ```` fence and a bare language-tag first line.
///
/// Text that does not start with a fence is only trimmed. Every backtick at
/// either end is stripped, so unbalanced or doubled fences still unwrap.
pub fn strip_code_fence(text: &str) -> &str {
    let cleaned = text.trim();
    if !cleaned.starts_with(FENCE) {
        return cleaned;
    }

    let inner = cleaned.trim_matches('`');
    let (first_line, rest) = match inner.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (inner, ""),
    };
    let tag = first_line.trim().to_ascii_lowercase();
    let body = if LANGUAGE_TAGS.contains(&tag.as_str()) {
        rest
    } else {
        inner
    };

    body.trim()
}

/// Parses fenced or bare model output into a JSON object, if it is one.
pub fn extract_object(raw: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(strip_code_fence(raw)) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
