//! Response normalizer: turns raw model text into a well-formed `GradeResult`.
//!
//! `normalize` is total: unparseable output becomes the fallback object, and
//! bad individual fields are coerced or dropped instead of failing the grade.

use serde_json::{Map, Value};
use tracing::warn;

use crate::grading::extract::extract_object;
use crate::grading::letter::{exact_percent, letter_grade, percent};
use crate::grading::models::{GradeResult, ListEntry, RewriteSuggestion, RubricItem};

/// Max score assumed for a criterion whose `max_score` is missing.
pub const DEFAULT_MAX_SCORE: f64 = 10.0;

/// Letter grade of the fallback object.
pub const UNGRADED_LETTER: &str = "N/A";

pub const FALLBACK_ASSUMPTIONS: [&str; 2] = [
    "The model response was not valid JSON.",
    "Grading could not be parsed, so only the raw output is shown.",
];

/// Normalizes raw model output. Never fails.
pub fn normalize(raw: &str) -> GradeResult {
    match extract_object(raw) {
        Some(object) => complete(object),
        None => {
            warn!(
                "Model response was not a JSON object ({} bytes); using fallback grade",
                raw.len()
            );
            fallback(raw)
        }
    }
}

/// The placeholder grade used when the model output cannot be parsed.
/// The trimmed raw text is kept as the final comment so it can still be read.
pub fn fallback(raw: &str) -> GradeResult {
    GradeResult {
        assumptions: Some(FALLBACK_ASSUMPTIONS.iter().map(|s| s.to_string()).collect()),
        rubric_breakdown: Some(vec![]),
        overall_score: 0.0,
        overall_max: 0.0,
        letter_grade: UNGRADED_LETTER.to_string(),
        percent: percent(0.0, 0.0),
        strengths: Some(vec![]),
        top_fixes: Some(vec![]),
        rewrite_suggestions: Some(vec![]),
        final_comment: Some(raw.trim().to_string()),
        extra: Map::new(),
    }
}

/// Fills in totals, percent and letter grade; passes everything else through.
fn complete(mut object: Map<String, Value>) -> GradeResult {
    let supplied_score = take_present(&mut object, "overall_score");
    let supplied_max = take_present(&mut object, "overall_max");

    let (overall_score, overall_max) = match (supplied_score, supplied_max) {
        (Some(score), Some(max)) => (
            supplied_number("overall_score", &score),
            supplied_number("overall_max", &max),
        ),
        (score, max) => {
            let (total, total_max) = sum_breakdown(object.get("rubric_breakdown"));
            (
                score.map_or(total, |v| supplied_number("overall_score", &v)),
                max.map_or(total_max, |v| supplied_number("overall_max", &v)),
            )
        }
    };

    let letter_grade = match take_present(&mut object, "letter_grade") {
        Some(Value::String(s)) if !s.trim().is_empty() => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => letter_grade(exact_percent(overall_score, overall_max)).to_string(),
    };

    // Always recomputed; a model-supplied percent is discarded.
    object.remove("percent");

    GradeResult {
        assumptions: take_string_list(&mut object, "assumptions"),
        rubric_breakdown: take_entries(&mut object, "rubric_breakdown", rubric_item),
        overall_score,
        overall_max,
        letter_grade,
        percent: percent(overall_score, overall_max),
        strengths: take_string_list(&mut object, "strengths"),
        top_fixes: take_string_list(&mut object, "top_fixes"),
        rewrite_suggestions: take_entries(&mut object, "rewrite_suggestions", rewrite_suggestion),
        final_comment: take_present(&mut object, "final_comment").map(|v| value_text(&v)),
        extra: object,
    }
}

/// Sums `score` (default 0) and `max_score` (default 10) across the breakdown.
/// An entry whose values cannot be read as numbers contributes nothing.
fn sum_breakdown(breakdown: Option<&Value>) -> (f64, f64) {
    let Some(Value::Array(items)) = breakdown else {
        return (0.0, 0.0);
    };

    let mut total = 0.0;
    let mut total_max = 0.0;
    for (index, item) in items.iter().enumerate() {
        let Some(entry) = item.as_object() else {
            warn!("Skipping rubric_breakdown[{index}] in totals: not an object");
            continue;
        };
        let score = number_or(entry.get("score"), 0.0);
        let max = number_or(entry.get("max_score"), DEFAULT_MAX_SCORE);
        match (score, max) {
            (Some(score), Some(max)) => {
                total += score;
                total_max += max;
            }
            _ => warn!("Skipping rubric_breakdown[{index}] in totals: non-numeric score"),
        }
    }
    (total, total_max)
}

/// Moves the model's values into typed slots without changing them. Only a
/// missing `max_score` is filled in.
fn rubric_item(mut entry: Map<String, Value>) -> RubricItem {
    let max_score = match entry.remove("max_score") {
        None | Some(Value::Null) => Value::from(DEFAULT_MAX_SCORE as u64),
        Some(max) => max,
    };
    RubricItem {
        criterion: take_text(&mut entry, "criterion"),
        score: entry.remove("score"),
        max_score,
        why: take_text(&mut entry, "why"),
        how_to_improve: take_text_array(&mut entry, "how_to_improve"),
        extra: entry,
    }
}

fn rewrite_suggestion(mut entry: Map<String, Value>) -> RewriteSuggestion {
    RewriteSuggestion {
        original_excerpt: take_text(&mut entry, "original_excerpt"),
        improved_version: take_text(&mut entry, "improved_version"),
        reason: take_text(&mut entry, "reason"),
        extra: entry,
    }
}

/// Removes a key, treating an explicit `null` the same as absence.
fn take_present(object: &mut Map<String, Value>, key: &str) -> Option<Value> {
    object.remove(key).filter(|v| !v.is_null())
}

fn take_string_list(object: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    take_present(object, key).map(|v| string_list(&v))
}

/// Takes `key` only when it holds a string; any other value stays in `object`.
fn take_text(object: &mut Map<String, Value>, key: &str) -> Option<String> {
    match object.remove(key)? {
        Value::String(s) => Some(s),
        other => {
            object.insert(key.to_string(), other);
            None
        }
    }
}

/// Takes `key` only when it holds an array of strings; anything else stays.
fn take_text_array(object: &mut Map<String, Value>, key: &str) -> Option<Vec<String>> {
    match object.remove(key)? {
        Value::Array(items) if items.iter().all(Value::is_string) => Some(
            items
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        ),
        other => {
            object.insert(key.to_string(), other);
            None
        }
    }
}

/// Objects in the array become `T`; every other entry is kept as sent.
/// A value that is not an array stays in `object` untouched.
fn take_entries<T>(
    object: &mut Map<String, Value>,
    key: &str,
    convert: fn(Map<String, Value>) -> T,
) -> Option<Vec<ListEntry<T>>> {
    match object.remove(key)? {
        Value::Array(items) => Some(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(entry) => ListEntry::Structured(convert(entry)),
                    other => ListEntry::Raw(other),
                })
                .collect(),
        ),
        other => {
            if !other.is_null() {
                warn!("{key} is not an array; passing it through as sent");
            }
            object.insert(key.to_string(), other);
            None
        }
    }
}

/// A list of strings from an array (items stringified) or a lone scalar.
fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(value_text)
            .collect(),
        Value::Null => vec![],
        other => vec![value_text(other)],
    }
}

/// Display text for a JSON value: strings as-is, `null` empty, anything else
/// in its JSON form.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Reads a numeric field. Absent or null gives `default`; anything that is
/// not a finite number, boolean or numeric string gives `None`.
fn number_or(value: Option<&Value>, default: f64) -> Option<f64> {
    match value {
        None | Some(Value::Null) => Some(default),
        Some(v) => coerce_number(v),
    }
}

/// Booleans count as `1`/`0`.
fn coerce_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// A model-supplied total that is not a number counts as zero.
fn supplied_number(key: &str, value: &Value) -> f64 {
    coerce_number(value).unwrap_or_else(|| {
        warn!("{key} is not numeric ({value}); treating it as 0");
        0.0
    })
}
