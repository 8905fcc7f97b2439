use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::grading::strictness::Strictness;

/// One grading request, built from the submitted form or JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRequest {
    pub assignment_type: String,
    pub grade_level: String,
    /// Authoritative grading criteria, embedded in the prompt verbatim.
    pub rubric: String,
    /// The work being graded, embedded in the prompt verbatim.
    pub student_work: String,
    #[serde(default)]
    pub strictness: Strictness,
}

/// A list entry as the model sent it: typed when it is a JSON object, kept
/// verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ListEntry<T> {
    Structured(T),
    Raw(Value),
}

/// A per-criterion score line returned by the model.
///
/// Values are the model's own. A field that is missing or has an unexpected
/// type stays out of the typed slots (anything present lands in `extra`), so
/// nothing is rewritten on its way to the caller. Only `max_score` is filled
/// in, with 10, when the model left it out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criterion: Option<String>,
    /// Usually a number, but e.g. `"N/A"` is kept as sent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<Value>,
    pub max_score: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_to_improve: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A suggested rewrite of a verbatim excerpt from the student work.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RewriteSuggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The normalized grade handed to the caller.
///
/// `overall_score`, `overall_max`, `letter_grade` and `percent` are always
/// populated. Everything else is whatever the model sent; fields it omitted
/// stay `None` and are left out of the JSON form. Unrecognized top-level
/// fields, and known ones whose shape does not fit the typed slot, are kept
/// in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assumptions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric_breakdown: Option<Vec<ListEntry<RubricItem>>>,
    pub overall_score: f64,
    pub overall_max: f64,
    pub letter_grade: String,
    pub percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_fixes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewrite_suggestions: Option<Vec<ListEntry<RewriteSuggestion>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_comment: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
