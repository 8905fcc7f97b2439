//! Prompt Builder: turns a `GradeRequest` into the system and user instructions.
//!
//! Rubric and student work are embedded verbatim, with no escaping. They are
//! interpolated in a single `format!` pass, so text that looks like a
//! placeholder inside them is never substituted a second time.

use crate::grading::models::GradeRequest;
use crate::grading::prompts::{GRADER_SYSTEM, GRADING_RULES, OUTPUT_SCHEMA};

/// The two instructions sent to the model for one grading request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradePrompt {
    pub system: String,
    pub user: String,
}

/// Builds the prompt pair. Deterministic for identical requests.
pub fn build_prompt(req: &GradeRequest) -> GradePrompt {
    GradePrompt {
        system: system_prompt(req),
        user: user_prompt(req),
    }
}

fn system_prompt(req: &GradeRequest) -> String {
    format!("{GRADER_SYSTEM} {}", req.strictness.instructions())
}

fn user_prompt(req: &GradeRequest) -> String {
    format!(
        "ASSIGNMENT TYPE: {assignment_type}
GRADE LEVEL: {grade_level}
STRICTNESS MODE: {strictness}

RUBRIC (authoritative):
{rubric}

STUDENT WORK TO GRADE:
{student_work}

Return your output as VALID JSON only (no extra text), matching this schema:

{OUTPUT_SCHEMA}

{GRADING_RULES}",
        assignment_type = req.assignment_type,
        grade_level = req.grade_level,
        strictness = req.strictness,
        rubric = req.rubric,
        student_work = req.student_work,
    )
    .trim()
    .to_string()
}
