//! Strictness calibration: maps the requested grading tone to the instruction
//! fragment appended to the grader persona.
//!
//! Strictness only changes prompt wording. Scoring arithmetic is identical
//! for every level.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Grading tone requested by the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Strictness {
    /// Total parse: case-insensitive, whitespace-trimmed, anything
    /// unrecognized (including the empty string) is `Medium`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Strictness::Easy,
            "hard" => Strictness::Hard,
            _ => Strictness::Medium,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strictness::Easy => "easy",
            Strictness::Medium => "medium",
            Strictness::Hard => "hard",
        }
    }

    /// Instruction fragment appended to the grader system prompt.
    pub fn instructions(&self) -> &'static str {
        match self {
            Strictness::Easy => {
                "Be supportive but still honest. Assume minor mistakes are common. \
                 Do not over-penalize small grammar issues unless they hurt clarity."
            }
            Strictness::Hard => {
                "Be strict and direct. Penalize weak evidence, vague claims, sloppy structure, \
                 and unclear writing. Point out missing requirements explicitly."
            }
            Strictness::Medium => {
                "Be balanced and honest. Reward clarity and strong evidence. \
                 Penalize confusion, missing rubric items, and weak reasoning."
            }
        }
    }
}

impl From<Option<&str>> for Strictness {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Strictness::parse).unwrap_or_default()
    }
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts any string (or null / absent via `#[serde(default)]`) and never fails.
impl<'de> Deserialize<'de> for Strictness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Strictness::from(raw.as_deref()))
    }
}
