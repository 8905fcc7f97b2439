// Grading engine.
// Implements: prompt building, strictness calibration, the chat call, and
// response normalization (fence-tolerant extraction, totals, letter grades).
// All model calls go through llm_client; no direct HTTP calls here.

pub mod extract;
pub mod grader;
pub mod handlers;
pub mod letter;
pub mod models;
pub mod normalizer;
pub mod prompt_builder;
pub mod prompts;
pub mod strictness;
