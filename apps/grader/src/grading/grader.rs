//! Grading pipeline: build prompt → one chat call → normalize.
//!
//! All model calls go through the `ChatModel` trait. Invocation failures
//! propagate as `AppError::Llm`; anything the model says is normalized.

use std::time::Instant;

use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::grading::models::{GradeRequest, GradeResult};
use crate::grading::normalizer::normalize;
use crate::grading::prompt_builder::build_prompt;
use crate::llm_client::ChatModel;

/// Grades one piece of student work. Stateless; safe to run concurrently.
pub async fn grade_work(
    req: &GradeRequest,
    model: &dyn ChatModel,
) -> Result<GradeResult, AppError> {
    let request_id = Uuid::new_v4();
    let span = info_span!(
        "grade_work",
        %request_id,
        model = model.model_name(),
        strictness = %req.strictness,
    );

    async move {
        let prompt = build_prompt(req);
        let started = Instant::now();

        let raw = model.chat(&prompt.system, &prompt.user).await?;

        let result = normalize(&raw);
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            letter_grade = %result.letter_grade,
            percent = result.percent,
            "Grading completed"
        );
        Ok::<_, AppError>(result)
    }
    .instrument(span)
    .await
}
