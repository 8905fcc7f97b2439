//! Axum route handlers for grading, as a JSON API and as an HTML form flow.

use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form, Json,
};

use crate::errors::AppError;
use crate::grading::grader::grade_work;
use crate::grading::models::{GradeRequest, GradeResult};
use crate::render;
use crate::state::AppState;

fn validate(req: &GradeRequest) -> Result<(), AppError> {
    if req.rubric.trim().is_empty() {
        return Err(AppError::Validation("rubric cannot be empty".to_string()));
    }
    if req.student_work.trim().is_empty() {
        return Err(AppError::Validation(
            "student_work cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/grade
///
/// Grades the submitted work and returns the normalized `GradeResult`.
/// A model that answers with garbage still yields a 200 with the fallback grade;
/// only an unreachable or failing model service is an error.
pub async fn handle_grade_json(
    State(state): State<AppState>,
    Json(request): Json<GradeRequest>,
) -> Result<Json<GradeResult>, AppError> {
    validate(&request)?;

    let result = grade_work(&request, state.model.as_ref()).await?;

    Ok(Json(result))
}

/// GET /
pub async fn handle_index() -> Html<String> {
    Html(render::index_page())
}

/// POST /grade
///
/// Form-encoded variant of the JSON endpoint, rendering HTML for both the
/// grade and any failure.
pub async fn handle_grade_form(
    State(state): State<AppState>,
    Form(request): Form<GradeRequest>,
) -> Response {
    let outcome = match validate(&request) {
        Ok(()) => grade_work(&request, state.model.as_ref()).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => Html(render::result_page(&request, &result)).into_response(),
        Err(e) => {
            let (status, _, message) = e.parts();
            (status, Html(render::error_page(&message))).into_response()
        }
    }
}
