//! Axum route handlers for the Quiz API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::quiz::generator::generate_quiz;
use crate::quiz::models::{GenerateQuizRequest, QuizResponse};
use crate::state::AppState;

/// POST /api/v1/quiz/generate
///
/// Generates a quiz from the supplied content. The response may carry fewer
/// questions than requested when the model output was truncated and had to
/// be recovered; metadata reports the adjustment.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Result<Json<QuizResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }
    if request.topic_title.trim().is_empty() {
        return Err(AppError::Validation(
            "topicTitle cannot be empty".to_string(),
        ));
    }

    let response = generate_quiz(&state.llm, request).await?;

    Ok(Json(response))
}
