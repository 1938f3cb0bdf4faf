use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    error::ApiError,
    extractors::AppJson,
    models::{QuizRequest, QuizResponse},
    services::{quiz_service::QuizService, AppState},
};

/// POST /quizzes
///
/// Returns one question the caller has not seen yet, or `question: null`
/// once the category is exhausted. The caller keeps the history.
pub async fn next_quiz_question(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<QuizRequest>,
) -> Result<Json<QuizResponse>, ApiError> {
    let filter = req.category_filter().map_err(ApiError::Unprocessable)?;
    let excluded = req.excluded_ids();

    let service = QuizService::new(state.store.clone());
    let next = service.next_question(filter, &excluded).await?;

    Ok(Json(QuizResponse {
        previous_questions: req.previous_questions,
        question: next.into_option(),
    }))
}
