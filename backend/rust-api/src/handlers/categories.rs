use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::parse_id;
use crate::{
    error::ApiError,
    models::{category_map, CategoriesResponse, QuestionListResponse},
    services::{question_service::QuestionService, AppState},
};

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CategoriesResponse>, ApiError> {
    let service = QuestionService::new(state.store.clone());
    let categories = service.categories().await?;

    Ok(Json(CategoriesResponse {
        success: true,
        categories: category_map(&categories),
    }))
}

/// GET /categories/{id}/questions
pub async fn questions_by_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let category_id = parse_id(&category_id, "category")?;
    tracing::info!("Listing questions for category {}", category_id);

    let service = QuestionService::new(state.store.clone());
    let (category, questions) = service.by_category(category_id).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        categories: None,
        current_category: Some(category.kind),
    }))
}
