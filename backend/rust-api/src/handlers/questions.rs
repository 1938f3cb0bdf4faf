use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use super::parse_id;
use crate::{
    error::ApiError,
    extractors::{AppJson, JsonOrForm},
    models::{
        category_map, CreateQuestionRequest, CreateQuestionResponse, DeleteQuestionResponse,
        PageQuery, QuestionListResponse, SearchRequest,
    },
    services::{
        question_service::{parse_page, QuestionService},
        AppState,
    },
};

/// GET /questions?page=N
pub async fn list_questions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    let page = parse_page(query.page.as_deref())?;
    tracing::debug!("Listing questions page {}", page);

    let service = QuestionService::new(state.store.clone());
    let page = service.page(page).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        questions: page.questions,
        total_questions: page.total_questions,
        categories: Some(category_map(&page.categories)),
        current_category: None,
    }))
}

/// POST /questions
pub async fn create_question(
    State(state): State<Arc<AppState>>,
    JsonOrForm(req): JsonOrForm<CreateQuestionRequest>,
) -> Result<Json<CreateQuestionResponse>, ApiError> {
    req.validate()?;

    let service = QuestionService::new(state.store.clone());
    let created = service.create(req.into()).await?;

    Ok(Json(CreateQuestionResponse {
        success: true,
        created: created.id,
    }))
}

/// DELETE /questions/{id}
pub async fn delete_question(
    State(state): State<Arc<AppState>>,
    Path(question_id): Path<String>,
) -> Result<Json<DeleteQuestionResponse>, ApiError> {
    // An unknown id is a 422 here, so a non-integer one is too
    let question_id = parse_id(&question_id, "question")
        .map_err(|_| ApiError::unprocessable("question id must be an integer"))?;

    let service = QuestionService::new(state.store.clone());
    service.delete(question_id).await?;

    Ok(Json(DeleteQuestionResponse {
        success: true,
        deleted: question_id,
    }))
}

/// POST /questions/search
pub async fn search_questions(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<SearchRequest>,
) -> Result<Json<QuestionListResponse>, ApiError> {
    req.validate()?;
    tracing::info!("Searching questions for {:?}", req.search_term);

    let service = QuestionService::new(state.store.clone());
    let questions = service.search(&req.search_term).await?;

    Ok(Json(QuestionListResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        categories: None,
        current_category: None,
    }))
}
