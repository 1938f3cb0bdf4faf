#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;
use trivia_api::{
    config::Config,
    create_router,
    models::{Category, Question},
    services::AppState,
    store::MemoryStore,
};

/// Router over an in-memory store holding the six default categories and
/// twelve questions: ids 1..=6 in Science (1), ids 7..=12 in Art (2).
pub fn create_test_app() -> Router {
    create_test_app_with(MemoryStore::default_categories(), seed_questions())
}

pub fn create_test_app_with(categories: Vec<Category>, questions: Vec<Question>) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let store = Arc::new(MemoryStore::with_data(categories, questions));
    let app_state = Arc::new(AppState::with_store(Config::in_memory(), store));
    create_router(app_state)
}

pub fn question(id: i64, text: &str, category: i64) -> Question {
    Question {
        id,
        question: text.to_string(),
        answer: format!("Answer {}", id),
        category,
        difficulty: (id % 5 + 1) as i32,
    }
}

pub fn seed_questions() -> Vec<Question> {
    vec![
        question(1, "What is the heaviest organ in the human body?", 1),
        question(2, "Who discovered penicillin?", 1),
        question(3, "Hematology is a branch of medicine involving the study of what?", 1),
        question(4, "What is the chemical symbol for gold?", 1),
        question(5, "How many bones are in the adult human body?", 1),
        question(6, "What planet is known as the red planet?", 1),
        question(7, "Which Dutch graphic artist was famous for impossible constructions?", 2),
        question(8, "La Giaconda is better known as what?", 2),
        question(9, "What is the title of Picasso's painting of a bombed town?", 2),
        question(10, "Which sculptor made The Thinker?", 2),
        question(11, "Whose painting has the TITLE 'The Starry Night'?", 2),
        question(12, "Who painted the ceiling of the Sistine Chapel?", 2),
    ]
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            panic!(
                "non-JSON body with status {}: {}",
                status,
                String::from_utf8_lossy(&bytes)
            )
        })
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub fn ids(questions: &serde_json::Value) -> Vec<i64> {
    questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_i64().unwrap())
        .collect()
}
