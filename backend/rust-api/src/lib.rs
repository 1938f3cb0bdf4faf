use axum::{
    http::{header, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod metrics;
pub mod middlewares;
pub mod models;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::ApiError;
pub use services::AppState;

pub fn create_router(app_state: Arc<AppState>) -> Router {
    // The trivia frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_origin(tower_http::cors::Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(handlers::metrics_handler)
                .layer(middleware::from_fn(handlers::metrics_auth_middleware)),
        )
        .merge(trivia_routes())
        .fallback(handlers::not_found_fallback)
        .method_not_allowed_fallback(handlers::method_not_allowed_fallback)
        .with_state(app_state)
        .layer(cors)
        .layer(middleware::from_fn(
            middlewares::metrics::metrics_middleware,
        ))
        .layer(middleware::from_fn(
            middlewares::trace::trace_context_middleware,
        ))
        .layer(TraceLayer::new_for_http())
}

fn trivia_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/categories", get(handlers::categories::list_categories))
        .route(
            "/categories/{id}/questions",
            get(handlers::categories::questions_by_category),
        )
        .route(
            "/questions",
            get(handlers::questions::list_questions).post(handlers::questions::create_question),
        )
        .route(
            "/questions/{id}",
            delete(handlers::questions::delete_question),
        )
        .route(
            "/questions/search",
            post(handlers::questions::search_questions),
        )
        .route("/quizzes", post(handlers::quizzes::next_quiz_question))
}
