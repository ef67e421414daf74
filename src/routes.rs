// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{health, participation, questions, trivias, users},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (users, questions, trivias).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool, Config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", get(users::get_user));

    let question_routes = Router::new()
        .route("/", get(questions::list_questions).post(questions::create_question))
        .route("/{id}", get(questions::get_question));

    let trivia_routes = Router::new()
        .route("/", get(trivias::list_trivias).post(trivias::create_trivia))
        .route("/{id}", get(trivias::get_trivia))
        .route(
            "/{id}/users/{user_id}/questions",
            get(participation::participant_questions),
        )
        .route("/{id}/answer", post(participation::submit_answer))
        .route(
            "/{id}/users/{user_id}/score",
            get(participation::get_score),
        )
        .route("/{id}/ranking", get(participation::get_ranking));

    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .nest("/users", user_routes)
        .nest("/questions", question_routes)
        .nest("/trivias", trivia_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
