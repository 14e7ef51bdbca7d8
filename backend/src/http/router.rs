//! Router configuration for the HTTP API.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Upper bound on request bodies; the largest lesson payload is a few KiB.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Schedule
        .route("/schedule", get(handlers::all_schedules))
        .route(
            "/schedule/id/{id}",
            get(handlers::schedule_by_id).put(handlers::replace_lesson),
        )
        .route("/schedule/{group}", get(handlers::group_schedule))
        .route("/schedule/{group}/{week}", get(handlers::week_schedule))
        .route("/schedule/{group}/{week}/{day}", get(handlers::day_schedule))
        // Personalities
        .route(
            "/personalities",
            get(handlers::list_persons).post(handlers::create_person),
        )
        .route("/personalities/{id}", put(handlers::replace_person))
        .route("/personalities/{key}/{value}", get(handlers::find_person));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_v1)
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
