//! HTTP handlers for the REST API.
//!
//! Handlers only extract path tokens and bodies, normalize case where the API
//! promises it, and delegate to the service façade.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use serde_json::Value;

use super::dto::{DataResponse, HealthResponse};
use super::error::AppError;
use super::state::AppState;
use crate::models::{Lesson, LessonId, Person, PersonId};
use crate::services::directory::{self, PersonIndex};
use crate::services::schedule;
use crate::services::ScheduleView;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<DataResponse<T>>, AppError>;

fn data<T>(value: T) -> HandlerResult<T> {
    Ok(Json(DataResponse::new(value)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.repo().health_check().await {
        Ok(true) => "connected",
        Ok(false) => "disconnected",
        Err(e) => {
            log::error!("Health check failed: {}", e);
            "error"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: database.to_string(),
    })
}

/// Unmatched routes.
pub async fn not_found() -> AppError {
    AppError::NotFound("Not Found".to_string())
}

// =============================================================================
// Schedule
// =============================================================================

/// GET /api/v1/schedule
pub async fn all_schedules(State(state): State<AppState>) -> HandlerResult<ScheduleView> {
    data(schedule::all_schedules(state.repo()).await?)
}

/// GET /api/v1/schedule/id/{id}
pub async fn schedule_by_id(
    State(state): State<AppState>,
    id: Result<Path<LessonId>, PathRejection>,
) -> HandlerResult<ScheduleView> {
    let Path(id) = id?;
    data(schedule::schedule_by_lesson_id(state.repo(), id).await?)
}

/// PUT /api/v1/schedule/id/{id}
pub async fn replace_lesson(
    State(state): State<AppState>,
    id: Result<Path<LessonId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Lesson> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    data(schedule::replace_lesson(state.repo(), id, &payload).await?)
}

/// GET /api/v1/schedule/{group}
pub async fn group_schedule(
    State(state): State<AppState>,
    group: Result<Path<String>, PathRejection>,
) -> HandlerResult<ScheduleView> {
    let Path(group) = group?;
    data(schedule::schedule_for_group(state.repo(), &group).await?)
}

/// GET /api/v1/schedule/{group}/{week}
pub async fn week_schedule(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> HandlerResult<ScheduleView> {
    let Path((group, week)) = path?;
    let week = week.to_uppercase();
    data(schedule::schedule_for_week(state.repo(), &group, &week).await?)
}

/// GET /api/v1/schedule/{group}/{week}/{day}
pub async fn day_schedule(
    State(state): State<AppState>,
    path: Result<Path<(String, String, String)>, PathRejection>,
) -> HandlerResult<ScheduleView> {
    let Path((group, week, day)) = path?;
    let week = week.to_uppercase();
    let day = day.to_lowercase();
    data(schedule::schedule_for_day(state.repo(), &group, &week, &day).await?)
}

// =============================================================================
// Personalities
// =============================================================================

/// GET /api/v1/personalities
pub async fn list_persons(State(state): State<AppState>) -> HandlerResult<PersonIndex> {
    data(directory::list_persons(state.repo()).await?)
}

/// GET /api/v1/personalities/{key}/{value}
pub async fn find_person(
    State(state): State<AppState>,
    path: Result<Path<(String, String)>, PathRejection>,
) -> HandlerResult<PersonIndex> {
    let Path((key, value)) = path?;
    data(directory::find_person(state.repo(), &key, &value).await?)
}

/// POST /api/v1/personalities
pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Person> {
    let Json(payload) = payload?;
    data(directory::create_person(state.repo(), &payload).await?)
}

/// PUT /api/v1/personalities/{id}
pub async fn replace_person(
    State(state): State<AppState>,
    id: Result<Path<PersonId>, PathRejection>,
    payload: Result<Json<Value>, JsonRejection>,
) -> HandlerResult<Person> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    data(directory::replace_person(state.repo(), id, &payload).await?)
}
