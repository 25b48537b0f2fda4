use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use chrono::NaiveDate;

use super::utils::{json_body, query_params, DateQuery};
use crate::database::models::{AllExercisesInDay, ExerciseData, ExerciseInput};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::exercise_service::parse_exercise_id;
use crate::services::today;
use crate::state::AppState;

const INVALID_EXERCISE: &str = "Invalid exercise data";

/// POST /users/:user_id/exercises
pub async fn post(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ExerciseInput>, JsonRejection>,
) -> ApiResult<ExerciseData> {
    user.ensure_is(&user_id)?;
    let input = json_body(payload, INVALID_EXERCISE, "exercise data")?;

    let exercise = state.services.exercises.create_exercise(&user_id, &input).await?;
    Ok(ApiResponse::created(exercise))
}

/// GET /users/:user_id/exercises[?date=YYYY-MM-DD] - defaults to today
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> ApiResult<AllExercisesInDay> {
    user.ensure_is(&user_id)?;
    let query = query_params(query)?;

    let date = match query.date() {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            ApiError::validation("Invalid date format", "Date must be in YYYY-MM-DD format")
        })?,
        None => today(),
    };

    let day = state.services.exercises.exercises_on(&user_id, date).await?;
    Ok(ApiResponse::success(day))
}

/// PUT /users/:user_id/exercises/:id
pub async fn put(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ExerciseInput>, JsonRejection>,
) -> ApiResult<ExerciseData> {
    user.ensure_is(&user_id)?;
    let id = parse_exercise_id(&id)?;
    let input = json_body(payload, INVALID_EXERCISE, "exercise data")?;

    let exercise = state
        .services
        .exercises
        .update_exercise(&user_id, id, &input)
        .await?;
    Ok(ApiResponse::success(exercise))
}

/// DELETE /users/:user_id/exercises/:id
pub async fn delete(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(String, String)>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<()> {
    user.ensure_is(&user_id)?;
    let id = parse_exercise_id(&id)?;

    state.services.exercises.delete_exercise(&user_id, id).await?;
    Ok(ApiResponse::no_content())
}
