use axum::{
    extract::{rejection::JsonRejection, Path, RawQuery, State},
    Extension, Json,
};

use super::utils::{json_body, users_param};
use crate::database::models::{RoutineData, RoutineInput};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::schedule::{FreeSchedule, Schedule};
use crate::state::AppState;

/// POST /users/:user_id/routines
pub async fn post(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<RoutineInput>, JsonRejection>,
) -> ApiResult<RoutineData> {
    user.ensure_is(&user_id)?;
    let input = json_body(payload, "Invalid routine data", "routine data")?;

    tracing::debug!("Received routine data: {:?}", input);

    let routine = state.services.routines.create_routine(&user_id, input).await?;
    Ok(ApiResponse::created(routine))
}

/// GET /users/:user_id/routines
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Vec<RoutineData>> {
    user.ensure_is(&user_id)?;
    let routines = state.services.routines.routines(&user_id).await?;
    Ok(ApiResponse::success(routines))
}

/// DELETE /users/:user_id/routines - body names the schedule to remove
pub async fn delete(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Schedule>, JsonRejection>,
) -> ApiResult<Vec<RoutineData>> {
    user.ensure_is(&user_id)?;
    let schedule = json_body(payload, "Invalid routine data", "routine data")?;

    let remaining = state
        .services
        .routines
        .delete_routine(&user_id, &schedule)
        .await?;
    Ok(ApiResponse::success(remaining))
}

/// GET /users/freeSchedules?users=a&users=b
pub async fn free_schedules(State(state): State<AppState>, RawQuery(query): RawQuery) -> ApiResult<FreeSchedule> {
    let users = users_param(query.as_deref());
    tracing::debug!("Computing free schedules for {:?}", users);

    let free = state.services.routines.free_schedules(&users).await?;
    Ok(ApiResponse::success(free))
}
