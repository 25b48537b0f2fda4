use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use super::utils::json_body;
use crate::database::models::{ObjectiveData, ObjectiveInput};
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::today;
use crate::state::AppState;

/// PUT /users/:user_id/objectives
pub async fn put(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ObjectiveInput>, JsonRejection>,
) -> ApiResult<ObjectiveData> {
    user.ensure_is(&user_id)?;
    let input = json_body(payload, "Invalid user objective data", "user objective data")?;

    tracing::debug!("Received objective data: {:?}", input);

    let upserted = state
        .services
        .objectives
        .put_objective(&user_id, &input, today())
        .await?;
    Ok(upserted.into())
}

/// GET /users/:user_id/objectives
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<ObjectiveData> {
    user.ensure_is(&user_id)?;
    let objective = state.services.objectives.objective(&user_id).await?;
    Ok(ApiResponse::success(objective))
}
