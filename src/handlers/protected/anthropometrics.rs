use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::utils::{json_body, query_params, DateQuery};
use crate::database::models::{AnthropometricData, Measurements};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::{parse_date, today};
use crate::state::AppState;

/// PUT /users/:user_id/anthropometrics - create or merge today's record
pub async fn put(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<Measurements>, JsonRejection>,
) -> ApiResult<AnthropometricData> {
    user.ensure_is(&user_id)?;
    let data = json_body(payload, "Invalid anthropometric user data", "anthropometric user data")?;

    tracing::debug!("Received anthropometric data: {:?}", data);

    let upserted = state
        .services
        .user_data
        .put_anthropometrics(&user_id, &data, today())
        .await?;
    Ok(upserted.into())
}

/// GET /users/:user_id/anthropometrics[?date=YYYY-MM-DD]
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<DateQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    user.ensure_is(&user_id)?;
    let query = query_params(query)?;
    let service = &state.services.user_data;

    match query.date() {
        Some(date) => {
            let date = parse_date(date)?;
            let record = service.anthropometrics_on(&user_id, date).await?;
            Ok(ApiResponse::success(record).into_response())
        }
        None => {
            let records = service.all_anthropometrics(&user_id).await?;
            Ok(ApiResponse::success(records).into_response())
        }
    }
}
