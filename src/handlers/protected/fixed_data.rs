use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use super::utils::{json_body, query_params};
use crate::database::models::{FixedDataInput, FixedUserData};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::today;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FixedDataQuery {
    pub base: Option<String>,
}

impl FixedDataQuery {
    fn wants_base(&self) -> bool {
        self.base.as_deref() == Some("true")
    }
}

/// PUT /users/:user_id/fixedData
pub async fn put(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<FixedDataInput>, JsonRejection>,
) -> ApiResult<FixedUserData> {
    user.ensure_is(&user_id)?;
    let input = json_body(payload, "Invalid fixed user data", "fixed user data")?;

    tracing::debug!("Received fixed user data: {:?}", input);

    let upserted = state
        .services
        .user_data
        .put_fixed_data(&user_id, &input, today())
        .await?;
    Ok(upserted.into())
}

/// GET /users/:user_id/fixedData[?base=true]
pub async fn get(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(user): Extension<AuthUser>,
    query: Result<Query<FixedDataQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    user.ensure_is(&user_id)?;
    let query = query_params(query)?;
    let service = &state.services.user_data;

    if query.wants_base() {
        let base = service.base_fixed_data(&user_id).await?;
        return Ok(ApiResponse::success(base).into_response());
    }

    let derived = service.fixed_data(&user_id, today()).await?;
    Ok(ApiResponse::success(derived).into_response())
}
