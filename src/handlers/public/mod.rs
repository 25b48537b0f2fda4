// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Service information and the liveness probe.

use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};

use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET / - service information
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "Progress Service",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Tracks body measurements, objectives, exercises and weekly routines",
        "endpoints": {
            "health": "/health (public)",
            "anthropometrics": "/users/:user_id/anthropometrics (protected)",
            "fixed_data": "/users/:user_id/fixedData (protected)",
            "objectives": "/users/:user_id/objectives (protected)",
            "routines": "/users/:user_id/routines (protected)",
            "free_schedules": "/users/freeSchedules?users=.. (protected)",
            "exercises": "/users/:user_id/exercises[/:id] (protected)",
        }
    }))
}

/// GET /health - store reachability
pub async fn health(State(state): State<AppState>) -> ApiResponse<Value> {
    let now = chrono::Utc::now();

    match state.repositories.health.ping().await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
        })),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            ApiResponse::with_status(
                json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable",
                }),
                StatusCode::SERVICE_UNAVAILABLE,
            )
        }
    }
}
