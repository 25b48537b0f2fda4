pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schedule;
pub mod services;
pub mod state;

use axum::{
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{protected, public};
use crate::middleware::{jwt_auth_middleware, problem_details};
use crate::state::AppState;

/// The full HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.security.cors_origins);

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected
        .merge(user_routes(&state))
        // Global middleware
        .layer(from_fn(problem_details))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn user_routes(state: &AppState) -> Router<AppState> {
    use protected::{anthropometrics, exercises, fixed_data, objectives, routines};

    Router::new()
        .route("/users/freeSchedules", get(routines::free_schedules))
        .route(
            "/users/:user_id/anthropometrics",
            get(anthropometrics::get).put(anthropometrics::put),
        )
        .route("/users/:user_id/fixedData", get(fixed_data::get).put(fixed_data::put))
        .route("/users/:user_id/objectives", get(objectives::get).put(objectives::put))
        .route(
            "/users/:user_id/routines",
            get(routines::get).post(routines::post).delete(routines::delete),
        )
        .route("/users/:user_id/exercises", get(exercises::get).post(exercises::post))
        .route(
            "/users/:user_id/exercises/:id",
            axum::routing::put(exercises::put).delete(exercises::delete),
        )
        .route_layer(from_fn_with_state(state.jwt.clone(), jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}
