use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::error::ApiError;

/// Renders any [`ApiError`] left in the response extensions as RFC 9457
/// problem details whose `instance` is the request path.
pub async fn problem_details(request: Request, next: Next) -> Response {
    let instance = request.uri().path().to_string();
    let method = request.method().clone();

    let mut response = next.run(request).await;

    let Some(err) = response.extensions_mut().remove::<ApiError>() else {
        return response;
    };

    match &err {
        ApiError::Internal(message) => {
            tracing::error!("{} {} failed: {}", method, instance, message)
        }
        other => tracing::debug!("{} {} rejected: {}", method, instance, other),
    }

    (err.status_code(), Json(err.to_problem(instance))).into_response()
}
