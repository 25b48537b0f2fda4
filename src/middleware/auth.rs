use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{invalid_jwt, Claims, JwtService};
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.payload.id,
            username: claims.payload.username,
            email: claims.payload.email,
        }
    }
}

impl AuthUser {
    /// Per-user routes may only be used by the user they name.
    pub fn ensure_is(&self, user_id: &str) -> Result<(), ApiError> {
        if self.id != user_id {
            tracing::debug!("User {} tried to access resources of user {}", self.id, user_id);
            return Err(ApiError::unauthorized_user());
        }
        Ok(())
    }
}

/// JWT authentication middleware that validates tokens and extracts user context
pub async fn jwt_auth_middleware(
    State(jwt): State<JwtService>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers)?;
    let claims = jwt.decode(token)?;

    // Convert claims to AuthUser and inject into request
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = headers.get(axum::http::header::AUTHORIZATION).ok_or_else(|| {
        ApiError::unauthorized(
            "Unauthorized user",
            "The user isn't authorized because no Authorization header is provided",
        )
    })?;

    let auth_str = auth_header.to_str().map_err(|_| invalid_jwt())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.trim()),
        _ => Err(invalid_jwt()),
    }
}
