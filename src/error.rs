// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::database::DatabaseError;

/// HTTP API error carried as a title/detail pair and rendered as RFC 9457
/// problem details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // 400 Bad Request
    Validation { title: String, detail: String },

    // 401 Unauthorized
    Unauthorized { title: String, detail: String },

    // 404 Not Found
    NotFound { title: String, detail: String },

    // 409 Conflict
    Conflict { title: String, detail: String },

    // 500 Internal Server Error; the message is logged, never sent
    Internal(String),
}

/// RFC 9457 response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub instance: String,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing title
    pub fn title(&self) -> &str {
        match self {
            ApiError::Validation { title, .. }
            | ApiError::Unauthorized { title, .. }
            | ApiError::NotFound { title, .. }
            | ApiError::Conflict { title, .. } => title,
            ApiError::Internal(_) => "Internal Server Error",
        }
    }

    /// Client-facing detail
    pub fn detail(&self) -> &str {
        match self {
            ApiError::Validation { detail, .. }
            | ApiError::Unauthorized { detail, .. }
            | ApiError::NotFound { detail, .. }
            | ApiError::Conflict { detail, .. } => detail,
            ApiError::Internal(_) => "An unknown error has occurred",
        }
    }

    pub fn to_problem(&self, instance: impl Into<String>) -> ProblemDetails {
        ProblemDetails {
            kind: "about:blank".to_string(),
            title: self.title().to_string(),
            status: self.status_code().as_u16(),
            detail: self.detail().to_string(),
            instance: instance.into(),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Validation {
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn unauthorized(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn not_found(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::NotFound {
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn conflict(title: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Conflict {
            title: title.into(),
            detail: detail.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }

    /// The generic rejection used whenever the caller may not act as the target user.
    pub fn unauthorized_user() -> Self {
        ApiError::unauthorized(
            "Unauthorized user",
            "The user isn't authorized to access this endpoint",
        )
    }

    pub fn invalid_date() -> Self {
        ApiError::validation(
            "Invalid date",
            "The format of the date is invalid, expected format: YYYY-MM-DD",
        )
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::UniqueViolation(msg) => ApiError::conflict("Entity already exists", msg),
            other => {
                // Don't expose internal SQL errors to clients
                tracing::error!("Database error: {}", other);
                ApiError::internal(other.to_string())
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Internal(msg) => write!(f, "internal error: {}", msg),
            _ => write!(f, "{}, {}", self.title(), self.detail()),
        }
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum. `instance` is filled in by the
// problem_details middleware, which also finds the error in the extensions.
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = self.to_problem("");
        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}
