use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query,
    },
    Json,
};
use serde::Deserialize;

use crate::error::ApiError;

/// `?date=YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

impl DateQuery {
    /// The requested day, treating `?date=` like an absent parameter.
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref().filter(|d| !d.is_empty())
    }
}

/// Unwraps a JSON body, turning a rejection into a 400 with the resource's title.
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>, title: &str, subject: &str) -> Result<T, ApiError> {
    payload.map(|Json(value)| value).map_err(|rejection| {
        ApiError::validation(title, format!("The {} is invalid, {}", subject, rejection.body_text()))
    })
}

/// Unwraps query parameters, turning a rejection into a 400 problem.
pub fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, ApiError> {
    query.map(|Query(value)| value).map_err(|rejection| {
        ApiError::validation(
            "Invalid query parameters",
            format!("The query parameters are invalid, {}", rejection.body_text()),
        )
    })
}

/// Every `users` value of a query string. Repeated keys are all kept, and so
/// are empty values: `?users=` names one user with an empty id.
pub fn users_param(query: Option<&str>) -> Vec<String> {
    let Some(query) = query else {
        return Vec::new();
    };

    url::form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "users")
        .map(|(_, value)| value.into_owned())
        .collect()
}
