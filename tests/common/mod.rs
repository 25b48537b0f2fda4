#![allow(dead_code)]

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use progress_service::auth::{Claims, JwtService, User};
use progress_service::config::AppConfig;
use progress_service::database::MemoryStore;
use progress_service::state::AppState;

/// The application router over a fresh in-memory store.
pub struct TestApp {
    router: Router,
    jwt: JwtService,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: format!("user{}", id),
        email: format!("user{}@test.com", id),
    }
}

impl TestApp {
    pub fn new() -> Self {
        let state = AppState::new(AppConfig::development(), Arc::new(MemoryStore::new()));
        Self {
            jwt: state.jwt.clone(),
            router: progress_service::app(state),
        }
    }

    pub fn token_for(&self, user_id: &str) -> String {
        self.jwt.sign(user(user_id)).expect("failed to sign test token")
    }

    pub fn expired_token_for(&self, user_id: &str) -> String {
        let claims = Claims::new(user(user_id), chrono::Duration::minutes(-10));
        self.jwt.sign_claims(&claims).expect("failed to sign test token")
    }

    /// Sends a request with an optional raw Authorization header and JSON body.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Result<TestResponse> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("failed to read response body")?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).context("response body is not JSON")?
        };

        Ok(TestResponse { status, body })
    }

    /// Sends a request authenticated as `user_id`.
    pub async fn as_user(&self, user_id: &str, method: Method, uri: &str, body: Option<Value>) -> Result<TestResponse> {
        let bearer = format!("Bearer {}", self.token_for(user_id));
        self.send(method, uri, Some(&bearer), body).await
    }
}

/// Asserts an RFC 9457 problem body.
pub fn assert_problem(res: &TestResponse, status: StatusCode, title: &str, instance: &str) {
    assert_eq!(res.status, status, "unexpected status, body: {}", res.body);
    assert_eq!(res.body["type"], "about:blank");
    assert_eq!(res.body["title"], title);
    assert_eq!(res.body["status"], status.as_u16());
    assert_eq!(res.body["instance"], instance);
    assert!(res.body["detail"].is_string());
}
