use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// The user carried inside a token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub payload: User,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(payload: User, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            payload,
            exp: (now + lifetime).timestamp(),
            iat: now.timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(#[from] jsonwebtoken::errors::Error),
}

/// Signs and decodes HS256 tokens with a shared secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl JwtService {
    pub fn new(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, Duration::minutes(security.jwt_expiry_minutes))
    }

    pub fn sign(&self, user: User) -> Result<String, JwtError> {
        self.sign_claims(&Claims::new(user, self.lifetime))
    }

    pub fn sign_claims(&self, claims: &Claims) -> Result<String, JwtError> {
        Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
    }

    /// Verifies the signature and expiry and returns the claims.
    pub fn decode(&self, token: &str) -> Result<Claims, ApiError> {
        if !is_jwt(token) {
            return Err(invalid_jwt());
        }

        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::unauthorized(
                    "Expired token",
                    "Your token has expired, please try logging in again",
                ),
                ErrorKind::InvalidToken | ErrorKind::Base64(_) | ErrorKind::Json(_) | ErrorKind::Utf8(_) => {
                    invalid_jwt()
                }
                other => {
                    tracing::debug!("Rejected token: {:?}", other);
                    ApiError::unauthorized(
                        "Unauthorized user",
                        "The user isn't authorized because the token is invalid",
                    )
                }
            })
    }
}

pub fn invalid_jwt() -> ApiError {
    ApiError::validation("Invalid JWT", "The provided token doesn't have JWT format")
}

/// Three non-empty base64url segments separated by dots.
fn is_jwt(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|s| {
            !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}
