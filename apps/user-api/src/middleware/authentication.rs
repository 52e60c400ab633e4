use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::fmt;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller, resolved from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(username: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            username: username.into(),
            roles,
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn require_role(&self, role: &str) -> Result<(), ApiError> {
        if self.has_role(role) {
            Ok(())
        } else {
            tracing::warn!(username = %self.username, required_role = %role, "access denied");
            Err(ApiError::Forbidden)
        }
    }
}

#[derive(Debug)]
pub enum AuthError {
    /// The token is unknown, expired or revoked
    InvalidToken,
    /// The token was accepted but names no user
    MissingUsername,
    /// The token could not be checked at all
    Unavailable(String),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::InvalidToken => write!(f, "token is not active"),
            AuthError::MissingUsername => write!(f, "token carries no username"),
            AuthError::Unavailable(msg) => write!(f, "token check unavailable: {}", msg),
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolves a bearer token into the caller's identity.
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequestParts<AppState> for Principal {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<Principal>() {
            return Ok(principal.clone());
        }

        let token = bearer_token(&parts.headers)
            .ok_or(ApiError::Unauthorized)?
            .to_string();

        let principal = state.authenticator.authenticate(&token).await.map_err(|e| {
            tracing::warn!(error = %e, "authentication failed");
            ApiError::Unauthorized
        })?;

        parts.extensions.insert(principal.clone());
        Ok(principal)
    }
}
