use axum::{
    extract::rejection::JsonRejection,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use user_lib::errors_service::UserServiceError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    /// Field name to message, returned as the raw body
    Validation(BTreeMap<String, String>),
    BadRequest(String),
    Unauthorized,
    Forbidden,
    /// Failure that already carries the status the caller should see
    Service { status: StatusCode, message: String },
}

impl ApiError {
    pub fn invalid_uuid() -> Self {
        ApiError::BadRequest("invalid uuid".to_string())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Service { status, .. } => *status,
        }
    }
}

fn error_code(status: StatusCode) -> String {
    if status.is_server_error() {
        return "internal_error".to_string();
    }
    status
        .canonical_reason()
        .map(|reason| reason.to_lowercase().replace([' ', '-'], "_"))
        .unwrap_or_else(|| "error".to_string())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            ApiError::Validation(violations) => {
                return (status, Json(violations)).into_response();
            }
            ApiError::Unauthorized => {
                let body = ErrorResponse {
                    error: "unauthorized".to_string(),
                    message: Some("authentication required".to_string()),
                };
                return (status, [(header::WWW_AUTHENTICATE, "Bearer")], Json(body))
                    .into_response();
            }
            ApiError::Forbidden => ("forbidden".to_string(), Some("insufficient role".to_string())),
            ApiError::BadRequest(msg) => ("bad_request".to_string(), Some(msg)),
            ApiError::Service { message, .. } => (error_code(status), Some(message)),
        };

        let body = ErrorResponse { error, message };

        (status, Json(body)).into_response()
    }
}

impl From<UserServiceError> for ApiError {
    fn from(err: UserServiceError) -> Self {
        ApiError::Service {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Service {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Check if environment is production-like (prod, prod01, prod02, etc.)
pub fn is_prod_like(env: &str) -> bool {
    env.to_lowercase().starts_with("prod")
}

/// Converts a service error to an ApiError, logging server-side failures.
/// In production, server-side failure details are hidden.
pub fn handle_service_error(err: UserServiceError, env: &str, operation: &str) -> ApiError {
    let status = err.status();
    if status.is_server_error() {
        tracing::error!(env = %env, error = ?err, operation = %operation, "service error");
        if is_prod_like(env) {
            return ApiError::Service {
                status,
                message: "internal server error".to_string(),
            };
        }
    } else {
        tracing::info!(error = %err, operation = %operation, status = %status, "request rejected by identity provider");
    }
    ApiError::from(err)
}
